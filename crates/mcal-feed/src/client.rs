//! Owned session manager for push subscriptions.

use crate::session::{run_session, SessionState};
use dashmap::DashMap;
use mcal_core::{Interval, MarketDataPoint, StreamKey};
use parking_lot::RwLock;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Callback invoked with each normalized point for a subscription.
pub type DataCallback = Arc<dyn Fn(MarketDataPoint) + Send + Sync>;

/// Feed client configuration.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    /// WebSocket endpoint root; the stream path is appended per key.
    pub ws_base_url: String,
    /// Reconnect attempts per key before the session fails permanently.
    pub max_reconnect_attempts: u32,
    /// Base delay for exponential reconnect backoff.
    pub reconnect_base_delay_ms: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            ws_base_url: "wss://stream.binance.com:9443/ws".to_string(),
            max_reconnect_attempts: 5,
            reconnect_base_delay_ms: 3000,
        }
    }
}

struct Session {
    cancel: CancellationToken,
    state: Arc<RwLock<SessionState>>,
    _task: JoinHandle<()>,
}

/// Manages one live session per subscription key.
///
/// Owned, not global: construct at application start, inject into
/// consumers, and call [`FeedClient::unsubscribe_all`] (or drop) at
/// shutdown. Every key reconnects independently; a fresh subscribe for
/// an active key supersedes its session. Must be used inside a tokio
/// runtime (sessions are spawned tasks).
pub struct FeedClient {
    config: FeedConfig,
    sessions: DashMap<StreamKey, Session>,
}

impl FeedClient {
    pub fn new(config: FeedConfig) -> Self {
        Self {
            config,
            sessions: DashMap::new(),
        }
    }

    /// Subscribe to the rolling 24h ticker stream for a symbol.
    pub fn subscribe_ticker(&self, symbol: &str, callback: DataCallback) -> StreamKey {
        let key = StreamKey::ticker(symbol);
        self.subscribe(key.clone(), callback);
        key
    }

    /// Subscribe to the kline stream for a symbol and interval.
    pub fn subscribe_kline(
        &self,
        symbol: &str,
        interval: Interval,
        callback: DataCallback,
    ) -> StreamKey {
        let key = StreamKey::kline(symbol, interval);
        self.subscribe(key.clone(), callback);
        key
    }

    /// Open a session for a key, superseding any existing one.
    pub fn subscribe(&self, key: StreamKey, callback: DataCallback) {
        if let Some((_, old)) = self.sessions.remove(&key) {
            info!(%key, "Superseding existing session");
            old.cancel.cancel();
        }

        let url = format!("{}/{}", self.config.ws_base_url, key.stream_name());
        let state = Arc::new(RwLock::new(SessionState::Disconnected));
        let cancel = CancellationToken::new();

        let task = tokio::spawn(run_session(
            url,
            key.clone(),
            self.config.clone(),
            callback,
            state.clone(),
            cancel.clone(),
        ));

        self.sessions.insert(
            key,
            Session {
                cancel,
                state,
                _task: task,
            },
        );
    }

    /// Tear down one subscription immediately, from any state. A pending
    /// reconnect timer for the key is invalidated; no callback fires
    /// afterwards.
    pub fn unsubscribe(&self, key: &StreamKey) {
        if let Some((_, session)) = self.sessions.remove(key) {
            info!(%key, "Unsubscribed");
            session.cancel.cancel();
        }
    }

    /// Tear down every subscription (shutdown path).
    pub fn unsubscribe_all(&self) {
        let keys: Vec<StreamKey> = self.sessions.iter().map(|e| e.key().clone()).collect();
        for key in keys {
            self.unsubscribe(&key);
        }
    }

    /// Last-known open state for a key. Synchronous best effort: under
    /// concurrent transitions it reflects the most recent write, not a
    /// guaranteed current socket state.
    pub fn connection_status(&self, key: &StreamKey) -> bool {
        self.session_state(key) == Some(SessionState::Open)
    }

    /// Full lifecycle state for a key, if subscribed.
    pub fn session_state(&self, key: &StreamKey) -> Option<SessionState> {
        self.sessions.get(key).map(|s| *s.state.read())
    }

    /// Number of tracked subscriptions.
    pub fn subscription_count(&self) -> usize {
        self.sessions.len()
    }
}

impl Drop for FeedClient {
    fn drop(&mut self) {
        self.unsubscribe_all();
    }
}

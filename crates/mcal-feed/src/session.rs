//! Per-subscription session state machine.
//!
//! Each subscription key owns one task running this loop:
//! connect, read frames until the transport drops, then back off and
//! reconnect up to the configured attempt cap. Cancelling the session
//! token (unsubscribe) exits promptly from any state, including a
//! pending backoff sleep, so no attempt can fire after teardown.

use crate::client::{DataCallback, FeedConfig};
use crate::message::{parse_frame, StreamFrame};
use chrono::Utc;
use futures_util::{SinkExt, StreamExt};
use mcal_core::StreamKey;
use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use ReadOutcome::{Cancelled, Dropped};

/// Lifecycle state of one subscription key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Disconnected,
    Connecting,
    Open,
    Reconnecting,
    /// Reconnect attempts exhausted. Terminal until a fresh subscribe.
    Failed,
}

/// Backoff before reconnect attempt `attempt` (0-indexed):
/// `base * 2^attempt`. No jitter and no delay cap; with the small,
/// capped attempt count the growth stays bounded in practice.
pub(crate) fn backoff_delay(base_ms: u64, attempt: u32) -> Duration {
    Duration::from_millis(base_ms.saturating_mul(2u64.saturating_pow(attempt)))
}

/// Drive one subscription until it fails permanently or is cancelled.
pub(crate) async fn run_session(
    url: String,
    key: StreamKey,
    config: FeedConfig,
    callback: DataCallback,
    state: Arc<RwLock<SessionState>>,
    cancel: CancellationToken,
) {
    let mut attempt: u32 = 0;

    loop {
        *state.write() = SessionState::Connecting;

        let connected = tokio::select! {
            () = cancel.cancelled() => {
                *state.write() = SessionState::Disconnected;
                return;
            }
            result = connect_async(&url) => result,
        };

        match connected {
            Ok((socket, _response)) => {
                info!(%key, "Stream connected");
                *state.write() = SessionState::Open;
                attempt = 0;

                match read_frames(socket, &key, &callback, &cancel).await {
                    Cancelled => {
                        *state.write() = SessionState::Disconnected;
                        return;
                    }
                    Dropped => {
                        warn!(%key, "Stream closed");
                    }
                }
            }
            Err(e) => {
                warn!(%key, error = %e, "Stream connect failed");
            }
        }

        if attempt >= config.max_reconnect_attempts {
            error!(%key, attempt, "Max reconnection attempts reached");
            *state.write() = SessionState::Failed;
            return;
        }

        let delay = backoff_delay(config.reconnect_base_delay_ms, attempt);
        *state.write() = SessionState::Reconnecting;
        warn!(%key, attempt, delay_ms = delay.as_millis() as u64, "Reconnecting");

        tokio::select! {
            () = tokio::time::sleep(delay) => {}
            () = cancel.cancelled() => {
                *state.write() = SessionState::Disconnected;
                return;
            }
        }

        attempt += 1;
    }
}

enum ReadOutcome {
    /// Unsubscribed; tear down without reconnecting.
    Cancelled,
    /// Transport closed or errored; reconnect may follow.
    Dropped,
}

async fn read_frames(
    socket: WebSocketStream<MaybeTlsStream<TcpStream>>,
    key: &StreamKey,
    callback: &DataCallback,
    cancel: &CancellationToken,
) -> ReadOutcome {
    let (mut write, mut read) = socket.split();

    loop {
        tokio::select! {
            () = cancel.cancelled() => {
                let _ = write.send(Message::Close(None)).await;
                return Cancelled;
            }

            msg = read.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        handle_text_frame(key, &text, callback);
                    }
                    Some(Ok(Message::Ping(data))) => {
                        debug!(%key, "Received ping, sending pong");
                        if write.send(Message::Pong(data)).await.is_err() {
                            return Dropped;
                        }
                    }
                    Some(Ok(Message::Close(frame))) => {
                        let reason = frame.map(|f| f.reason.to_string()).unwrap_or_default();
                        warn!(%key, %reason, "Stream closed by server");
                        return Dropped;
                    }
                    Some(Err(e)) => {
                        error!(%key, error = %e, "Stream read error");
                        return Dropped;
                    }
                    None => {
                        warn!(%key, "Stream ended");
                        return Dropped;
                    }
                    _ => {}
                }
            }
        }
    }
}

/// Parse one text frame and invoke the callback for recognized shapes.
/// Malformed frames are logged and dropped; the session stays open.
fn handle_text_frame(key: &StreamKey, text: &str, callback: &DataCallback) {
    match parse_frame(text) {
        Ok(StreamFrame::Ticker(ticker)) => {
            let point = ticker.into_point(Utc::now().date_naive());
            callback(point);
        }
        Ok(StreamFrame::Kline(kline)) => {
            if !kline.bar.is_closed {
                debug!(%key, "In-progress bar suppressed");
                return;
            }
            match kline.into_point() {
                Ok(point) => callback(point),
                Err(e) => warn!(%key, error = %e, "Dropping bad kline frame"),
            }
        }
        Err(e) => {
            warn!(%key, error = %e, "Malformed frame dropped");
        }
    }
}

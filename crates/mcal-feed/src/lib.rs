//! Streaming market-data feed client.
//!
//! Maintains one WebSocket session per subscription key (symbol x
//! stream kind), normalizes push frames into canonical
//! `MarketDataPoint`s, and recovers from disconnects with exponential
//! backoff up to a bounded attempt count. Also provides the rolling
//! per-symbol series store that live updates merge into.

pub mod client;
pub mod error;
pub mod message;
pub mod session;
pub mod store;

pub use client::{DataCallback, FeedClient, FeedConfig};
pub use error::{FeedError, FeedResult};
pub use message::{KlineBar, KlineFrame, StreamFrame, TickerFrame};
pub use session::SessionState;
pub use store::{SeriesStore, DEFAULT_WINDOW_DAYS};

use std::sync::Once;

static INIT_CRYPTO: Once = Once::new();

/// Initialize the TLS crypto provider.
/// Must be called before any WebSocket connections are made.
pub fn init_crypto() {
    INIT_CRYPTO.call_once(|| {
        let _ = rustls::crypto::ring::default_provider().install_default();
    });
}

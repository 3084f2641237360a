//! HTTP client for exchange market-data endpoints.
//!
//! Fetches historical klines and 24h ticker snapshots and maps them into
//! `MarketDataPoint`s. Failed requests surface as errors to the caller;
//! retry policy belongs to the caching layer above, not here.

pub mod client;
pub mod error;

pub use client::{HistoryClient, RawKline, Ticker24h, DEFAULT_BASE_URL};
pub use error::{RestError, RestResult};

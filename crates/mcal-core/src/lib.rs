//! Core domain types for the market calendar.
//!
//! This crate provides fundamental types used throughout the system:
//! - `MarketDataPoint`: one daily (or latest-tick) observation for a symbol
//! - `CalendarDay`: a date-addressed cell with derived metrics
//! - `Price`: precision-safe price type
//! - `StreamKey`, `StreamKind`, `Interval`: subscription addressing

pub mod calendar;
pub mod decimal;
pub mod error;
pub mod point;
pub mod stream;

pub use calendar::{AnomalyType, CalendarDay, VolatilityLevel};
pub use decimal::Price;
pub use error::{CoreError, Result};
pub use point::MarketDataPoint;
pub use stream::{Interval, StreamKey, StreamKind};

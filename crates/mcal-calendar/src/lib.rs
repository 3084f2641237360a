//! Calendar assembly for the market dashboard.
//!
//! Builds the month grid, merges market data points into calendar cells
//! (pure merge, no in-place mutation), flags statistical outliers, and
//! derives the summary figures shown alongside the calendar.

pub mod anomaly;
pub mod grid;
pub mod merge;
pub mod summary;

pub use anomaly::detect_anomalies;
pub use grid::month_grid;
pub use merge::merge_market_data;
pub use summary::{quick_stats, technical_summary, MacdTrend, QuickStats, TechnicalSummary};

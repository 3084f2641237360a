//! Rolling per-symbol series store.
//!
//! Holds the chronological window of daily points that live updates
//! merge into. A point for an already-present date supersedes the stored
//! one; a new date appends and the window trims from the front. Gaps
//! from disconnected periods are not backfilled here.

use dashmap::DashMap;
use mcal_core::MarketDataPoint;

/// Default rolling window: one month of daily bars plus headroom.
pub const DEFAULT_WINDOW_DAYS: usize = 31;

/// Thread-safe rolling series, keyed by symbol.
pub struct SeriesStore {
    window: usize,
    series: DashMap<String, Vec<MarketDataPoint>>,
}

impl SeriesStore {
    pub fn new(window: usize) -> Self {
        Self {
            window,
            series: DashMap::new(),
        }
    }

    /// Seed a symbol's series wholesale (history fetch result).
    /// Points are sorted by date and trimmed to the window.
    pub fn seed(&self, symbol: &str, mut points: Vec<MarketDataPoint>) {
        points.sort_by_key(|p| p.date);
        trim_front(&mut points, self.window);
        self.series.insert(symbol.to_string(), points);
    }

    /// Merge one live point: supersede the same-date entry or append.
    pub fn apply(&self, point: MarketDataPoint) {
        let mut entry = self.series.entry(point.symbol.clone()).or_default();
        let points = entry.value_mut();

        if let Some(existing) = points.iter_mut().find(|p| p.date == point.date) {
            *existing = point;
        } else {
            points.push(point);
            points.sort_by_key(|p| p.date);
            trim_front(points, self.window);
        }
    }

    /// Chronological snapshot of a symbol's series.
    pub fn series(&self, symbol: &str) -> Vec<MarketDataPoint> {
        self.series
            .get(symbol)
            .map(|entry| entry.clone())
            .unwrap_or_default()
    }

    /// Closing prices for a symbol, oldest first.
    pub fn close_prices(&self, symbol: &str) -> Vec<f64> {
        self.series
            .get(symbol)
            .map(|entry| entry.iter().map(|p| p.close_price.to_f64()).collect())
            .unwrap_or_default()
    }

    pub fn len(&self, symbol: &str) -> usize {
        self.series.get(symbol).map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self, symbol: &str) -> bool {
        self.len(symbol) == 0
    }
}

impl Default for SeriesStore {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_DAYS)
    }
}

fn trim_front(points: &mut Vec<MarketDataPoint>, window: usize) {
    if points.len() > window {
        let excess = points.len() - window;
        points.drain(..excess);
    }
}

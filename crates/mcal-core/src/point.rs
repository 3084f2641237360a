//! Canonical market data observation.
//!
//! One `MarketDataPoint` per symbol per calendar date. Points are created
//! by the feed client (push frames), the history fetch (REST bars), or
//! tests; they are immutable once constructed and superseded, not
//! mutated, by newer points for the same date.

use crate::Price;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One daily (or latest-tick) observation for a symbol.
///
/// `low <= open, close <= high` is expected from well-behaved sources but
/// not enforced here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketDataPoint {
    /// Instrument identifier (e.g., "BTCUSDT").
    pub symbol: String,
    /// Calendar date of the observation.
    pub date: NaiveDate,
    pub open_price: Price,
    pub close_price: Price,
    pub high_price: Price,
    pub low_price: Price,
    /// Base-asset volume.
    pub volume: Decimal,
    /// close - open.
    pub price_change: Decimal,
    /// price_change / open * 100. Zero when open is zero.
    pub price_change_percent: Decimal,
    /// Intraday range proxy: (high - low) / open * 100.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volatility: Option<Decimal>,
    /// Quote-asset volume, used as a liquidity proxy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub liquidity: Option<Decimal>,
}

impl MarketDataPoint {
    /// Build a point from raw OHLCV values, deriving change, percentage
    /// change, volatility and liquidity.
    #[allow(clippy::too_many_arguments)]
    pub fn from_ohlcv(
        symbol: impl Into<String>,
        date: NaiveDate,
        open: Price,
        high: Price,
        low: Price,
        close: Price,
        volume: Decimal,
        quote_volume: Option<Decimal>,
    ) -> Self {
        let price_change = (close - open).inner();
        let price_change_percent = close.pct_from(open).unwrap_or(Decimal::ZERO);
        let volatility = if open.is_zero() {
            None
        } else {
            Some((high - low).inner() / open.inner() * Decimal::from(100))
        };

        Self {
            symbol: symbol.into(),
            date,
            open_price: open,
            close_price: close,
            high_price: high,
            low_price: low,
            volume,
            price_change,
            price_change_percent,
            volatility,
            liquidity: quote_volume,
        }
    }
}

//! Push frame parsing and normalization.
//!
//! The exchange pushes JSON frames tagged by an `e` event-type field.
//! Two shapes are recognized: a flat 24h ticker event and a kline event
//! with a nested bar object carrying an is-closed flag. Anything else
//! fails to parse and is dropped by the session loop.

use crate::error::{FeedError, FeedResult};
use chrono::{DateTime, NaiveDate, Utc};
use mcal_core::{MarketDataPoint, Price};
use rust_decimal::Decimal;
use serde::Deserialize;

/// Inbound push frame, dispatched on the `e` event-type tag.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "e")]
pub enum StreamFrame {
    #[serde(rename = "24hrTicker")]
    Ticker(TickerFrame),
    #[serde(rename = "kline")]
    Kline(KlineFrame),
}

/// Flat 24h rolling ticker event. Numeric fields arrive as strings.
#[derive(Debug, Clone, Deserialize)]
pub struct TickerFrame {
    #[serde(rename = "E")]
    pub event_time: i64,
    #[serde(rename = "s")]
    pub symbol: String,
    #[serde(rename = "o")]
    pub open: Price,
    #[serde(rename = "h")]
    pub high: Price,
    #[serde(rename = "l")]
    pub low: Price,
    #[serde(rename = "c")]
    pub close: Price,
    #[serde(rename = "v")]
    pub volume: Decimal,
    #[serde(rename = "q")]
    pub quote_volume: Decimal,
    #[serde(rename = "P")]
    pub price_change_percent: Decimal,
}

impl TickerFrame {
    /// Normalize into a canonical point dated `date` (the session passes
    /// "today": a ticker is a rolling snapshot, not a calendar bar).
    ///
    /// The percent change comes from the frame itself rather than being
    /// re-derived, matching what the exchange displays.
    pub fn into_point(self, date: NaiveDate) -> MarketDataPoint {
        let price_change = (self.close - self.open).inner();
        let volatility = if self.open.is_zero() {
            None
        } else {
            Some((self.high - self.low).inner() / self.open.inner() * Decimal::from(100))
        };

        MarketDataPoint {
            symbol: self.symbol,
            date,
            open_price: self.open,
            close_price: self.close,
            high_price: self.high,
            low_price: self.low,
            volume: self.volume,
            price_change,
            price_change_percent: self.price_change_percent,
            volatility,
            liquidity: Some(self.quote_volume),
        }
    }
}

/// Kline event wrapping a nested bar object.
#[derive(Debug, Clone, Deserialize)]
pub struct KlineFrame {
    #[serde(rename = "E")]
    pub event_time: i64,
    #[serde(rename = "s")]
    pub symbol: String,
    #[serde(rename = "k")]
    pub bar: KlineBar,
}

/// One fixed-interval OHLCV bar.
#[derive(Debug, Clone, Deserialize)]
pub struct KlineBar {
    /// Bar open time (epoch ms); the point's calendar date.
    #[serde(rename = "t")]
    pub start_time: i64,
    #[serde(rename = "s")]
    pub symbol: String,
    #[serde(rename = "i")]
    pub interval: String,
    #[serde(rename = "o")]
    pub open: Price,
    #[serde(rename = "c")]
    pub close: Price,
    #[serde(rename = "h")]
    pub high: Price,
    #[serde(rename = "l")]
    pub low: Price,
    #[serde(rename = "v")]
    pub volume: Decimal,
    #[serde(rename = "q")]
    pub quote_volume: Decimal,
    /// Whether this bar is closed. Only closed bars become points;
    /// in-progress bars are partial-period noise.
    #[serde(rename = "x")]
    pub is_closed: bool,
}

impl KlineFrame {
    /// Normalize a (closed) bar into a canonical point dated from the
    /// bar's open time.
    pub fn into_point(self) -> FeedResult<MarketDataPoint> {
        let bar = self.bar;
        let date = DateTime::<Utc>::from_timestamp_millis(bar.start_time)
            .ok_or_else(|| FeedError::InvalidData(format!("Invalid bar time: {}", bar.start_time)))?
            .date_naive();

        Ok(MarketDataPoint::from_ohlcv(
            bar.symbol,
            date,
            bar.open,
            bar.high,
            bar.low,
            bar.close,
            bar.volume,
            Some(bar.quote_volume),
        ))
    }
}

/// Parse a raw text frame. Unknown event types and malformed payloads
/// are parse errors; the caller logs and drops them.
pub fn parse_frame(text: &str) -> FeedResult<StreamFrame> {
    serde_json::from_str(text).map_err(|e| FeedError::ParseError(e.to_string()))
}

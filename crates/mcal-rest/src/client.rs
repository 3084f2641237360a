//! HTTP client for klines and ticker snapshots.

use crate::error::{RestError, RestResult};
use chrono::{DateTime, Utc};
use mcal_core::{Interval, MarketDataPoint, Price};
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};

/// Public REST root of the exchange API.
pub const DEFAULT_BASE_URL: &str = "https://api.binance.com/api/v3";

/// Default timeout for API requests.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// One kline bar as the exchange returns it: a positional JSON array
/// `[open_time, open, high, low, close, volume, close_time,
/// quote_volume, trades, taker_base, taker_quote, ignore]` with numeric
/// fields as strings.
#[derive(Debug, Clone, Deserialize)]
pub struct RawKline(
    pub i64,
    pub String,
    pub String,
    pub String,
    pub String,
    pub String,
    pub i64,
    pub String,
    pub u64,
    pub String,
    pub String,
    pub serde_json::Value,
);

impl RawKline {
    pub fn open_time_ms(&self) -> i64 {
        self.0
    }
}

/// 24-hour rolling ticker snapshot.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticker24h {
    pub symbol: String,
    pub price_change: Decimal,
    pub price_change_percent: Decimal,
    pub last_price: Decimal,
    pub open_price: Decimal,
    pub high_price: Decimal,
    pub low_price: Decimal,
    pub bid_price: Decimal,
    pub ask_price: Decimal,
    pub volume: Decimal,
    pub quote_volume: Decimal,
    pub open_time: i64,
    pub close_time: i64,
}

/// Client for the exchange's public market-data REST endpoints.
pub struct HistoryClient {
    client: Client,
    base_url: String,
}

impl HistoryClient {
    /// Create a client against the given REST root
    /// (e.g. [`DEFAULT_BASE_URL`]).
    pub fn new(base_url: impl Into<String>) -> RestResult<Self> {
        let client = Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(|e| RestError::HttpClient(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Fetch raw klines for a symbol.
    ///
    /// Non-2xx responses surface as [`RestError::Status`]; nothing is
    /// retried here.
    pub async fn get_klines(
        &self,
        symbol: &str,
        interval: Interval,
        start_time: Option<i64>,
        end_time: Option<i64>,
        limit: u32,
    ) -> RestResult<Vec<RawKline>> {
        let mut query: Vec<(&str, String)> = vec![
            ("symbol", symbol.to_string()),
            ("interval", interval.as_str().to_string()),
            ("limit", limit.to_string()),
        ];
        if let Some(start) = start_time {
            query.push(("startTime", start.to_string()));
        }
        if let Some(end) = end_time {
            query.push(("endTime", end.to_string()));
        }

        debug!(symbol, %interval, limit, "Fetching klines");

        let response = self
            .client
            .get(format!("{}/klines", self.base_url))
            .query(&query)
            .send()
            .await
            .map_err(|e| RestError::HttpClient(format!("HTTP request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RestError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let klines: Vec<RawKline> = response
            .json()
            .await
            .map_err(|e| RestError::ParseError(format!("Failed to parse klines: {e}")))?;

        Ok(klines)
    }

    /// Fetch the trailing `days` daily bars mapped into canonical points.
    pub async fn get_historical_data(
        &self,
        symbol: &str,
        days: u32,
    ) -> RestResult<Vec<MarketDataPoint>> {
        let end_time = Utc::now().timestamp_millis();
        let start_time = end_time - i64::from(days) * 24 * 60 * 60 * 1000;

        let klines = self
            .get_klines(symbol, Interval::Day1, Some(start_time), Some(end_time), days)
            .await?;

        let points = klines
            .iter()
            .map(|k| map_kline(symbol, k))
            .collect::<RestResult<Vec<_>>>()?;

        info!(symbol, count = points.len(), "Fetched historical bars");
        Ok(points)
    }

    /// Fetch the 24h ticker snapshot for a symbol.
    pub async fn get_24hr_ticker(&self, symbol: &str) -> RestResult<Ticker24h> {
        let response = self
            .client
            .get(format!("{}/ticker/24hr", self.base_url))
            .query(&[("symbol", symbol)])
            .send()
            .await
            .map_err(|e| RestError::HttpClient(format!("HTTP request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RestError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let ticker: Ticker24h = response
            .json()
            .await
            .map_err(|e| RestError::ParseError(format!("Failed to parse ticker: {e}")))?;

        Ok(ticker)
    }
}

/// Map a raw kline bar into a canonical point, dated from the bar's
/// open time.
pub fn map_kline(symbol: &str, kline: &RawKline) -> RestResult<MarketDataPoint> {
    let date = DateTime::<Utc>::from_timestamp_millis(kline.open_time_ms())
        .ok_or_else(|| RestError::ParseError(format!("Invalid open time: {}", kline.0)))?
        .date_naive();

    let open = parse_price(&kline.1)?;
    let high = parse_price(&kline.2)?;
    let low = parse_price(&kline.3)?;
    let close = parse_price(&kline.4)?;
    let volume: Decimal = parse_decimal(&kline.5)?;
    let quote_volume: Decimal = parse_decimal(&kline.7)?;

    Ok(MarketDataPoint::from_ohlcv(
        symbol,
        date,
        open,
        high,
        low,
        close,
        volume,
        Some(quote_volume),
    ))
}

fn parse_price(s: &str) -> RestResult<Price> {
    s.parse()
        .map_err(|_| RestError::ParseError(format!("Invalid price: {s}")))
}

fn parse_decimal(s: &str) -> RestResult<Decimal> {
    s.parse()
        .map_err(|_| RestError::ParseError(format!("Invalid decimal: {s}")))
}

//! Subscription addressing for the streaming feed.
//!
//! A `StreamKey` identifies one logical subscription: symbol x stream
//! kind (x interval for bar streams). Keys render to the exchange's
//! stream path format, e.g. `btcusdt@ticker` or `btcusdt@kline_1d`.

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Bar interval for kline streams and history requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Interval {
    #[serde(rename = "1m")]
    Min1,
    #[serde(rename = "5m")]
    Min5,
    #[serde(rename = "15m")]
    Min15,
    #[serde(rename = "1h")]
    Hour1,
    #[serde(rename = "4h")]
    Hour4,
    #[default]
    #[serde(rename = "1d")]
    Day1,
    #[serde(rename = "1w")]
    Week1,
}

impl Interval {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Min1 => "1m",
            Self::Min5 => "5m",
            Self::Min15 => "15m",
            Self::Hour1 => "1h",
            Self::Hour4 => "4h",
            Self::Day1 => "1d",
            Self::Week1 => "1w",
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Interval {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1m" => Ok(Self::Min1),
            "5m" => Ok(Self::Min5),
            "15m" => Ok(Self::Min15),
            "1h" => Ok(Self::Hour1),
            "4h" => Ok(Self::Hour4),
            "1d" => Ok(Self::Day1),
            "1w" => Ok(Self::Week1),
            other => Err(CoreError::UnknownInterval(other.to_string())),
        }
    }
}

/// Kind of push stream for a subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamKind {
    /// Rolling 24h ticker updates.
    Ticker,
    /// Fixed-interval OHLCV bars.
    Kline(Interval),
}

/// Identity of one logical subscription.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StreamKey {
    pub symbol: String,
    pub kind: StreamKind,
}

impl StreamKey {
    pub fn ticker(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            kind: StreamKind::Ticker,
        }
    }

    pub fn kline(symbol: impl Into<String>, interval: Interval) -> Self {
        Self {
            symbol: symbol.into(),
            kind: StreamKind::Kline(interval),
        }
    }

    /// Exchange stream path for this key.
    pub fn stream_name(&self) -> String {
        let symbol = self.symbol.to_lowercase();
        match self.kind {
            StreamKind::Ticker => format!("{symbol}@ticker"),
            StreamKind::Kline(interval) => format!("{symbol}@kline_{interval}"),
        }
    }
}

impl fmt::Display for StreamKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.stream_name())
    }
}

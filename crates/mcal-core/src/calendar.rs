//! Calendar cell types and derived classifications.

use crate::MarketDataPoint;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Volatility bucket derived by thresholding the intraday range proxy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VolatilityLevel {
    Low,
    Medium,
    High,
}

impl VolatilityLevel {
    /// Classify a volatility percentage.
    ///
    /// Boundaries are inclusive on the low side of the upper bucket:
    /// `2` is already Medium, `5` is already High.
    pub fn classify(volatility: Decimal) -> Self {
        if volatility < dec!(2) {
            Self::Low
        } else if volatility < dec!(5) {
            Self::Medium
        } else {
            Self::High
        }
    }
}

impl std::fmt::Display for VolatilityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

/// Statistical classification of a calendar day.
///
/// `Recurrence` is reserved for repeated day-of-month moves; only
/// `Anomaly` is produced by the current detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnomalyType {
    Anomaly,
    Recurrence,
}

/// A date-addressed calendar cell augmented with market metrics.
///
/// Classification fields (`volatility_level`, `anomaly_type`) are
/// recomputed whenever the underlying month's point set changes; they are
/// never persisted independently of their source data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDay {
    pub date: NaiveDate,
    /// Day-of-month number as rendered in the cell.
    pub day_number: u32,
    pub is_current_month: bool,
    pub is_today: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market_data: Option<MarketDataPoint>,
    pub volatility_level: VolatilityLevel,
    /// Daily performance percentage (close vs open).
    pub performance: Decimal,
    /// Quote-currency volume for the day.
    pub volume: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anomaly_type: Option<AnomalyType>,
}

impl CalendarDay {
    /// An undecorated cell, as produced by the month grid before any
    /// market data is merged in.
    pub fn empty(date: NaiveDate, day_number: u32, is_current_month: bool, is_today: bool) -> Self {
        Self {
            date,
            day_number,
            is_current_month,
            is_today,
            market_data: None,
            volatility_level: VolatilityLevel::Low,
            performance: Decimal::ZERO,
            volume: Decimal::ZERO,
            anomaly_type: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_boundaries() {
        assert_eq!(VolatilityLevel::classify(dec!(1.5)), VolatilityLevel::Low);
        assert_eq!(VolatilityLevel::classify(dec!(2)), VolatilityLevel::Medium);
        assert_eq!(VolatilityLevel::classify(dec!(4.99)), VolatilityLevel::Medium);
        assert_eq!(VolatilityLevel::classify(dec!(5)), VolatilityLevel::High);
        assert_eq!(VolatilityLevel::classify(dec!(7)), VolatilityLevel::High);
    }

    #[test]
    fn test_empty_cell_defaults() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let day = CalendarDay::empty(date, 1, true, false);

        assert!(day.market_data.is_none());
        assert!(day.anomaly_type.is_none());
        assert_eq!(day.volatility_level, VolatilityLevel::Low);
        assert_eq!(day.performance, Decimal::ZERO);
    }

    #[test]
    fn test_level_serializes_lowercase() {
        let json = serde_json::to_string(&VolatilityLevel::High).unwrap();
        assert_eq!(json, "\"high\"");
    }
}

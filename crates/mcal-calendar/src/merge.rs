//! Pure merge of market data into calendar cells.

use mcal_core::{CalendarDay, MarketDataPoint, VolatilityLevel};
use std::collections::HashMap;

/// Decorate a grid with market data, returning a new collection.
///
/// For each current-month day with a matching point the cell gets the
/// point attached plus derived `volatility_level`, `performance` and
/// `volume`. Other cells pass through untouched apart from a cleared
/// `anomaly_type`: classification is only valid for the point set it was
/// computed from, so callers re-run [`crate::detect_anomalies`] after
/// every merge.
///
/// When `points` holds several entries for one date the later one wins
/// (newer points supersede older ones).
pub fn merge_market_data(days: &[CalendarDay], points: &[MarketDataPoint]) -> Vec<CalendarDay> {
    let by_date: HashMap<_, _> = points.iter().map(|p| (p.date, p)).collect();

    days.iter()
        .map(|day| {
            let mut day = day.clone();
            day.anomaly_type = None;
            if day.is_current_month {
                if let Some(&point) = by_date.get(&day.date) {
                    day.volatility_level =
                        VolatilityLevel::classify(point.volatility.unwrap_or_default());
                    day.performance = point.price_change_percent;
                    day.volume = point.liquidity.unwrap_or_default();
                    day.market_data = Some(point.clone());
                }
            }
            day
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use mcal_core::{AnomalyType, Price};
    use rust_decimal_macros::dec;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
    }

    fn point(day: u32, open: rust_decimal::Decimal, close: rust_decimal::Decimal) -> MarketDataPoint {
        MarketDataPoint::from_ohlcv(
            "BTCUSDT",
            d(day),
            Price::new(open),
            Price::new(close.max(open)),
            Price::new(close.min(open)),
            Price::new(close),
            dec!(10),
            Some(dec!(1000)),
        )
    }

    #[test]
    fn test_merge_decorates_matching_day() {
        let days = vec![CalendarDay::empty(d(5), 5, true, false)];
        let merged = merge_market_data(&days, &[point(5, dec!(100), dec!(110))]);

        assert!(merged[0].market_data.is_some());
        assert_eq!(merged[0].performance, dec!(10));
        assert_eq!(merged[0].volume, dec!(1000));
        assert_eq!(merged[0].volatility_level, VolatilityLevel::High);
    }

    #[test]
    fn test_merge_skips_other_month_days() {
        let days = vec![CalendarDay::empty(d(5), 5, false, false)];
        let merged = merge_market_data(&days, &[point(5, dec!(100), dec!(110))]);

        assert!(merged[0].market_data.is_none());
        assert_eq!(merged[0].performance, dec!(0));
    }

    #[test]
    fn test_merge_is_pure() {
        let days = vec![CalendarDay::empty(d(5), 5, true, false)];
        let _ = merge_market_data(&days, &[point(5, dec!(100), dec!(110))]);

        // Input untouched.
        assert!(days[0].market_data.is_none());
    }

    #[test]
    fn test_merge_clears_stale_anomaly_flags() {
        let mut day = CalendarDay::empty(d(5), 5, true, false);
        day.anomaly_type = Some(AnomalyType::Anomaly);

        let merged = merge_market_data(&[day], &[]);
        assert!(merged[0].anomaly_type.is_none());
    }

    #[test]
    fn test_later_point_supersedes_earlier() {
        let days = vec![CalendarDay::empty(d(5), 5, true, false)];
        let points = vec![point(5, dec!(100), dec!(105)), point(5, dec!(100), dec!(120))];

        let merged = merge_market_data(&days, &points);
        assert_eq!(merged[0].performance, dec!(20));
    }
}

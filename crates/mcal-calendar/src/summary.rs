//! Aggregate month statistics and the drill-in technical summary.

use mcal_core::{MarketDataPoint, VolatilityLevel};
use mcal_indicators::{close_prices, macd_default, mean, moving_average, rsi_default};
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;

/// Headline figures for the loaded series.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickStats {
    /// Mean of the per-day volatility values (absent values count as 0).
    pub avg_volatility: f64,
    /// Sum of quote-currency volumes.
    pub total_volume: f64,
    /// (last close - first open) / first open * 100.
    pub monthly_performance: f64,
    /// Days classified High by the volatility thresholds.
    pub high_vol_days: usize,
}

/// Compute headline figures over a chronological series.
pub fn quick_stats(points: &[MarketDataPoint]) -> QuickStats {
    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        return QuickStats::default();
    };

    let vols: Vec<f64> = points
        .iter()
        .map(|p| p.volatility.and_then(|v| v.to_f64()).unwrap_or(0.0))
        .collect();

    let total_volume = points
        .iter()
        .map(|p| p.liquidity.and_then(|v| v.to_f64()).unwrap_or(0.0))
        .sum();

    let monthly_performance = last
        .close_price
        .pct_from(first.open_price)
        .and_then(|d| d.to_f64())
        .unwrap_or(0.0);

    let high_vol_days = points
        .iter()
        .filter(|p| {
            VolatilityLevel::classify(p.volatility.unwrap_or_default()) == VolatilityLevel::High
        })
        .count();

    QuickStats {
        avg_volatility: mean(&vols),
        total_volume,
        monthly_performance,
        high_vol_days,
    }
}

/// MACD posture derived from the last defined histogram value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MacdTrend {
    Bullish,
    Bearish,
    Neutral,
}

/// Indicator readings for the drill-in panel of a selected date range.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TechnicalSummary {
    /// RSI(14) over the closes; `50.0` means "not enough history".
    pub rsi: f64,
    /// 20-period simple moving average of the closes.
    pub ma20: f64,
    pub macd_trend: MacdTrend,
}

/// Derive the drill-in readings for a chronological series. Short input
/// degrades to the engine's sentinels; it never fails.
pub fn technical_summary(points: &[MarketDataPoint]) -> TechnicalSummary {
    let closes = close_prices(points);

    let macd_trend = match macd_default(&closes).histogram.iter().flatten().last() {
        Some(h) if *h > 0.0 => MacdTrend::Bullish,
        Some(h) if *h < 0.0 => MacdTrend::Bearish,
        _ => MacdTrend::Neutral,
    };

    TechnicalSummary {
        rsi: rsi_default(&closes),
        ma20: moving_average(&closes, 20),
        macd_trend,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use mcal_core::Price;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn point(day: u32, open: Decimal, close: Decimal, vol: Decimal) -> MarketDataPoint {
        let mut p = MarketDataPoint::from_ohlcv(
            "BTCUSDT",
            NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
            Price::new(open),
            Price::new(close.max(open)),
            Price::new(close.min(open)),
            Price::new(close),
            dec!(10),
            Some(dec!(100)),
        );
        p.volatility = Some(vol);
        p
    }

    #[test]
    fn test_quick_stats_empty() {
        assert_eq!(quick_stats(&[]), QuickStats::default());
    }

    #[test]
    fn test_quick_stats_figures() {
        let points = vec![
            point(1, dec!(100), dec!(105), dec!(1)),
            point(2, dec!(105), dec!(110), dec!(3)),
            point(3, dec!(110), dec!(120), dec!(6)),
        ];

        let stats = quick_stats(&points);
        assert!((stats.avg_volatility - 10.0 / 3.0).abs() < 1e-9);
        assert!((stats.total_volume - 300.0).abs() < 1e-9);
        // (120 - 100) / 100 * 100
        assert!((stats.monthly_performance - 20.0).abs() < 1e-9);
        assert_eq!(stats.high_vol_days, 1);
    }

    #[test]
    fn test_summary_short_series_uses_sentinels() {
        let points = vec![point(1, dec!(100), dec!(101), dec!(1))];
        let summary = technical_summary(&points);

        assert_eq!(summary.rsi, 50.0);
        assert!((summary.ma20 - 101.0).abs() < 1e-9);
        assert_eq!(summary.macd_trend, MacdTrend::Neutral);
    }

    #[test]
    fn test_summary_uptrend_reads_bullish() {
        let points: Vec<MarketDataPoint> = (1..=31)
            .map(|i| {
                let base = Decimal::from(100 + i);
                point(i as u32, base, base + dec!(1), dec!(1))
            })
            .collect();

        let summary = technical_summary(&points);
        assert_eq!(summary.rsi, 100.0);
        assert_eq!(summary.macd_trend, MacdTrend::Bullish);
    }
}

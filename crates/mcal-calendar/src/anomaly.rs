//! Statistical outlier flagging for a displayed month.

use mcal_core::{AnomalyType, CalendarDay};
use mcal_indicators::{mean, std_dev};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use tracing::debug;

/// Two-sided z-score gate width.
const Z_THRESHOLD: f64 = 2.0;

fn to_f64(d: Decimal) -> f64 {
    d.to_f64().unwrap_or(0.0)
}

/// Flag current-month days whose volatility or performance lies strictly
/// outside `mean +/- 2*sigma` of the month's population. Returns a new
/// collection.
///
/// The population statistics use every current-month day: days without
/// market data contribute `0.0` volatility. The per-day volatility check
/// only applies when the day actually carries a volatility value;
/// performance is always checked. Either metric out of band flags the
/// day (logical OR). Days outside the current month are never flagged,
/// and an all-identical month flags nothing (sigma = 0 and the gate is
/// strict).
pub fn detect_anomalies(days: &[CalendarDay]) -> Vec<CalendarDay> {
    let current: Vec<&CalendarDay> = days.iter().filter(|d| d.is_current_month).collect();

    let vols: Vec<f64> = current
        .iter()
        .map(|d| day_volatility(d).unwrap_or(0.0))
        .collect();
    let perfs: Vec<f64> = current.iter().map(|d| to_f64(d.performance)).collect();

    let (vol_lo, vol_hi) = band(&vols);
    let (perf_lo, perf_hi) = band(&perfs);

    let mut flagged = 0usize;
    let out = days
        .iter()
        .map(|day| {
            let mut day = day.clone();
            day.anomaly_type = None;
            if day.is_current_month {
                let vol_outlier = day_volatility(&day)
                    .map(|v| v > vol_hi || v < vol_lo)
                    .unwrap_or(false);
                let perf = to_f64(day.performance);
                if vol_outlier || perf > perf_hi || perf < perf_lo {
                    day.anomaly_type = Some(AnomalyType::Anomaly);
                    flagged += 1;
                }
            }
            day
        })
        .collect();

    debug!(month_days = current.len(), flagged, "Anomaly detection pass");
    out
}

fn day_volatility(day: &CalendarDay) -> Option<f64> {
    day.market_data
        .as_ref()
        .and_then(|m| m.volatility)
        .map(to_f64)
}

fn band(values: &[f64]) -> (f64, f64) {
    let m = mean(values);
    let s = std_dev(values);
    (m - Z_THRESHOLD * s, m + Z_THRESHOLD * s)
}

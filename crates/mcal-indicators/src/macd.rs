//! Moving Average Convergence Divergence.

use crate::ema::ema;

/// Standard MACD fast EMA period.
pub const MACD_FAST: usize = 12;
/// Standard MACD slow EMA period.
pub const MACD_SLOW: usize = 26;
/// Standard MACD signal-line period.
pub const MACD_SIGNAL: usize = 9;

/// MACD line, signal line and histogram, all the same length as the
/// input series.
#[derive(Debug, Clone, PartialEq)]
pub struct Macd {
    pub macd: Vec<Option<f64>>,
    pub signal: Vec<Option<f64>>,
    pub histogram: Vec<Option<f64>>,
}

/// MACD over a price series.
///
/// `macd[i] = ema_fast[i] - ema_slow[i]` wherever both EMAs are defined.
/// The signal line smooths the MACD line with `None` positions replaced
/// by `0.0` before smoothing; this biases the signal's early values
/// toward zero instead of propagating `None`. Consumers depend on those
/// early values being zero-biased rather than absent, so keep this
/// substitution when touching the signal path.
/// `histogram[i] = macd[i] - signal[i]` wherever both are defined.
pub fn macd(values: &[f64], fast: usize, slow: usize, signal_period: usize) -> Macd {
    let ema_fast = ema(values, fast);
    let ema_slow = ema(values, slow);

    let macd_line: Vec<Option<f64>> = ema_fast
        .iter()
        .zip(&ema_slow)
        .map(|(f, s)| match (f, s) {
            (Some(f), Some(s)) => Some(f - s),
            _ => None,
        })
        .collect();

    let zero_filled: Vec<f64> = macd_line.iter().map(|v| v.unwrap_or(0.0)).collect();
    let signal = ema(&zero_filled, signal_period);

    let histogram: Vec<Option<f64>> = macd_line
        .iter()
        .zip(&signal)
        .map(|(m, s)| match (m, s) {
            (Some(m), Some(s)) => Some(m - s),
            _ => None,
        })
        .collect();

    Macd {
        macd: macd_line,
        signal,
        histogram,
    }
}

/// MACD with the standard 12/26/9 parameters.
pub fn macd_default(values: &[f64]) -> Macd {
    macd(values, MACD_FAST, MACD_SLOW, MACD_SIGNAL)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(n: usize) -> Vec<f64> {
        // Mildly oscillating uptrend, enough structure for a nonzero MACD.
        (0..n)
            .map(|i| 100.0 + i as f64 * 0.5 + if i % 2 == 0 { 1.0 } else { -1.0 })
            .collect()
    }

    #[test]
    fn test_lengths_match_input() {
        let values = series(60);
        let out = macd_default(&values);
        assert_eq!(out.macd.len(), values.len());
        assert_eq!(out.signal.len(), values.len());
        assert_eq!(out.histogram.len(), values.len());
    }

    #[test]
    fn test_macd_undefined_before_slow_period() {
        let values = series(60);
        let out = macd_default(&values);
        for i in 0..MACD_SLOW - 1 {
            assert!(out.macd[i].is_none(), "macd[{i}] should be None");
        }
        assert!(out.macd[MACD_SLOW - 1].is_some());
    }

    #[test]
    fn test_histogram_identity() {
        let values = series(80);
        let out = macd_default(&values);
        for i in 0..values.len() {
            if let (Some(m), Some(s), Some(h)) = (out.macd[i], out.signal[i], out.histogram[i]) {
                assert!((h - (m - s)).abs() < 1e-9, "identity broken at {i}");
            }
        }
    }

    #[test]
    fn test_signal_smooths_zero_filled_line() {
        // The signal line is defined from index signal_period - 1 even
        // though the MACD line is still None there: the zero-substitution
        // feeds the smoother real zeros, not gaps.
        let values = series(60);
        let out = macd_default(&values);
        assert!(out.signal[MACD_SIGNAL - 1].is_some());
        assert!(out.macd[MACD_SIGNAL - 1].is_none());
    }

    #[test]
    fn test_short_series_all_none() {
        let values = series(10);
        let out = macd_default(&values);
        assert!(out.macd.iter().all(Option::is_none));
        assert!(out.histogram.iter().all(Option::is_none));
    }
}

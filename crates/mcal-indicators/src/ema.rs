//! Exponential moving average.

/// Exponential Moving Average over a price series.
///
/// Returns a series of the same length as the input. Positions
/// `0..period-1` hold `None` (insufficient data), except position
/// `period-1` which seeds the recurrence with the simple average of the
/// first `period` values; the simple-average seed avoids the bias of
/// seeding with the first observation. Beyond the seed:
/// `ema[i] = (values[i] - ema[i-1]) * k + ema[i-1]` with
/// `k = 2 / (period + 1)`.
///
/// A series shorter than `period` (or a zero period) yields an
/// all-`None` output of the input length.
pub fn ema(values: &[f64], period: usize) -> Vec<Option<f64>> {
    if period == 0 || values.len() < period {
        return vec![None; values.len()];
    }

    let k = 2.0 / (period as f64 + 1.0);
    let mut out = Vec::with_capacity(values.len());
    let mut prev = 0.0;

    for (i, &value) in values.iter().enumerate() {
        if i + 1 < period {
            out.push(None);
        } else if i + 1 == period {
            let seed = values[..period].iter().sum::<f64>() / period as f64;
            out.push(Some(seed));
            prev = seed;
        } else {
            prev = (value - prev) * k + prev;
            out.push(Some(prev));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_series_is_all_none() {
        let values = [100.0, 101.0, 102.0];
        let out = ema(&values, 5);
        assert_eq!(out.len(), values.len());
        assert!(out.iter().all(Option::is_none));
    }

    #[test]
    fn test_output_length_matches_input() {
        for n in 0..40 {
            let values: Vec<f64> = (0..n).map(|i| 100.0 + i as f64).collect();
            assert_eq!(ema(&values, 12).len(), values.len());
        }
    }

    #[test]
    fn test_seed_is_simple_average() {
        let values = [10.0, 20.0, 30.0, 40.0];
        let out = ema(&values, 3);

        assert!(out[0].is_none());
        assert!(out[1].is_none());
        // Seed = (10 + 20 + 30) / 3
        assert!((out[2].unwrap() - 20.0).abs() < 1e-9);
        // k = 2/4 = 0.5; (40 - 20) * 0.5 + 20 = 30
        assert!((out[3].unwrap() - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_constant_series_stays_constant() {
        let values = [50.0; 10];
        let out = ema(&values, 4);
        for v in out.iter().flatten() {
            assert!((v - 50.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_zero_period_degrades() {
        let values = [1.0, 2.0];
        assert!(ema(&values, 0).iter().all(Option::is_none));
    }
}

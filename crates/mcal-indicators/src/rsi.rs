//! Relative Strength Index.

/// Standard RSI lookback period.
pub const RSI_PERIOD: usize = 14;

/// RSI over a price series, bounded to `[0, 100]`.
///
/// Computes successive differences, splits them into gains and losses,
/// and takes the simple average of the last `period` of each (not
/// Wilder's smoothed variant). Returns `100` when the average loss is
/// exactly zero.
///
/// Fewer than `period + 1` prices return the neutral sentinel `50.0`
/// ("not enough history"), never an error. Callers must treat `50`
/// from short input as a sentinel, not a computed momentum reading.
pub fn rsi(prices: &[f64], period: usize) -> f64 {
    if period == 0 || prices.len() < period + 1 {
        return 50.0;
    }

    let deltas: Vec<f64> = prices.windows(2).map(|w| w[1] - w[0]).collect();
    let recent = &deltas[deltas.len() - period..];

    let avg_gain: f64 = recent.iter().filter(|d| **d > 0.0).sum::<f64>() / period as f64;
    let avg_loss: f64 = recent.iter().filter(|d| **d < 0.0).map(|d| -d).sum::<f64>() / period as f64;

    if avg_loss == 0.0 {
        return 100.0;
    }

    100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
}

/// RSI with the standard 14-period lookback.
pub fn rsi_default(prices: &[f64]) -> f64 {
    rsi(prices, RSI_PERIOD)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_history_returns_neutral() {
        let prices: Vec<f64> = (0..14).map(|i| 100.0 + i as f64).collect();
        assert_eq!(rsi_default(&prices), 50.0);
        assert_eq!(rsi(&[], RSI_PERIOD), 50.0);
    }

    #[test]
    fn test_monotonic_rise_hits_ceiling() {
        let prices: Vec<f64> = (0..20).map(|i| 100.0 + i as f64).collect();
        assert_eq!(rsi_default(&prices), 100.0);
    }

    #[test]
    fn test_monotonic_fall_hits_floor() {
        let prices: Vec<f64> = (0..20).map(|i| 100.0 - i as f64).collect();
        assert_eq!(rsi_default(&prices), 0.0);
    }

    #[test]
    fn test_bounded() {
        let prices: Vec<f64> = (0..50)
            .map(|i| 100.0 + (i as f64 * 0.7).sin() * 5.0)
            .collect();
        let value = rsi_default(&prices);
        assert!((0.0..=100.0).contains(&value));
    }

    #[test]
    fn test_equal_gains_and_losses_is_neutral() {
        // Alternating +1/-1: average gain equals average loss.
        let prices: Vec<f64> = (0..21)
            .map(|i| if i % 2 == 0 { 100.0 } else { 101.0 })
            .collect();
        let value = rsi_default(&prices);
        assert!((value - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_only_last_period_counts() {
        // A large early crash outside the 14-delta window must not
        // affect the result.
        let mut prices = vec![500.0, 100.0];
        prices.extend((0..15).map(|i| 100.0 + i as f64));
        assert_eq!(rsi_default(&prices), 100.0);
    }
}

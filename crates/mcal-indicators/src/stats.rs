//! Population statistics and the simple moving average.

/// Arithmetic mean. Empty input yields `0.0`.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation (divisor N, not N-1).
/// Empty input yields `0.0`.
pub fn std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Average of the last `period` values.
///
/// Degrades gracefully: with fewer than `period` values available (or a
/// zero period) it averages everything it has; empty input yields `0.0`.
pub fn moving_average(values: &[f64], period: usize) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let window = if period == 0 || values.len() <= period {
        values
    } else {
        &values[values.len() - period..]
    };
    window.iter().sum::<f64>() / window.len() as f64
}

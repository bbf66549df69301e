/// Computes the arithmetic mean of a slice of values. Returns NaN for empty input.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Computes the population standard deviation given a pre-computed mean.
/// Returns NaN for empty input.
pub fn stddev(values: &[f64], mean: f64) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;

    variance.sqrt()
}

/// Smallest value, or NaN for empty input.
pub fn min(values: &[f64]) -> f64 {
    values.iter().copied().reduce(f64::min).unwrap_or(f64::NAN)
}

/// Largest value, or NaN for empty input.
pub fn max(values: &[f64]) -> f64 {
    values.iter().copied().reduce(f64::max).unwrap_or(f64::NAN)
}

/// Shortest text that parses back to exactly `value`, always with a decimal
/// point for whole numbers (`270.0`, `83.33333333333333`).
pub fn format_number(value: f64) -> String {
    format!("{value:?}")
}

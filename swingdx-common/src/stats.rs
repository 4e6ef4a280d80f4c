//! Descriptive statistics over `f64` slices
//!
//! All functions are total over empty input and return 0.0 rather than
//! NaN, so results can flow into scores without poisoning them.

/// Arithmetic mean (0.0 for empty input)
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation (divides by `n`, not `n - 1`)
pub fn population_std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Coefficient of variation: std-dev / mean
///
/// Returns 0.0 when the mean is zero (or input is empty) instead of
/// dividing by zero.
pub fn coefficient_of_variation(values: &[f64]) -> f64 {
    let m = mean(values);
    if m == 0.0 {
        return 0.0;
    }
    population_std_dev(values) / m.abs()
}

/// Empirical percentile by sorted-array index lookup (no interpolation)
///
/// `fraction` is in `[0, 1]`; the returned value is
/// `sorted[floor(fraction × n)]`, clamped to the last element.
/// NaN samples are ordered with `total_cmp` so the result is deterministic.
pub fn percentile_index_lookup(values: &[f64], fraction: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let idx = (fraction.clamp(0.0, 1.0) * sorted.len() as f64).floor() as usize;
    sorted[idx.min(sorted.len() - 1)]
}

//! Shared numeric primitives for the calculators.

use super::indicator::Series;

/// Denominators smaller than this in magnitude are treated as zero.
pub const DEGENERATE_EPSILON: f64 = 1e-12;

/// `numerator / denominator`, or `None` when the denominator is zero,
/// near zero, or non-finite, or when the quotient overflows.
///
/// Every calculator routes its divisions through here so a degenerate date
/// becomes undefined instead of NaN or infinity.
pub fn safe_ratio(numerator: f64, denominator: f64) -> Option<f64> {
    if !denominator.is_finite() || denominator.abs() < DEGENERATE_EPSILON {
        return None;
    }
    let ratio = numerator / denominator;
    ratio.is_finite().then_some(ratio)
}

/// `Some(value)` if finite.
pub fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

/// Simple rolling mean over `window` entries ending at each index.
///
/// An entry is defined only when every value in its window is defined.
pub fn rolling_mean(values: &[Option<f64>], window: usize) -> Series {
    let mut result = vec![None; values.len()];
    if window == 0 {
        return result;
    }
    for (i, w) in values.windows(window).enumerate() {
        let sum: Option<f64> = w.iter().copied().sum();
        result[i + window - 1] = sum.map(|s| s / window as f64);
    }
    result
}

/// Sample standard deviation (n - 1 denominator). Needs at least two values.
pub fn sample_std(values: &[f64]) -> Option<f64> {
    let n = values.len();
    if n < 2 {
        return None;
    }
    let mean = values.iter().sum::<f64>() / n as f64;
    let ss: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    finite((ss / (n - 1) as f64).sqrt())
}

/// Mean absolute deviation around the mean.
pub fn mean_abs_dev(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    finite(values.iter().map(|v| (v - mean).abs()).sum::<f64>() / n)
}

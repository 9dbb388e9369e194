//! Exponential Moving Average over a partially defined series.
//!
//! Recursive: EMA[t] = alpha * x[t] + (1 - alpha) * EMA[t-1], alpha = 2/(period+1)
//! Seed: the first defined value itself (EMA[first] = x[first]).
//! Visibility: the recursion runs from the seed, but an entry is reported only
//! once `period` observations have been folded in, i.e. from
//! `first_defined + period - 1`.
//! Used by MACD for both the price EMAs and the signal line.

use super::indicator::Series;

/// Smoothing factor for a span of `period` bars.
pub fn span_alpha(period: usize) -> f64 {
    2.0 / (period as f64 + 1.0)
}

/// Recursive exponential mean with factor `alpha`, seeded at the first
/// defined value and hidden until `min_periods` observations have been seen.
///
/// An undefined value after the seed leaves the remainder undefined.
pub fn ewm_of_series(values: &[Option<f64>], alpha: f64, min_periods: usize) -> Series {
    let n = values.len();
    let mut result = vec![None; n];

    let Some(start) = values.iter().position(Option::is_some) else {
        return result;
    };

    let mut prev: Option<f64> = None;
    for (seen, i) in (start..n).enumerate() {
        let Some(x) = values[i] else {
            return result;
        };
        let ema = match prev {
            Some(p) => alpha * x + (1.0 - alpha) * p,
            None => x,
        };
        prev = Some(ema);
        if seen + 1 >= min_periods {
            result[i] = Some(ema);
        }
    }

    result
}

/// EMA of `values`, skipping a leading undefined prefix.
pub fn ema_of_series(values: &[Option<f64>], period: usize) -> Series {
    if period == 0 {
        return vec![None; values.len()];
    }
    ewm_of_series(values, span_alpha(period), period)
}

/// EMA of a fully defined slice.
pub fn ema_of_values(values: &[f64], period: usize) -> Series {
    let wrapped: Vec<Option<f64>> = values.iter().copied().map(Some).collect();
    ema_of_series(&wrapped, period)
}

//! Indicator calculators and the library that runs them.
//!
//! Every calculator implements `Indicator`: a full bar slice in, one
//! `Option<f64>` per bar out. They share the numeric primitives in `math`,
//! in particular `safe_ratio`, so degenerate divisions become undefined
//! dates rather than NaN.

pub mod cci;
pub mod dmi;
pub mod ema;
pub mod indicator;
pub mod library;
pub mod macd;
pub mod math;
pub mod momentum;
pub mod params;
pub mod projection;
pub mod rsi;
pub mod stochastic;
pub mod volatility;

pub use cci::Cci;
pub use dmi::Dmi;
pub use indicator::{Indicator, IndicatorSet, Series};
pub use library::IndicatorLibrary;
pub use macd::Macd;
pub use math::safe_ratio;
pub use momentum::Momentum;
pub use params::IndicatorParams;
pub use projection::ProjectionOscillator;
pub use rsi::Rsi;
pub use stochastic::Stochastic;
pub use volatility::Volatility;

/// Create synthetic bars from close prices for testing.
///
/// open = prev_close (or close for the first bar),
/// high = max(open, close) + 1.0, low = min(open, close) - 1.0.
#[cfg(test)]
pub fn make_bars(closes: &[f64]) -> Vec<crate::domain::Bar> {
    use crate::domain::Bar;
    let base_date = chrono::NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            Bar::new(
                base_date + chrono::Duration::days(i as i64),
                open,
                open.max(close) + 1.0,
                open.min(close) - 1.0,
                close,
            )
            .with_volume(1000)
        })
        .collect()
}

/// Create bars from explicit (open, high, low, close) tuples.
#[cfg(test)]
pub fn make_ohlc_bars(data: &[(f64, f64, f64, f64)]) -> Vec<crate::domain::Bar> {
    use crate::domain::Bar;
    let base_date = chrono::NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    data.iter()
        .enumerate()
        .map(|(i, &(open, high, low, close))| {
            Bar::new(base_date + chrono::Duration::days(i as i64), open, high, low, close)
        })
        .collect()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;

//! Stochastic oscillator (%K).
//!
//! %K[t] = 100 * (close[t] - lowest_low) / (highest_high - lowest_low)
//! over the `window` bars ending at t.
//! Lookback: window.
//! A zero high-low range is a degenerate division → undefined.

use super::indicator::{Indicator, Series};
use super::math::safe_ratio;
use crate::domain::{Bar, IndicatorKind};

#[derive(Debug, Clone)]
pub struct Stochastic {
    window: usize,
}

impl Stochastic {
    pub fn new(window: usize) -> Self {
        assert!(window >= 1, "Stochastic window must be >= 1");
        Self { window }
    }
}

impl Indicator for Stochastic {
    fn kind(&self) -> IndicatorKind {
        IndicatorKind::Stochastic
    }

    fn lookback(&self) -> usize {
        self.window
    }

    fn compute(&self, bars: &[Bar]) -> Series {
        let n = bars.len();
        let mut result = vec![None; n];

        for i in self.window..n {
            let window = &bars[(i + 1 - self.window)..=i];
            let highest = window.iter().map(|b| b.high).fold(f64::NEG_INFINITY, f64::max);
            let lowest = window.iter().map(|b| b.low).fold(f64::INFINITY, f64::min);
            result[i] = safe_ratio(bars[i].close - lowest, highest - lowest).map(|r| 100.0 * r);
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_ohlc_bars, DEFAULT_EPSILON};

    #[test]
    fn stochastic_known_values() {
        let bars = make_ohlc_bars(&[
            (10.0, 12.0, 9.0, 11.0),
            (11.0, 13.0, 10.0, 12.0),
            (12.0, 14.0, 11.0, 13.0),
            (13.0, 13.5, 8.0, 9.0),
        ]);
        let result = Stochastic::new(3).compute(&bars);

        assert_eq!(&result[..3], &[None, None, None]);
        // Window bars 1..=3: high 14, low 8, close 9 → 100 * 1/6
        assert_approx(result[3].unwrap(), 100.0 / 6.0, DEFAULT_EPSILON);
    }

    #[test]
    fn stochastic_close_at_high_is_100() {
        let bars = make_ohlc_bars(&[
            (10.0, 11.0, 9.0, 10.0),
            (10.0, 12.0, 9.5, 11.0),
            (11.0, 13.0, 10.0, 13.0),
        ]);
        let result = Stochastic::new(2).compute(&bars);
        assert_approx(result[2].unwrap(), 100.0, DEFAULT_EPSILON);
    }

    #[test]
    fn stochastic_flat_range_is_undefined() {
        let bars = make_ohlc_bars(&[(5.0, 5.0, 5.0, 5.0); 4]);
        let result = Stochastic::new(2).compute(&bars);
        assert!(result.iter().all(Option::is_none));
    }

    #[test]
    fn stochastic_bounds() {
        let bars = crate::indicators::make_bars(&[100.0, 105.0, 98.0, 110.0, 95.0, 115.0, 90.0]);
        let result = Stochastic::new(3).compute(&bars);
        for v in result.iter().flatten() {
            assert!((0.0..=100.0).contains(v));
        }
    }

    #[test]
    fn stochastic_lookback() {
        assert_eq!(Stochastic::new(14).lookback(), 14);
    }
}

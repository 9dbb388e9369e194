//! Momentum as percentage rate of change.
//!
//! momentum[t] = (close[t] - close[t-window]) / close[t-window] * 100
//! Lookback: window.

use super::indicator::{Indicator, Series};
use super::math::safe_ratio;
use crate::domain::{Bar, IndicatorKind};

#[derive(Debug, Clone)]
pub struct Momentum {
    window: usize,
}

impl Momentum {
    pub fn new(window: usize) -> Self {
        assert!(window >= 1, "Momentum window must be >= 1");
        Self { window }
    }
}

impl Indicator for Momentum {
    fn kind(&self) -> IndicatorKind {
        IndicatorKind::Momentum
    }

    fn lookback(&self) -> usize {
        self.window
    }

    fn compute(&self, bars: &[Bar]) -> Series {
        let n = bars.len();
        let mut result = vec![None; n];

        for i in self.window..n {
            let prev = bars[i - self.window].close;
            let curr = bars[i].close;
            result[i] = safe_ratio(curr - prev, prev).map(|r| r * 100.0);
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_bars, DEFAULT_EPSILON};

    #[test]
    fn momentum_period_1() {
        let bars = make_bars(&[100.0, 110.0, 121.0]);
        let result = Momentum::new(1).compute(&bars);

        assert_eq!(result[0], None);
        assert_approx(result[1].unwrap(), 10.0, DEFAULT_EPSILON);
        assert_approx(result[2].unwrap(), 10.0, DEFAULT_EPSILON);
    }

    #[test]
    fn momentum_period_2() {
        let bars = make_bars(&[100.0, 110.0, 121.0]);
        let result = Momentum::new(2).compute(&bars);

        assert_eq!(&result[..2], &[None, None]);
        assert_approx(result[2].unwrap(), 21.0, DEFAULT_EPSILON);
    }

    #[test]
    fn momentum_negative() {
        let bars = make_bars(&[100.0, 90.0]);
        let result = Momentum::new(1).compute(&bars);
        assert_approx(result[1].unwrap(), -10.0, DEFAULT_EPSILON);
    }

    #[test]
    fn momentum_zero_base_is_undefined() {
        let bars = make_bars(&[0.0, 5.0]);
        let result = Momentum::new(1).compute(&bars);
        assert_eq!(result[1], None);
    }

    #[test]
    fn momentum_lookback() {
        assert_eq!(Momentum::new(5).lookback(), 5);
    }
}

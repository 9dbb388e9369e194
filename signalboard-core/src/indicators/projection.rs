//! Projection oscillator: deviation of the close from its short-term trend.
//!
//! For each bar t >= period, the `period` closes before t are fit by least
//! squares against x = 0..period-1 and extrapolated to x = period:
//!
//! forecast = intercept + slope * period
//! osc[t]   = clamp(100 * (close[t] - forecast) / forecast, -100, 100)
//!
//! Slope and intercept come from the closed-form window sums, so each date
//! costs one pass over its window and no solver state carries between dates.
//! Lookback: period. A (near-)zero forecast → undefined.

use super::indicator::{Indicator, Series};
use super::math::safe_ratio;
use crate::domain::{Bar, IndicatorKind};

/// Output bound on both sides.
pub const PROJECTION_CLAMP: f64 = 100.0;

#[derive(Debug, Clone)]
pub struct ProjectionOscillator {
    period: usize,
}

impl ProjectionOscillator {
    pub fn new(period: usize) -> Self {
        assert!(period >= 2, "Projection oscillator period must be >= 2");
        Self { period }
    }
}

/// Least-squares line through `ys` at x = 0..len-1, evaluated at x = len.
pub fn linear_forecast(ys: &[f64]) -> Option<f64> {
    let p = ys.len() as f64;
    let sum_x = p * (p - 1.0) / 2.0;
    let sum_xx = (p - 1.0) * p * (2.0 * p - 1.0) / 6.0;
    let (sum_y, sum_xy) = ys
        .iter()
        .enumerate()
        .fold((0.0, 0.0), |(sy, sxy), (x, &y)| (sy + y, sxy + x as f64 * y));

    let slope = safe_ratio(p * sum_xy - sum_x * sum_y, p * sum_xx - sum_x * sum_x)?;
    let intercept = (sum_y - slope * sum_x) / p;
    Some(intercept + slope * p)
}

impl Indicator for ProjectionOscillator {
    fn kind(&self) -> IndicatorKind {
        IndicatorKind::ProjOsc
    }

    fn lookback(&self) -> usize {
        self.period
    }

    fn compute(&self, bars: &[Bar]) -> Series {
        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        let mut result = vec![None; closes.len()];

        for (offset, window) in closes.windows(self.period).enumerate() {
            let t = offset + self.period;
            let Some(&close) = closes.get(t) else {
                break;
            };
            result[t] = linear_forecast(window)
                .and_then(|forecast| safe_ratio(close - forecast, forecast))
                .map(|r| (100.0 * r).clamp(-PROJECTION_CLAMP, PROJECTION_CLAMP));
        }

        result
    }
}

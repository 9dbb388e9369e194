//! Relative Strength Index (RSI).
//!
//! Uses Wilder smoothing (alpha = 1/window) of gains and losses. The first
//! bar has no change and contributes a gain and loss of 0, which seeds both
//! averages; every later change folds into them recursively.
//! RSI = 100 - 100 / (1 + avg_gain / avg_loss)
//! Lookback: window.
//! Edge cases: avg_loss == 0 → RSI = 100; avg_gain == 0 → RSI = 0; both → 50.

use super::indicator::{Indicator, Series};
use super::math::safe_ratio;
use crate::domain::{Bar, IndicatorKind};

#[derive(Debug, Clone)]
pub struct Rsi {
    window: usize,
}

impl Rsi {
    pub fn new(window: usize) -> Self {
        assert!(window >= 1, "RSI window must be >= 1");
        Self { window }
    }
}

impl Indicator for Rsi {
    fn kind(&self) -> IndicatorKind {
        IndicatorKind::Rsi
    }

    fn lookback(&self) -> usize {
        self.window
    }

    fn compute(&self, bars: &[Bar]) -> Series {
        let n = bars.len();
        let mut result = vec![None; n];

        let alpha = 1.0 / self.window as f64;
        let (mut avg_gain, mut avg_loss) = (0.0, 0.0);
        for (i, w) in bars.windows(2).enumerate() {
            let ch = w[1].close - w[0].close;
            avg_gain = alpha * ch.max(0.0) + (1.0 - alpha) * avg_gain;
            avg_loss = alpha * (-ch).max(0.0) + (1.0 - alpha) * avg_loss;
            if i + 1 >= self.window {
                result[i + 1] = Some(compute_rsi(avg_gain, avg_loss));
            }
        }

        result
    }
}

fn compute_rsi(avg_gain: f64, avg_loss: f64) -> f64 {
    match safe_ratio(avg_gain, avg_loss) {
        Some(rs) => 100.0 - 100.0 / (1.0 + rs),
        None if avg_gain > 0.0 => 100.0,
        None => 50.0, // no movement
    }
}

//! Commodity Channel Index (CCI).
//!
//! tp = (high + low + close) / 3
//! CCI[t] = (tp[t] - mean(tp)) / (0.015 * mean_abs_dev(tp)) over `window` bars ending at t.
//! Lookback: window. Zero deviation → undefined.

use super::indicator::{Indicator, Series};
use super::math::{mean_abs_dev, safe_ratio};
use crate::domain::{Bar, IndicatorKind};

/// Lambert's constant: scales CCI so most readings fall within ±100.
const CCI_SCALE: f64 = 0.015;

#[derive(Debug, Clone)]
pub struct Cci {
    window: usize,
}

impl Cci {
    pub fn new(window: usize) -> Self {
        assert!(window >= 1, "CCI window must be >= 1");
        Self { window }
    }
}

impl Indicator for Cci {
    fn kind(&self) -> IndicatorKind {
        IndicatorKind::Cci
    }

    fn lookback(&self) -> usize {
        self.window
    }

    fn compute(&self, bars: &[Bar]) -> Series {
        let n = bars.len();
        let mut result = vec![None; n];
        let tp: Vec<f64> = bars.iter().map(Bar::typical_price).collect();

        for i in self.window..n {
            let window = &tp[(i + 1 - self.window)..=i];
            let mean = window.iter().sum::<f64>() / self.window as f64;
            result[i] = mean_abs_dev(window)
                .and_then(|dev| safe_ratio(tp[i] - mean, CCI_SCALE * dev));
        }

        result
    }
}

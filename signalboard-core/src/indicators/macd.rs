//! MACD histogram.
//!
//! macd_line = EMA(close, fast) - EMA(close, slow)
//! signal    = EMA(macd_line, signal)
//! output    = macd_line - signal
//! Every EMA is seeded at its first input and reported once `period` inputs
//! have been seen, so the line is defined from slow-1 and the signal line
//! from slow + signal - 2.
//! Lookback: slow + signal - 2.

use super::ema::{ema_of_series, ema_of_values};
use super::indicator::{Indicator, Series};
use crate::domain::{Bar, IndicatorKind};

#[derive(Debug, Clone)]
pub struct Macd {
    fast: usize,
    slow: usize,
    signal: usize,
}

impl Macd {
    pub fn new(fast: usize, slow: usize, signal: usize) -> Self {
        assert!(fast >= 1 && signal >= 1, "MACD periods must be >= 1");
        assert!(fast < slow, "MACD fast period must be shorter than slow period");
        Self { fast, slow, signal }
    }
}

impl Indicator for Macd {
    fn kind(&self) -> IndicatorKind {
        IndicatorKind::Macd
    }

    fn lookback(&self) -> usize {
        self.slow + self.signal - 2
    }

    fn compute(&self, bars: &[Bar]) -> Series {
        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        let fast = ema_of_values(&closes, self.fast);
        let slow = ema_of_values(&closes, self.slow);

        let line: Series = fast
            .iter()
            .zip(&slow)
            .map(|(f, s)| Some((*f)? - (*s)?))
            .collect();
        let signal = ema_of_series(&line, self.signal);

        line.iter()
            .zip(&signal)
            .map(|(m, s)| Some((*m)? - (*s)?))
            .collect()
    }
}

//! Annualized historical volatility.
//!
//! r[t] = ln(close[t] / close[t-1])
//! vol[t] = sample_std(r[t-window+1..=t]) * sqrt(252) * 100
//! Lookback: window (r[0] does not exist).

use super::indicator::{Indicator, Series};
use super::math::{finite, safe_ratio, sample_std};
use crate::domain::{Bar, IndicatorKind};

/// Trading days per year used for annualization.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

#[derive(Debug, Clone)]
pub struct Volatility {
    window: usize,
}

impl Volatility {
    pub fn new(window: usize) -> Self {
        assert!(window >= 2, "Volatility window must be >= 2");
        Self { window }
    }
}

/// Daily log-returns aligned to the bars; entry 0 and non-positive price
/// ratios are undefined.
pub fn log_returns(bars: &[Bar]) -> Series {
    let mut returns = vec![None; bars.len()];
    for (i, w) in bars.windows(2).enumerate() {
        returns[i + 1] = safe_ratio(w[1].close, w[0].close)
            .filter(|ratio| *ratio > 0.0)
            .and_then(|ratio| finite(ratio.ln()));
    }
    returns
}

impl Indicator for Volatility {
    fn kind(&self) -> IndicatorKind {
        IndicatorKind::Volatility
    }

    fn lookback(&self) -> usize {
        self.window
    }

    fn compute(&self, bars: &[Bar]) -> Series {
        let n = bars.len();
        let mut result = vec![None; n];
        let returns = log_returns(bars);
        let annualize = TRADING_DAYS_PER_YEAR.sqrt() * 100.0;

        for i in self.window..n {
            let window: Option<Vec<f64>> = returns[(i + 1 - self.window)..=i].iter().copied().collect();
            result[i] = window
                .as_deref()
                .and_then(sample_std)
                .map(|sd| sd * annualize);
        }

        result
    }
}

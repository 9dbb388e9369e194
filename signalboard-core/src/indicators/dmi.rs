//! DMI: directional movement trend strength (ADX family).
//!
//! Steps:
//! 1. +DM = max(high[t] - high[t-1], 0), -DM = max(low[t-1] - low[t], 0)
//! 2. TR = max(high-low, |high-prev_close|, |low-prev_close|)
//! 3. ATR, +DM and -DM smoothed with a simple rolling mean over `window`
//! 4. +DI = 100 * smoothed(+DM) / ATR, -DI = 100 * smoothed(-DM) / ATR
//! 5. DX = 100 * |+DI - -DI| / (+DI + -DI)
//! 6. DMI = rolling mean of DX over `window`
//!
//! This is not Wilder's ADX: both smoothing stages are plain rolling means
//! and +DM/-DM are floored independently rather than competing for the bar.
//! Values therefore react faster than textbook ADX and are not comparable
//! with charting packages.
//!
//! Lookback: 2 * window - 1 (window bars of movement for DI, then window DX
//! values). A zero ATR or a zero DI sum makes that date's DX undefined, and
//! any undefined DX inside a window leaves that DMI undefined.

use super::indicator::{Indicator, Series};
use super::math::{rolling_mean, safe_ratio};
use crate::domain::{Bar, IndicatorKind};

#[derive(Debug, Clone)]
pub struct Dmi {
    window: usize,
}

impl Dmi {
    pub fn new(window: usize) -> Self {
        assert!(window >= 1, "DMI window must be >= 1");
        Self { window }
    }
}

/// True Range per bar. TR[0] is undefined (no previous close).
/// TR[t] = max(high[t]-low[t], |high[t]-close[t-1]|, |low[t]-close[t-1]|).
pub fn true_range(bars: &[Bar]) -> Series {
    let mut tr = vec![None; bars.len()];
    for (i, w) in bars.windows(2).enumerate() {
        let (prev, bar) = (&w[0], &w[1]);
        let h = bar.high;
        let l = bar.low;
        let pc = prev.close;
        tr[i + 1] = Some((h - l).max((h - pc).abs()).max((l - pc).abs()));
    }
    tr
}

/// +DM and -DM per bar, each floored at zero. Entry 0 is undefined.
pub fn directional_movement(bars: &[Bar]) -> (Series, Series) {
    let n = bars.len();
    let mut plus_dm = vec![None; n];
    let mut minus_dm = vec![None; n];
    for (i, w) in bars.windows(2).enumerate() {
        plus_dm[i + 1] = Some((w[1].high - w[0].high).max(0.0));
        minus_dm[i + 1] = Some((w[0].low - w[1].low).max(0.0));
    }
    (plus_dm, minus_dm)
}

/// Directional index for one date from smoothed movement and range.
fn directional_index(atr: f64, plus: f64, minus: f64) -> Option<f64> {
    let plus_di = 100.0 * safe_ratio(plus, atr)?;
    let minus_di = 100.0 * safe_ratio(minus, atr)?;
    safe_ratio((plus_di - minus_di).abs(), plus_di + minus_di).map(|r| 100.0 * r)
}

impl Indicator for Dmi {
    fn kind(&self) -> IndicatorKind {
        IndicatorKind::Dmi
    }

    fn lookback(&self) -> usize {
        2 * self.window - 1
    }

    fn compute(&self, bars: &[Bar]) -> Series {
        let tr = true_range(bars);
        let (plus_dm, minus_dm) = directional_movement(bars);

        let atr = rolling_mean(&tr, self.window);
        let smooth_plus = rolling_mean(&plus_dm, self.window);
        let smooth_minus = rolling_mean(&minus_dm, self.window);

        let dx: Series = atr
            .iter()
            .zip(&smooth_plus)
            .zip(&smooth_minus)
            .map(|((a, p), m)| directional_index((*a)?, (*p)?, (*m)?))
            .collect();

        rolling_mean(&dx, self.window)
    }
}

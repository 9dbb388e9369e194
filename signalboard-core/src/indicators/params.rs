//! Indicator windows and periods.

use serde::{Deserialize, Serialize};

use crate::error::PipelineError;

/// Windows and periods for the eight calculators.
///
/// `Default` is the reference board: RSI 14, Stochastic 14, Momentum 5,
/// MACD 12/26/9, CCI 20, Volatility 10, ProjOsc 14, DMI 14. Missing TOML
/// keys fall back to these values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IndicatorParams {
    pub rsi_window: usize,
    pub stochastic_window: usize,
    pub momentum_window: usize,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
    pub cci_window: usize,
    pub volatility_window: usize,
    pub proj_osc_period: usize,
    pub dmi_window: usize,
}

impl Default for IndicatorParams {
    fn default() -> Self {
        Self {
            rsi_window: 14,
            stochastic_window: 14,
            momentum_window: 5,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            cci_window: 20,
            volatility_window: 10,
            proj_osc_period: 14,
            dmi_window: 14,
        }
    }
}

impl IndicatorParams {
    /// Check every window against its calculator's minimum.
    pub fn validate(&self) -> Result<(), PipelineError> {
        let at_least = |name: &str, value: usize, min: usize| {
            if value < min {
                Err(PipelineError::InvalidParams(format!(
                    "{name} must be >= {min}, got {value}"
                )))
            } else {
                Ok(())
            }
        };

        at_least("rsi_window", self.rsi_window, 1)?;
        at_least("stochastic_window", self.stochastic_window, 1)?;
        at_least("momentum_window", self.momentum_window, 1)?;
        at_least("macd_fast", self.macd_fast, 1)?;
        at_least("macd_signal", self.macd_signal, 1)?;
        at_least("cci_window", self.cci_window, 1)?;
        at_least("volatility_window", self.volatility_window, 2)?;
        at_least("proj_osc_period", self.proj_osc_period, 2)?;
        at_least("dmi_window", self.dmi_window, 1)?;

        if self.macd_fast >= self.macd_slow {
            return Err(PipelineError::InvalidParams(format!(
                "macd_fast ({}) must be shorter than macd_slow ({})",
                self.macd_fast, self.macd_slow
            )));
        }
        Ok(())
    }
}

//! The fixed set of indicators on the board.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the eight indicator columns.
///
/// Declaration order is the output column order; `Ord` follows it, so any
/// `BTreeMap<IndicatorKind, _>` iterates in column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum IndicatorKind {
    #[serde(rename = "RSI")]
    Rsi,
    #[serde(rename = "Stochastic")]
    Stochastic,
    #[serde(rename = "ProjOsc")]
    ProjOsc,
    #[serde(rename = "Volatility")]
    Volatility,
    #[serde(rename = "Momentum")]
    Momentum,
    #[serde(rename = "MACD")]
    Macd,
    #[serde(rename = "DMI")]
    Dmi,
    #[serde(rename = "CCI")]
    Cci,
}

impl IndicatorKind {
    pub const ALL: [IndicatorKind; 8] = [
        IndicatorKind::Rsi,
        IndicatorKind::Stochastic,
        IndicatorKind::ProjOsc,
        IndicatorKind::Volatility,
        IndicatorKind::Momentum,
        IndicatorKind::Macd,
        IndicatorKind::Dmi,
        IndicatorKind::Cci,
    ];

    /// Column label.
    pub fn label(self) -> &'static str {
        match self {
            IndicatorKind::Rsi => "RSI",
            IndicatorKind::Stochastic => "Stochastic",
            IndicatorKind::ProjOsc => "ProjOsc",
            IndicatorKind::Volatility => "Volatility",
            IndicatorKind::Momentum => "Momentum",
            IndicatorKind::Macd => "MACD",
            IndicatorKind::Dmi => "DMI",
            IndicatorKind::Cci => "CCI",
        }
    }
}

impl fmt::Display for IndicatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for IndicatorKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        IndicatorKind::ALL
            .into_iter()
            .find(|k| k.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown indicator '{s}'"))
    }
}

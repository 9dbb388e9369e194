//! Categorical signals and the per-day output row.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::kind::IndicatorKind;

/// Direction of one indicator's day-over-day change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Signal {
    Long,
    Short,
    Neutral,
}

impl Signal {
    pub fn label(self) -> &'static str {
        match self {
            Signal::Long => "Long",
            Signal::Short => "Short",
            Signal::Neutral => "Neutral",
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Majority-vote call across all indicators for one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OverallSignal {
    Long,
    Short,
    Neutral,
}

impl OverallSignal {
    /// Chart encoding: LONG = 1, NEUTRAL = 0, SHORT = -1.
    pub fn score(self) -> i8 {
        match self {
            OverallSignal::Long => 1,
            OverallSignal::Neutral => 0,
            OverallSignal::Short => -1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            OverallSignal::Long => "LONG",
            OverallSignal::Short => "SHORT",
            OverallSignal::Neutral => "NEUTRAL",
        }
    }
}

impl fmt::Display for OverallSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One output row: every indicator's signal for a date plus the overall call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalRow {
    pub date: NaiveDate,
    pub signals: BTreeMap<IndicatorKind, Signal>,
    pub overall: OverallSignal,
    pub score: i8,
}

impl SignalRow {
    /// Signal for one indicator; a missing column reads as Neutral.
    pub fn signal(&self, kind: IndicatorKind) -> Signal {
        self.signals.get(&kind).copied().unwrap_or(Signal::Neutral)
    }

    pub fn count(&self, signal: Signal) -> usize {
        self.signals.values().filter(|s| **s == signal).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_encoding() {
        assert_eq!(OverallSignal::Long.score(), 1);
        assert_eq!(OverallSignal::Neutral.score(), 0);
        assert_eq!(OverallSignal::Short.score(), -1);
    }

    #[test]
    fn overall_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&OverallSignal::Short).unwrap(), "\"SHORT\"");
        assert_eq!(serde_json::to_string(&Signal::Short).unwrap(), "\"Short\"");
    }

    #[test]
    fn row_counts_and_missing_columns() {
        let mut signals = BTreeMap::new();
        signals.insert(IndicatorKind::Rsi, Signal::Long);
        signals.insert(IndicatorKind::Cci, Signal::Long);
        signals.insert(IndicatorKind::Dmi, Signal::Short);
        let row = SignalRow {
            date: NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(),
            signals,
            overall: OverallSignal::Long,
            score: 1,
        };
        assert_eq!(row.count(Signal::Long), 2);
        assert_eq!(row.count(Signal::Short), 1);
        assert_eq!(row.signal(IndicatorKind::Macd), Signal::Neutral);
    }
}

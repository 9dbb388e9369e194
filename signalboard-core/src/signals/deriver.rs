//! Day-over-day signal derivation.
//!
//! One lag-1 rule is applied identically to every indicator column: the
//! signal is the direction in which the indicator moved since yesterday,
//! not where its level sits.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::domain::{IndicatorKind, Signal};
use crate::indicators::IndicatorSet;

/// Classifies one indicator's move between two consecutive dates.
pub trait SignalRule: Send + Sync {
    fn classify(&self, today: Option<f64>, yesterday: Option<f64>) -> Signal;
}

/// Rising → Long, falling → Short, unchanged or undefined → Neutral.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirectionOfChange;

impl SignalRule for DirectionOfChange {
    fn classify(&self, today: Option<f64>, yesterday: Option<f64>) -> Signal {
        let (Some(today), Some(yesterday)) = (today, yesterday) else {
            return Signal::Neutral;
        };
        match today.partial_cmp(&yesterday) {
            Some(Ordering::Greater) => Signal::Long,
            Some(Ordering::Less) => Signal::Short,
            _ => Signal::Neutral,
        }
    }
}

/// Every indicator's signal for one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailySignals {
    pub date: NaiveDate,
    pub signals: BTreeMap<IndicatorKind, Signal>,
}

/// Applies a `SignalRule` across all columns of an `IndicatorSet`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SignalDeriver<R = DirectionOfChange> {
    rule: R,
}

impl SignalDeriver {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<R: SignalRule> SignalDeriver<R> {
    pub fn with_rule(rule: R) -> Self {
        Self { rule }
    }

    /// One entry per date from the second onward; the first date has no
    /// yesterday and never produces an entry.
    pub fn derive(&self, set: &IndicatorSet) -> Vec<DailySignals> {
        set.dates()
            .iter()
            .enumerate()
            .skip(1)
            .map(|(i, &date)| DailySignals {
                date,
                signals: set
                    .iter()
                    .map(|(kind, values)| (kind, self.rule.classify(values[i], values[i - 1])))
                    .collect(),
            })
            .collect()
    }
}

/// Derive with the default direction-of-change rule.
pub fn derive(set: &IndicatorSet) -> Vec<DailySignals> {
    SignalDeriver::new().derive(set)
}

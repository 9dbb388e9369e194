//! Majority-vote aggregation into the overall call.

use crate::domain::{OverallSignal, Signal, SignalRow};

use super::deriver::DailySignals;

/// Long and Short counts for one date. Neutral abstains.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Vote {
    pub long: usize,
    pub short: usize,
}

impl Vote {
    pub fn tally<I>(signals: I) -> Self
    where
        I: IntoIterator<Item = Signal>,
    {
        signals.into_iter().fold(Vote::default(), |mut vote, s| {
            match s {
                Signal::Long => vote.long += 1,
                Signal::Short => vote.short += 1,
                Signal::Neutral => {}
            }
            vote
        })
    }

    /// Strict majority; ties (including 0–0) are NEUTRAL.
    pub fn overall(&self) -> OverallSignal {
        match self.long.cmp(&self.short) {
            std::cmp::Ordering::Greater => OverallSignal::Long,
            std::cmp::Ordering::Less => OverallSignal::Short,
            std::cmp::Ordering::Equal => OverallSignal::Neutral,
        }
    }
}

/// Turns per-date signal maps into output rows.
pub struct SignalAggregator;

impl SignalAggregator {
    pub fn aggregate(days: &[DailySignals]) -> Vec<SignalRow> {
        days.iter().map(Self::row).collect()
    }

    fn row(day: &DailySignals) -> SignalRow {
        let overall = Vote::tally(day.signals.values().copied()).overall();
        SignalRow {
            date: day.date,
            signals: day.signals.clone(),
            overall,
            score: overall.score(),
        }
    }
}

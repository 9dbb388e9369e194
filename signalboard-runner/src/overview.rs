//! Market overview: the latest call for every instrument on the board.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use signalboard_core::domain::{OverallSignal, Signal};

use crate::runner::BoardReport;

/// One instrument's most recent row, condensed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OverviewEntry {
    pub name: String,
    pub symbol: String,
    pub date: NaiveDate,
    pub overall: OverallSignal,
    pub score: i8,
    /// Indicators voting Long on that date.
    pub long_votes: usize,
    /// Indicators voting Short on that date.
    pub short_votes: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MarketOverview {
    pub entries: Vec<OverviewEntry>,
    /// Symbols that loaded but have fewer than two bars, so no signal yet.
    pub pending: Vec<String>,
    pub long: usize,
    pub short: usize,
    pub neutral: usize,
}

impl MarketOverview {
    pub fn from_report(report: &BoardReport) -> Self {
        let mut overview = MarketOverview::default();
        for instrument in &report.instruments {
            let Some(row) = instrument.latest() else {
                overview.pending.push(instrument.symbol.clone());
                continue;
            };
            match row.overall {
                OverallSignal::Long => overview.long += 1,
                OverallSignal::Short => overview.short += 1,
                OverallSignal::Neutral => overview.neutral += 1,
            }
            overview.entries.push(OverviewEntry {
                name: instrument.name.clone(),
                symbol: instrument.symbol.clone(),
                date: row.date,
                overall: row.overall,
                score: row.score,
                long_votes: row.count(Signal::Long),
                short_votes: row.count(Signal::Short),
            });
        }
        overview
    }

    /// Sum of the latest scores across instruments.
    pub fn net_score(&self) -> i32 {
        self.entries.iter().map(|e| i32::from(e.score)).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::{InstrumentReport, SCHEMA_VERSION};
    use signalboard_core::domain::{DatasetHash, IndicatorKind, SignalRow};
    use signalboard_core::indicators::IndicatorParams;
    use signalboard_core::signals::SignalTable;

    fn report_with(symbol: &str, overalls: &[OverallSignal]) -> InstrumentReport {
        let base = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        let rows = overalls
            .iter()
            .enumerate()
            .map(|(i, &overall)| {
                let signal = match overall {
                    OverallSignal::Long => Signal::Long,
                    OverallSignal::Short => Signal::Short,
                    OverallSignal::Neutral => Signal::Neutral,
                };
                SignalRow {
                    date: base + chrono::Duration::days(i as i64),
                    signals: IndicatorKind::ALL.into_iter().map(|k| (k, signal)).collect(),
                    overall,
                    score: overall.score(),
                }
            })
            .collect();
        let table = SignalTable::new(rows);
        InstrumentReport {
            name: format!("{symbol} name"),
            symbol: symbol.to_string(),
            source: format!("{symbol}.csv"),
            dataset_hash: DatasetHash::from_hash("00"),
            table_hash: table.fingerprint(),
            first_date: Some(base),
            last_date: Some(base),
            bar_count: overalls.len() + 1,
            dropped_rows: 0,
            table,
        }
    }

    fn board(instruments: Vec<InstrumentReport>) -> BoardReport {
        BoardReport {
            schema_version: SCHEMA_VERSION,
            params: IndicatorParams::default(),
            lookback_days: None,
            instruments,
            failures: vec![],
        }
    }

    #[test]
    fn takes_latest_row_per_instrument() {
        let overview = board(vec![
            report_with("ES=F", &[OverallSignal::Short, OverallSignal::Long]),
            report_with("NQ=F", &[OverallSignal::Long, OverallSignal::Short]),
            report_with("CL=F", &[OverallSignal::Neutral]),
        ])
        .overview();

        assert_eq!(overview.len(), 3);
        assert_eq!(overview.entries[0].overall, OverallSignal::Long);
        assert_eq!(overview.entries[0].long_votes, 8);
        assert_eq!(overview.entries[1].short_votes, 8);
        assert_eq!((overview.long, overview.short, overview.neutral), (1, 1, 1));
        assert_eq!(overview.net_score(), 0);
    }

    #[test]
    fn instruments_without_rows_are_pending() {
        let overview = board(vec![report_with("GC=F", &[])]).overview();
        assert!(overview.is_empty());
        assert_eq!(overview.pending, vec!["GC=F".to_string()]);
    }
}

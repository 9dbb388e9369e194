//! SignalTable: the ordered output handed to presentation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{IndicatorKind, OverallSignal, SignalRow, TableHash};

/// Header of the overall column.
pub const OVERALL_COLUMN: &str = "Overall Signal";

/// Date-ascending signal rows, one per date from the second bar onward.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalTable {
    rows: Vec<SignalRow>,
}

impl SignalTable {
    pub fn new(rows: Vec<SignalRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[SignalRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Most recent row.
    pub fn latest(&self) -> Option<&SignalRow> {
        self.rows.last()
    }

    /// Rows newest first, the order the board displays.
    pub fn newest_first(&self) -> impl Iterator<Item = &SignalRow> {
        self.rows.iter().rev()
    }

    /// Column headers: `Date`, `Overall Signal`, then each indicator.
    pub fn columns() -> Vec<&'static str> {
        let mut columns = vec!["Date", OVERALL_COLUMN];
        columns.extend(IndicatorKind::ALL.iter().map(|k| k.label()));
        columns
    }

    /// (date, score) pairs for the overall-signal chart.
    pub fn scores(&self) -> Vec<(NaiveDate, i8)> {
        self.rows.iter().map(|r| (r.date, r.score)).collect()
    }

    /// Number of rows with the given overall call.
    pub fn count_overall(&self, overall: OverallSignal) -> usize {
        self.rows.iter().filter(|r| r.overall == overall).count()
    }

    /// BLAKE3 over every row; identical tables hash identically.
    pub fn fingerprint(&self) -> TableHash {
        crate::fingerprint::table_hash(self)
    }

    pub fn into_rows(self) -> Vec<SignalRow> {
        self.rows
    }
}

//! Indicator trait and the computed indicator set.
//!
//! Indicators are pure functions: bar history in, one aligned value per bar
//! out. Warm-up and degenerate dates are `None`; a `Some` value is always
//! finite, so comparisons downstream never meet a NaN.

use chrono::NaiveDate;
use std::collections::BTreeMap;

use crate::domain::{Bar, IndicatorKind};
use crate::error::PipelineError;

/// One value per bar; `None` marks an undefined date.
pub type Series = Vec<Option<f64>>;

/// Trait for the board's indicator calculators.
///
/// # Look-ahead guard
/// No value at bar t may depend on bars after t. Truncating the input to
/// `bars[..=t]` must reproduce the value at t exactly.
pub trait Indicator: Send + Sync {
    /// Which board column this calculator fills.
    fn kind(&self) -> IndicatorKind;

    /// Number of leading bars that are always undefined.
    fn lookback(&self) -> usize;

    /// Compute the indicator over the whole bar slice.
    ///
    /// Returns exactly `bars.len()` entries; the first `lookback()` are `None`.
    fn compute(&self, bars: &[Bar]) -> Series;
}

/// Indicator columns aligned to the price series' date axis.
///
/// Columns iterate in board order (`IndicatorKind` declaration order).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndicatorSet {
    dates: Vec<NaiveDate>,
    columns: BTreeMap<IndicatorKind, Series>,
}

impl IndicatorSet {
    pub fn new(dates: Vec<NaiveDate>) -> Self {
        Self {
            dates,
            columns: BTreeMap::new(),
        }
    }

    /// Insert a column. Its length must match the date axis.
    pub fn insert(&mut self, kind: IndicatorKind, values: Series) -> Result<(), PipelineError> {
        if values.len() != self.dates.len() {
            return Err(PipelineError::MisalignedColumn {
                kind,
                len: values.len(),
                expected: self.dates.len(),
            });
        }
        self.columns.insert(kind, values);
        Ok(())
    }

    /// Value of one indicator at a bar index; `None` if undefined or absent.
    pub fn get(&self, kind: IndicatorKind, index: usize) -> Option<f64> {
        self.columns
            .get(&kind)
            .and_then(|v| v.get(index).copied().flatten())
    }

    pub fn series(&self, kind: IndicatorKind) -> Option<&[Option<f64>]> {
        self.columns.get(&kind).map(|v| v.as_slice())
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Number of dates on the axis.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (IndicatorKind, &[Option<f64>])> {
        self.columns.iter().map(|(k, v)| (*k, v.as_slice()))
    }

    /// Index of the first defined value of a column.
    pub fn first_defined(&self, kind: IndicatorKind) -> Option<usize> {
        self.columns.get(&kind)?.iter().position(Option::is_some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dates(n: usize) -> Vec<NaiveDate> {
        let base = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        (0..n).map(|i| base + chrono::Duration::days(i as i64)).collect()
    }

    #[test]
    fn insert_and_get() {
        let mut set = IndicatorSet::new(dates(3));
        set.insert(IndicatorKind::Rsi, vec![None, Some(40.0), Some(45.0)])
            .unwrap();
        assert_eq!(set.get(IndicatorKind::Rsi, 0), None);
        assert_eq!(set.get(IndicatorKind::Rsi, 2), Some(45.0));
        assert_eq!(set.get(IndicatorKind::Rsi, 3), None);
        assert_eq!(set.get(IndicatorKind::Cci, 1), None);
        assert_eq!(set.first_defined(IndicatorKind::Rsi), Some(1));
    }

    #[test]
    fn rejects_misaligned_column() {
        let mut set = IndicatorSet::new(dates(3));
        let err = set.insert(IndicatorKind::Macd, vec![None; 2]).unwrap_err();
        assert_eq!(
            err,
            PipelineError::MisalignedColumn {
                kind: IndicatorKind::Macd,
                len: 2,
                expected: 3,
            }
        );
        assert_eq!(set.column_count(), 0);
    }

    #[test]
    fn iterates_in_board_order() {
        let mut set = IndicatorSet::new(dates(1));
        set.insert(IndicatorKind::Cci, vec![None]).unwrap();
        set.insert(IndicatorKind::Rsi, vec![None]).unwrap();
        set.insert(IndicatorKind::Momentum, vec![None]).unwrap();
        let kinds: Vec<_> = set.iter().map(|(k, _)| k).collect();
        assert_eq!(
            kinds,
            vec![IndicatorKind::Rsi, IndicatorKind::Momentum, IndicatorKind::Cci]
        );
    }
}

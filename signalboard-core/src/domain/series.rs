//! PriceSeries: validated, date-ascending bar history.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::bar::Bar;

/// Reasons a bar list cannot become a `PriceSeries`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SeriesError {
    #[error("bar {index} dated {date} does not follow {previous} (dates must be strictly increasing)")]
    NonIncreasingDate {
        index: usize,
        date: NaiveDate,
        previous: NaiveDate,
    },

    #[error("bar {index} dated {date} has a non-finite {field}")]
    NonFiniteField {
        index: usize,
        date: NaiveDate,
        field: &'static str,
    },
}

/// Ordered daily bars with strictly increasing dates.
///
/// Dates need not be contiguous (weekends and holidays are skipped), but
/// they never repeat or go backwards, and every OHLC field is finite. The
/// series is immutable once built; windowing returns a new series.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Bar>", into = "Vec<Bar>")]
pub struct PriceSeries {
    bars: Vec<Bar>,
}

impl PriceSeries {
    /// Validate and wrap a bar list. An empty list is accepted.
    pub fn new(bars: Vec<Bar>) -> Result<Self, SeriesError> {
        for (index, bar) in bars.iter().enumerate() {
            if let Some(field) = bar.non_finite_field() {
                return Err(SeriesError::NonFiniteField {
                    index,
                    date: bar.date,
                    field,
                });
            }
        }
        if let Some(index) = bars.windows(2).position(|w| w[1].date <= w[0].date) {
            return Err(SeriesError::NonIncreasingDate {
                index: index + 1,
                date: bars[index + 1].date,
                previous: bars[index].date,
            });
        }
        Ok(Self { bars })
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Bar> {
        self.bars.iter()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.bars.iter().map(|b| b.date).collect()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.bars.first().map(|b| b.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.bars.last().map(|b| b.date)
    }

    /// Bars dated on or after `cutoff`, as a new series.
    pub fn since(&self, cutoff: NaiveDate) -> PriceSeries {
        let start = self.bars.partition_point(|b| b.date < cutoff);
        PriceSeries {
            bars: self.bars[start..].to_vec(),
        }
    }

    pub fn into_bars(self) -> Vec<Bar> {
        self.bars
    }
}

impl TryFrom<Vec<Bar>> for PriceSeries {
    type Error = SeriesError;

    fn try_from(bars: Vec<Bar>) -> Result<Self, Self::Error> {
        PriceSeries::new(bars)
    }
}

impl From<PriceSeries> for Vec<Bar> {
    fn from(series: PriceSeries) -> Self {
        series.bars
    }
}

impl<'a> IntoIterator for &'a PriceSeries {
    type Item = &'a Bar;
    type IntoIter = std::slice::Iter<'a, Bar>;

    fn into_iter(self) -> Self::IntoIter {
        self.bars.iter()
    }
}

//! Bar loading for the runner.
//!
//! Reads daily OHLC bars from a CSV file into a validated `PriceSeries`:
//! 1. Headers are matched case-insensitively (`Date,Open,High,Low,Close`,
//!    optional `Volume`); any other column is ignored
//! 2. Rows with an empty, `NaN`, or unparsable price are dropped with a warning
//! 3. Remaining rows are sorted by date; a repeated date is an error
//! 4. An optional lookback keeps only the most recent calendar days

use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

use signalboard_core::domain::{Bar, DatasetHash, PriceSeries, SeriesError};

/// Errors from the data loading layer.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{path} has no '{column}' column")]
    MissingColumn { path: PathBuf, column: &'static str },

    #[error("{path} lists {date} more than once")]
    DuplicateDate { path: PathBuf, date: NaiveDate },

    #[error("{path} contains no usable bars ({dropped} rows dropped)")]
    NoBars { path: PathBuf, dropped: usize },

    #[error("invalid series: {0}")]
    Series(#[from] SeriesError),
}

/// Options controlling how bars are loaded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadOptions {
    /// Keep only bars within this many calendar days of the last bar.
    pub lookback_days: Option<u32>,
}

/// A loaded series plus provenance.
#[derive(Debug, Clone)]
pub struct LoadedSeries {
    pub series: PriceSeries,
    /// BLAKE3 over the bars actually kept.
    pub dataset_hash: DatasetHash,
    /// Rows skipped because a price was missing or unparsable.
    pub dropped_rows: usize,
}

/// Column positions resolved from the header row.
#[derive(Debug, Clone, Copy)]
struct Columns {
    date: usize,
    open: usize,
    high: usize,
    low: usize,
    close: usize,
    volume: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &csv::StringRecord, path: &Path) -> Result<Self, LoadError> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
        };
        let require = |name: &'static str| {
            find(name).ok_or_else(|| LoadError::MissingColumn {
                path: path.to_path_buf(),
                column: name,
            })
        };
        Ok(Self {
            date: require("date")?,
            open: require("open")?,
            high: require("high")?,
            low: require("low")?,
            close: require("close")?,
            volume: find("volume"),
        })
    }
}

/// Why a row was skipped.
#[derive(Debug, Clone, PartialEq)]
enum RowIssue {
    BadDate(String),
    BadPrice(&'static str, String),
}

impl std::fmt::Display for RowIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RowIssue::BadDate(raw) => write!(f, "unparsable date '{raw}'"),
            RowIssue::BadPrice(field, raw) => write!(f, "unusable {field} '{raw}'"),
        }
    }
}

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    // Timestamps such as "2024-01-02 00:00:00-05:00" keep their date prefix.
    let candidates = [raw, raw.get(..10).unwrap_or(raw)];
    candidates.iter().find_map(|s| {
        DATE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
    })
}

fn parse_price(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_volume(raw: &str) -> Option<u64> {
    parse_price(raw)
        .filter(|v| *v >= 0.0)
        .map(|v| v.round() as u64)
}

fn parse_row(record: &csv::StringRecord, cols: &Columns) -> Result<Bar, RowIssue> {
    let field = |i: usize| record.get(i).unwrap_or("");
    let date_raw = field(cols.date);
    let date = parse_date(date_raw).ok_or_else(|| RowIssue::BadDate(date_raw.to_string()))?;

    let price = |name: &'static str, i: usize| {
        let raw = field(i);
        parse_price(raw).ok_or_else(|| RowIssue::BadPrice(name, raw.to_string()))
    };
    let bar = Bar::new(
        date,
        price("open", cols.open)?,
        price("high", cols.high)?,
        price("low", cols.low)?,
        price("close", cols.close)?,
    );
    Ok(match cols.volume.and_then(|i| parse_volume(field(i))) {
        Some(v) => bar.with_volume(v),
        None => bar,
    })
}

/// Load a CSV of daily bars into a `PriceSeries`.
pub fn load_price_series(path: &Path, opts: &LoadOptions) -> Result<LoadedSeries, LoadError> {
    let csv_err = |source| LoadError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(csv_err)?;
    let headers = reader.headers().map_err(csv_err)?.clone();
    let cols = Columns::from_headers(&headers, path)?;

    let mut bars = Vec::new();
    let mut dropped = 0usize;
    for (i, record) in reader.records().enumerate() {
        let record = record.map_err(csv_err)?;
        match parse_row(&record, &cols) {
            Ok(bar) => {
                if !bar.is_sane() {
                    warn!(path = %path.display(), date = %bar.date, "bar has inconsistent OHLC range");
                }
                bars.push(bar);
            }
            Err(issue) => {
                // Line 1 is the header.
                warn!(path = %path.display(), line = i + 2, %issue, "dropping row");
                dropped += 1;
            }
        }
    }

    bars.sort_by_key(|b| b.date);
    if let Some(w) = bars.windows(2).find(|w| w[0].date == w[1].date) {
        return Err(LoadError::DuplicateDate {
            path: path.to_path_buf(),
            date: w[0].date,
        });
    }
    if bars.is_empty() {
        return Err(LoadError::NoBars {
            path: path.to_path_buf(),
            dropped,
        });
    }

    let mut series = PriceSeries::new(bars)?;
    if let (Some(days), Some(last)) = (opts.lookback_days, series.last_date()) {
        let cutoff = last - chrono::Duration::days(i64::from(days));
        series = series.since(cutoff);
    }

    let dataset_hash = DatasetHash::of(&series);
    debug!(
        path = %path.display(),
        bars = series.len(),
        dropped,
        hash = dataset_hash.short(),
        "loaded price series"
    );

    Ok(LoadedSeries {
        series,
        dataset_hash,
        dropped_rows: dropped,
    })
}

//! Board runner: wires together loading, the signal pipeline, and reporting.
//!
//! Two entry points:
//! - `evaluate_instrument()`: one CSV file through the pipeline. Used by the `signals` command.
//! - `evaluate_board()`: every instrument of a `BoardConfig` in parallel. Used by the `board` command.

use chrono::NaiveDate;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use signalboard_core::domain::{DatasetHash, SignalRow, TableHash};
use signalboard_core::indicators::IndicatorParams;
use signalboard_core::signals::SignalTable;
use signalboard_core::{Pipeline, PipelineError};

use crate::config::{BoardConfig, InstrumentSpec};
use crate::data_loader::{load_price_series, LoadError, LoadOptions};
use crate::overview::MarketOverview;

/// Errors from evaluating one instrument.
#[derive(Debug, Error)]
pub enum BoardError {
    #[error("{symbol}: {source}")]
    Data {
        symbol: String,
        #[source]
        source: LoadError,
    },

    #[error("{symbol}: {source}")]
    Pipeline {
        symbol: String,
        #[source]
        source: PipelineError,
    },
}

impl BoardError {
    pub fn symbol(&self) -> &str {
        match self {
            BoardError::Data { symbol, .. } | BoardError::Pipeline { symbol, .. } => symbol,
        }
    }
}

/// Current schema version for persisted reports.
pub const SCHEMA_VERSION: u32 = 1;

fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

/// Signal table for one instrument plus where it came from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InstrumentReport {
    pub name: String,
    pub symbol: String,
    pub source: String,
    pub dataset_hash: DatasetHash,
    pub table_hash: TableHash,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
    pub bar_count: usize,
    pub dropped_rows: usize,
    pub table: SignalTable,
}

impl InstrumentReport {
    pub fn latest(&self) -> Option<&SignalRow> {
        self.table.latest()
    }
}

/// An instrument that could not be evaluated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InstrumentFailure {
    pub name: String,
    pub symbol: String,
    pub error: String,
}

/// Result of evaluating a whole board, in config order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BoardReport {
    /// Schema version for forward-compatible deserialization.
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub params: IndicatorParams,
    #[serde(default)]
    pub lookback_days: Option<u32>,
    pub instruments: Vec<InstrumentReport>,
    #[serde(default)]
    pub failures: Vec<InstrumentFailure>,
}

impl BoardReport {
    pub fn instrument(&self, symbol: &str) -> Option<&InstrumentReport> {
        self.instruments.iter().find(|r| r.symbol == symbol)
    }

    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Latest call per instrument.
    pub fn overview(&self) -> MarketOverview {
        MarketOverview::from_report(self)
    }
}

/// Load one instrument's bars and run the signal pipeline over them.
pub fn evaluate_instrument(
    spec: &InstrumentSpec,
    params: &IndicatorParams,
    opts: &LoadOptions,
) -> Result<InstrumentReport, BoardError> {
    let loaded = load_price_series(&spec.path, opts).map_err(|source| BoardError::Data {
        symbol: spec.symbol.clone(),
        source,
    })?;
    let pipeline_err = |source| BoardError::Pipeline {
        symbol: spec.symbol.clone(),
        source,
    };
    let table = Pipeline::new(*params)
        .map_err(pipeline_err)?
        .run(&loaded.series)
        .map_err(pipeline_err)?;

    if let Some(row) = table.latest() {
        info!(
            symbol = %spec.symbol,
            bars = loaded.series.len(),
            date = %row.date,
            overall = %row.overall,
            score = row.score,
            "instrument evaluated"
        );
    } else {
        info!(symbol = %spec.symbol, bars = loaded.series.len(), "instrument has no signal rows yet");
    }

    Ok(InstrumentReport {
        name: spec.name.clone(),
        symbol: spec.symbol.clone(),
        source: spec.path.display().to_string(),
        table_hash: table.fingerprint(),
        dataset_hash: loaded.dataset_hash,
        first_date: loaded.series.first_date(),
        last_date: loaded.series.last_date(),
        bar_count: loaded.series.len(),
        dropped_rows: loaded.dropped_rows,
        table,
    })
}

/// Evaluate every instrument on the board in parallel.
///
/// Instruments are independent; one failing does not stop the others. Both
/// successes and failures keep the order of the config.
pub fn evaluate_board(config: &BoardConfig) -> BoardReport {
    let opts = config.load_options();
    let results: Vec<Result<InstrumentReport, BoardError>> = config
        .instruments
        .par_iter()
        .map(|spec| evaluate_instrument(spec, &config.indicators, &opts))
        .collect();

    let mut instruments = Vec::new();
    let mut failures = Vec::new();
    for (spec, result) in config.instruments.iter().zip(results) {
        match result {
            Ok(report) => instruments.push(report),
            Err(e) => {
                warn!(symbol = %e.symbol(), error = %e, "instrument failed");
                failures.push(InstrumentFailure {
                    name: spec.name.clone(),
                    symbol: spec.symbol.clone(),
                    error: e.to_string(),
                });
            }
        }
    }

    info!(
        evaluated = instruments.len(),
        failed = failures.len(),
        "board evaluated"
    );

    BoardReport {
        schema_version: SCHEMA_VERSION,
        params: config.indicators,
        lookback_days: config.lookback_days,
        instruments,
        failures,
    }
}

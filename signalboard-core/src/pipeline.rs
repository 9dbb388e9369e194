//! End-to-end evaluation: PriceSeries → IndicatorSet → signals → SignalTable.
//!
//! The pipeline is a pure function of its inputs. Running it twice on the
//! same series and parameters yields identical tables.

use tracing::debug;

use crate::domain::PriceSeries;
use crate::error::PipelineError;
use crate::indicators::{IndicatorLibrary, IndicatorParams, IndicatorSet};
use crate::signals::{SignalAggregator, SignalDeriver, SignalRule, SignalTable};

/// Indicator values alongside the signal table they produced.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutput {
    pub indicators: IndicatorSet,
    pub table: SignalTable,
}

/// A configured library plus the rule used to turn columns into signals.
#[derive(Debug, Clone, Default)]
pub struct Pipeline<R = crate::signals::DirectionOfChange> {
    library: IndicatorLibrary,
    deriver: SignalDeriver<R>,
}

impl Pipeline {
    pub fn new(params: IndicatorParams) -> Result<Self, PipelineError> {
        Ok(Self {
            library: IndicatorLibrary::new(params)?,
            deriver: SignalDeriver::new(),
        })
    }
}

impl<R: SignalRule> Pipeline<R> {
    pub fn with_rule(params: IndicatorParams, rule: R) -> Result<Self, PipelineError> {
        Ok(Self {
            library: IndicatorLibrary::new(params)?,
            deriver: SignalDeriver::with_rule(rule),
        })
    }

    pub fn library(&self) -> &IndicatorLibrary {
        &self.library
    }

    pub fn evaluate(&self, series: &PriceSeries) -> Result<PipelineOutput, PipelineError> {
        debug!(bars = series.len(), "running signal pipeline");
        let indicators = self.library.compute(series)?;
        let days = self.deriver.derive(&indicators);
        let table = SignalTable::new(SignalAggregator::aggregate(&days));
        debug!(rows = table.len(), "signal table built");
        Ok(PipelineOutput { indicators, table })
    }

    pub fn run(&self, series: &PriceSeries) -> Result<SignalTable, PipelineError> {
        self.evaluate(series).map(|out| out.table)
    }
}

/// Run the default pipeline once.
pub fn run(series: &PriceSeries, params: &IndicatorParams) -> Result<SignalTable, PipelineError> {
    Pipeline::new(*params)?.run(series)
}

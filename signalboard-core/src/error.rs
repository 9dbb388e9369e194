use thiserror::Error;

use crate::domain::IndicatorKind;

/// Errors surfaced by the indicator library and the signal pipeline.
///
/// Short histories are not errors: indicators report `None` for their
/// warm-up dates. Only an empty series has nothing to compute.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PipelineError {
    #[error("insufficient history: the price series is empty")]
    InsufficientHistory,

    #[error("invalid indicator parameters: {0}")]
    InvalidParams(String),

    #[error("{kind} column has {len} values for {expected} dates")]
    MisalignedColumn {
        kind: IndicatorKind,
        len: usize,
        expected: usize,
    },
}

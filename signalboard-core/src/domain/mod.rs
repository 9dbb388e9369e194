//! Domain types for the signal board.

pub mod bar;
pub mod ids;
pub mod kind;
pub mod series;
pub mod signal;

pub use bar::Bar;
pub use ids::{DatasetHash, TableHash};
pub use kind::IndicatorKind;
pub use series::{PriceSeries, SeriesError};
pub use signal::{OverallSignal, Signal, SignalRow};

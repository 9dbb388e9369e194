//! Signal derivation, aggregation, and the output table.
//!
//! Each date from the second onward compares every indicator with its
//! previous value (`deriver`), the eight resulting signals are put to a
//! majority vote (`aggregator`), and the rows are collected in a
//! `SignalTable` (`table`).

pub mod aggregator;
pub mod deriver;
pub mod table;

pub use aggregator::{SignalAggregator, Vote};
pub use deriver::{derive, DailySignals, DirectionOfChange, SignalDeriver, SignalRule};
pub use table::SignalTable;

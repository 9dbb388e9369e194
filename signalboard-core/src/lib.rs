//! Signal Board Core: domain types, indicators, signal derivation and aggregation.
//!
//! This crate turns a daily price history into a table of directional calls:
//! - Domain types (bars, price series, indicator kinds, signals)
//! - Eight indicator calculators with explicit `None` warm-ups
//! - Lag-1 signal derivation through a pluggable `SignalRule`
//! - Majority-vote aggregation into an overall call and score
//! - Content fingerprints for datasets and output tables

pub mod domain;
pub mod error;
pub mod fingerprint;
pub mod indicators;
pub mod pipeline;
pub mod signals;

pub use error::PipelineError;
pub use pipeline::{run, Pipeline, PipelineOutput};

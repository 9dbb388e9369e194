//! Signal Board Runner: board configuration, data loading, evaluation, export.
//!
//! This crate builds on `signalboard-core` to provide:
//! - TOML board configuration with indicator overrides
//! - CSV bar loading with row cleaning and a lookback window
//! - Parallel multi-instrument evaluation with per-instrument failures
//! - Market overview of the latest call per instrument
//! - CSV and JSON export with schema versioning

pub mod config;
pub mod data_loader;
pub mod export;
pub mod overview;
pub mod runner;

pub use config::{BoardConfig, ConfigError, InstrumentSpec};
pub use data_loader::{load_price_series, LoadError, LoadOptions, LoadedSeries};
pub use export::{
    load_board_report, report_from_json, report_to_json, table_to_csv, write_board_artifacts,
};
pub use overview::{MarketOverview, OverviewEntry};
pub use runner::{
    evaluate_board, evaluate_instrument, BoardError, BoardReport, InstrumentFailure,
    InstrumentReport, SCHEMA_VERSION,
};

#[cfg(test)]
mod send_sync_checks {
    use super::*;

    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}

    #[test]
    fn report_types_are_send_sync() {
        assert_send::<BoardReport>();
        assert_sync::<BoardReport>();
        assert_send::<InstrumentReport>();
        assert_sync::<InstrumentReport>();
        assert_send::<MarketOverview>();
        assert_sync::<MarketOverview>();
    }

    #[test]
    fn config_types_are_send_sync() {
        assert_send::<BoardConfig>();
        assert_sync::<BoardConfig>();
        assert_send::<InstrumentSpec>();
        assert_sync::<InstrumentSpec>();
        assert_send::<LoadOptions>();
        assert_sync::<LoadOptions>();
    }

    #[test]
    fn error_types_are_send_sync() {
        assert_send::<BoardError>();
        assert_sync::<BoardError>();
        assert_send::<ConfigError>();
        assert_sync::<ConfigError>();
    }
}

//! Board configuration: the instruments to evaluate and the indicator settings.
//!
//! Stored as TOML:
//!
//! ```toml
//! lookback_days = 60
//!
//! [indicators]
//! rsi_window = 14
//!
//! [[instrument]]
//! name = "S&P E-mini Futures"
//! symbol = "ES=F"
//! path = "data/es.csv"
//! ```
//!
//! Relative instrument paths are resolved against the directory of the
//! config file when it is loaded with `from_file`.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use thiserror::Error;

use signalboard_core::indicators::IndicatorParams;
use signalboard_core::PipelineError;

use crate::data_loader::LoadOptions;
use crate::export::table_file_name;

/// Errors from reading or validating a board configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse board TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize board TOML: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("board config lists no instruments")]
    NoInstruments,

    #[error("instrument symbol '{0}' appears more than once")]
    DuplicateSymbol(String),

    #[error("symbols '{first}' and '{second}' would both be exported as {file}")]
    FileNameCollision {
        first: String,
        second: String,
        file: String,
    },

    #[error("instrument #{index} has an empty {field}")]
    EmptyField { index: usize, field: &'static str },

    #[error("lookback_days must be at least 1")]
    ZeroLookback,

    #[error(transparent)]
    Indicators(#[from] PipelineError),
}

/// One instrument on the board and where its daily bars live.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct InstrumentSpec {
    /// Display name, e.g. "Nasdaq E-mini Futures".
    pub name: String,
    /// Ticker, e.g. "NQ=F". Unique within a board.
    pub symbol: String,
    /// CSV file of daily OHLC bars.
    pub path: PathBuf,
}

impl InstrumentSpec {
    pub fn new(name: impl Into<String>, symbol: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            path: path.into(),
        }
    }
}

/// The complete board configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct BoardConfig {
    /// Keep only bars within this many calendar days of each instrument's last bar.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lookback_days: Option<u32>,

    #[serde(default)]
    pub indicators: IndicatorParams,

    #[serde(rename = "instrument", default)]
    pub instruments: Vec<InstrumentSpec>,
}

impl BoardConfig {
    /// A board with a single instrument and default settings.
    pub fn single(instrument: InstrumentSpec) -> Self {
        Self {
            lookback_days: None,
            indicators: IndicatorParams::default(),
            instruments: vec![instrument],
        }
    }

    /// Load, resolve relative paths, and validate a board from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_toml(&content)?;
        if let Some(base) = path.parent() {
            config.resolve_paths(base);
        }
        Ok(config)
    }

    /// Parse and validate a board from a TOML string. Paths are left as written.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Make every relative instrument path relative to `base` instead.
    pub fn resolve_paths(&mut self, base: &Path) {
        for instrument in &mut self.instruments {
            if instrument.path.is_relative() {
                instrument.path = base.join(&instrument.path);
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.instruments.is_empty() {
            return Err(ConfigError::NoInstruments);
        }
        if self.lookback_days == Some(0) {
            return Err(ConfigError::ZeroLookback);
        }

        let mut seen = HashSet::new();
        // Keyed case-insensitively: ES_F.csv and es_f.csv clash on some filesystems.
        let mut files: HashMap<String, &str> = HashMap::new();
        for (index, instrument) in self.instruments.iter().enumerate() {
            if instrument.name.trim().is_empty() {
                return Err(ConfigError::EmptyField { index, field: "name" });
            }
            if instrument.symbol.trim().is_empty() {
                return Err(ConfigError::EmptyField { index, field: "symbol" });
            }
            if instrument.path.as_os_str().is_empty() {
                return Err(ConfigError::EmptyField { index, field: "path" });
            }
            if !seen.insert(instrument.symbol.as_str()) {
                return Err(ConfigError::DuplicateSymbol(instrument.symbol.clone()));
            }
            let file = table_file_name(&instrument.symbol);
            if let Some(first) = files.insert(file.to_ascii_lowercase(), &instrument.symbol) {
                return Err(ConfigError::FileNameCollision {
                    first: first.to_string(),
                    second: instrument.symbol.clone(),
                    file,
                });
            }
        }

        self.indicators.validate()?;
        Ok(())
    }

    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            lookback_days: self.lookback_days,
        }
    }

    pub fn instrument(&self, symbol: &str) -> Option<&InstrumentSpec> {
        self.instruments.iter().find(|i| i.symbol == symbol)
    }

    pub fn symbols(&self) -> Vec<&str> {
        self.instruments.iter().map(|i| i.symbol.as_str()).collect()
    }
}

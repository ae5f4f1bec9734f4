//! TOML configuration for dataset construction and batching.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::convert::EdgeMode;
use crate::error::{Error, Result};
use crate::loader::Device;
use crate::table::TableSchema;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O operation failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

/// What to do with a row whose SMILES or label cannot be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseErrorPolicy {
    /// Abort the whole build; no cache is written.
    #[default]
    FailFast,
    /// Log the row, record it in the build report and leave it out.
    SkipAndWarn,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    /// Delimited source table.
    pub source: PathBuf,
    /// Cache file. Trusted as-is whenever it exists.
    pub cache: PathBuf,
    pub table: TableSchema,
    pub edge_mode: EdgeMode,
    pub on_parse_error: ParseErrorPolicy,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            source: PathBuf::from("data/raw/molecules.csv"),
            cache: PathBuf::from("data/processed/molecules.bin"),
            table: TableSchema::default(),
            edge_mode: EdgeMode::default(),
            on_parse_error: ParseErrorPolicy::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    pub batch_size: usize,
    /// Share of records in the training split, in `(0, 1)`.
    pub train_fraction: f64,
    pub shuffle: bool,
    pub seed: u64,
    pub device: Device,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            batch_size: 64,
            train_fraction: 0.8,
            shuffle: true,
            seed: 42,
            device: Device::Cpu,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub dataset: DatasetConfig,
    pub loader: LoaderConfig,
}

impl Config {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let wrap = |source: ConfigError| Error::Config {
            path: path.to_path_buf(),
            source,
        };
        let text = std::fs::read_to_string(path).map_err(|e| wrap(e.into()))?;
        let config = Self::from_toml_str(&text).map_err(wrap)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.dataset.validate()?;
        self.loader.validate()
    }
}

impl DatasetConfig {
    /// A record needs at least one label column.
    pub fn validate(&self) -> Result<()> {
        if self.table.label_columns.is_empty() {
            return Err(Error::InvalidConfig(
                "table.label_columns must name at least one column".into(),
            ));
        }
        Ok(())
    }
}

impl LoaderConfig {
    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(Error::InvalidConfig("batch_size must be at least 1".into()));
        }
        validate_fraction(self.train_fraction)
    }
}

pub(crate) fn validate_fraction(fraction: f64) -> Result<()> {
    if fraction > 0.0 && fraction < 1.0 {
        Ok(())
    } else {
        Err(Error::InvalidConfig(format!(
            "train_fraction must lie strictly between 0 and 1, got {fraction}"
        )))
    }
}

use std::path::PathBuf;

use thiserror::Error;

use crate::cache::CacheError;
use crate::config::ConfigError;
use crate::smiles::SmilesError;

/// Why a single table row could not become a graph record.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RowError {
    #[error("invalid SMILES: {0}")]
    Smiles(#[from] SmilesError),

    #[error("label column '{column}' holds non-numeric value {value:?}")]
    Label { column: String, value: String },
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("row {row} ({smiles:?}) could not be converted: {source}")]
    Parse {
        row: usize,
        smiles: String,
        #[source]
        source: RowError,
    },

    #[error("cache file {} is unusable: {source}", path.display())]
    Persistence {
        path: PathBuf,
        #[source]
        source: CacheError,
    },

    #[error("failed to read source table {}: {source}", path.display())]
    Table {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("source table {} has no column named '{column}'", path.display())]
    MissingColumn { path: PathBuf, column: String },

    #[error("failed to load config {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: ConfigError,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    pub fn parse(row: usize, smiles: impl Into<String>, source: impl Into<RowError>) -> Self {
        Self::Parse {
            row,
            smiles: smiles.into(),
            source: source.into(),
        }
    }

    pub fn persistence(path: impl Into<PathBuf>, source: impl Into<CacheError>) -> Self {
        Self::Persistence {
            path: path.into(),
            source: source.into(),
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

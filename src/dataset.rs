//! Load-or-build dataset of molecular graphs.

use std::collections::BTreeSet;

use tracing::{debug, info, warn};

use crate::cache::{read_cache, write_cache};
use crate::config::{DatasetConfig, ParseErrorPolicy};
use crate::convert::{smiles_to_graph, EdgeMode};
use crate::error::{Error, Result, RowError};
use crate::features::NUM_ATOM_FEATURES;
use crate::graph::GraphRecord;
use crate::storage::CollatedStorage;
use crate::table::SourceTable;

/// A row left out under [`ParseErrorPolicy::SkipAndWarn`].
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedRow {
    pub row: usize,
    pub smiles: String,
    pub reason: RowError,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuildReport {
    /// Data rows read from the source table.
    pub rows: usize,
    pub skipped: Vec<SkippedRow>,
}

impl BuildReport {
    pub fn converted(&self) -> usize {
        self.rows - self.skipped.len()
    }
}

/// How the dataset came to be in memory.
#[derive(Debug, Clone, PartialEq)]
pub enum Origin {
    Cached,
    Built(BuildReport),
}

#[derive(Debug, Clone)]
pub struct MoleculeDataset {
    storage: CollatedStorage,
    edge_mode: EdgeMode,
    origin: Origin,
}

impl MoleculeDataset {
    /// Loads `config.cache` if it exists, otherwise converts the source
    /// table, writes the cache once and returns the result.
    ///
    /// An existing cache is never compared with the source table.
    pub fn load_or_build(config: &DatasetConfig) -> Result<Self> {
        if config.cache.exists() {
            return Self::load(config);
        }

        let (storage, report) = build_collection(config)?;
        write_cache(&config.cache, config.edge_mode, &storage)
            .map_err(|e| Error::persistence(&config.cache, e))?;
        info!(
            path = %config.cache.display(),
            records = storage.len(),
            skipped = report.skipped.len(),
            "wrote dataset cache"
        );

        Ok(Self {
            storage,
            edge_mode: config.edge_mode,
            origin: Origin::Built(report),
        })
    }

    fn load(config: &DatasetConfig) -> Result<Self> {
        let (header, storage) =
            read_cache(&config.cache).map_err(|e| Error::persistence(&config.cache, e))?;
        if header.edge_mode != config.edge_mode {
            warn!(
                cached = ?header.edge_mode,
                configured = ?config.edge_mode,
                "cache was built with a different edge mode; using the cached one"
            );
        }
        info!(path = %config.cache.display(), records = storage.len(), "loaded dataset cache");
        Ok(Self {
            storage,
            edge_mode: header.edge_mode,
            origin: Origin::Cached,
        })
    }

    pub fn from_records(records: &[GraphRecord], edge_mode: EdgeMode) -> Self {
        Self {
            storage: CollatedStorage::collate(records, edge_mode),
            edge_mode,
            origin: Origin::Built(BuildReport {
                rows: records.len(),
                skipped: Vec::new(),
            }),
        }
    }

    pub fn get(&self, index: usize) -> Option<GraphRecord> {
        self.storage.get(index)
    }

    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = GraphRecord> + '_ {
        (0..self.len()).filter_map(|i| self.get(i))
    }

    pub fn origin(&self) -> &Origin {
        &self.origin
    }

    pub fn edge_mode(&self) -> EdgeMode {
        self.edge_mode
    }

    pub fn storage(&self) -> &CollatedStorage {
        &self.storage
    }

    pub fn num_node_features(&self) -> usize {
        NUM_ATOM_FEATURES
    }

    pub fn num_edge_features(&self) -> usize {
        self.edge_mode.num_edge_features()
    }

    /// Columns in each label row.
    pub fn label_width(&self) -> usize {
        self.storage.label(0).map_or(0, <[f64]>::len)
    }

    /// Distinct values of a single integral label column; otherwise the
    /// label width.
    pub fn num_classes(&self) -> usize {
        let width = self.label_width();
        if width != 1 || self.storage.y.iter().any(|v| v.fract() != 0.0) {
            return width;
        }
        self.storage
            .y
            .iter()
            .map(|&v| v as i64)
            .collect::<BTreeSet<_>>()
            .len()
    }
}

/// Converts every row of the source table, applying the parse-error policy.
/// Nothing is written to disk.
pub fn build_collection(config: &DatasetConfig) -> Result<(CollatedStorage, BuildReport)> {
    config.validate()?;
    let table = SourceTable::read(&config.source, &config.table)?;
    info!(
        path = %config.source.display(),
        rows = table.len(),
        edge_mode = ?config.edge_mode,
        "building dataset"
    );

    let mut records = Vec::with_capacity(table.len());
    let mut report = BuildReport {
        rows: table.len(),
        skipped: Vec::new(),
    };

    for row in &table.rows {
        let converted = table.labels(row).and_then(|label| {
            smiles_to_graph(&row.smiles, label, config.edge_mode).map_err(RowError::from)
        });
        match converted {
            Ok(record) => {
                debug!(
                    row = row.index,
                    nodes = record.num_nodes(),
                    edges = record.num_edges(),
                    "converted"
                );
                records.push(record);
            }
            Err(reason) => match config.on_parse_error {
                ParseErrorPolicy::FailFast => {
                    return Err(Error::parse(row.index, &row.smiles, reason));
                }
                ParseErrorPolicy::SkipAndWarn => {
                    warn!(row = row.index, smiles = %row.smiles, %reason, "skipping row");
                    report.skipped.push(SkippedRow {
                        row: row.index,
                        smiles: row.smiles.clone(),
                        reason,
                    });
                }
            },
        }
    }

    Ok((CollatedStorage::collate(&records, config.edge_mode), report))
}

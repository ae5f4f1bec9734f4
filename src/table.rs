//! Delimited source table: one SMILES column plus label columns.

use std::path::{Path, PathBuf};

use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result, RowError};

/// Which columns to read and how the file is delimited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableSchema {
    pub smiles_column: String,
    pub label_columns: Vec<String>,
    pub delimiter: char,
}

impl Default for TableSchema {
    fn default() -> Self {
        Self {
            smiles_column: "smiles".to_string(),
            label_columns: vec!["label".to_string()],
            delimiter: ',',
        }
    }
}

/// One data row with its label cells still as text.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    /// Zero-based position among the data rows (header excluded).
    pub index: usize,
    pub smiles: String,
    pub label_cells: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct SourceTable {
    pub path: PathBuf,
    pub label_columns: Vec<String>,
    pub rows: Vec<TableRow>,
}

impl SourceTable {
    /// Reads the whole table. A missing column or malformed record is fatal;
    /// cell contents are not validated here.
    pub fn read(path: &Path, schema: &TableSchema) -> Result<Self> {
        let table_err = |source| Error::Table {
            path: path.to_path_buf(),
            source,
        };

        let delimiter = u8::try_from(schema.delimiter).map_err(|_| {
            Error::InvalidConfig(format!(
                "delimiter {:?} is not a single-byte character",
                schema.delimiter
            ))
        })?;

        let mut reader = ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_path(path)
            .map_err(table_err)?;

        let headers = reader.headers().map_err(table_err)?.clone();
        let column = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| Error::MissingColumn {
                    path: path.to_path_buf(),
                    column: name.to_string(),
                })
        };
        let smiles_idx = column(&schema.smiles_column)?;
        let label_idx = schema
            .label_columns
            .iter()
            .map(|name| column(name))
            .collect::<Result<Vec<_>>>()?;

        let mut rows = Vec::new();
        for (index, record) in reader.records().enumerate() {
            let record = record.map_err(table_err)?;
            let cell = |i: usize| record.get(i).unwrap_or_default().to_string();
            rows.push(TableRow {
                index,
                smiles: cell(smiles_idx),
                label_cells: label_idx.iter().map(|&i| cell(i)).collect(),
            });
        }

        tracing::debug!(path = %path.display(), rows = rows.len(), "read source table");
        Ok(Self {
            path: path.to_path_buf(),
            label_columns: schema.label_columns.clone(),
            rows,
        })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Parses a row's label cells in column order.
    pub fn labels(&self, row: &TableRow) -> Result<Vec<f64>, RowError> {
        row.label_cells
            .iter()
            .zip(&self.label_columns)
            .map(|(value, column)| {
                value.parse::<f64>().map_err(|_| RowError::Label {
                    column: column.clone(),
                    value: value.clone(),
                })
            })
            .collect()
    }
}

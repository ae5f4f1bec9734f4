//! Mini-batch iteration over a dataset.
//!
//! A [`Batch`] is the disjoint union of its graphs: node tables are
//! stacked, and each graph's edge indices are shifted by the number of
//! nodes before it. `batch[n]` names the graph that node `n` came from, and
//! `ptr` holds the node offset of every graph plus the total.

use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::LoaderConfig;
use crate::dataset::MoleculeDataset;
use crate::error::{Error, Result};
use crate::features::AtomFeatures;
use crate::graph::GraphRecord;

/// Where a batch is meant to be consumed. Carried on every batch and never
/// held as process state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Device {
    #[default]
    Cpu,
    /// GPU by ordinal.
    Cuda(u32),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown device {0:?} (expected \"cpu\", \"cuda\" or \"cuda:N\")")]
pub struct ParseDeviceError(String);

impl FromStr for Device {
    type Err = ParseDeviceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        match lower.as_str() {
            "cpu" => Ok(Device::Cpu),
            "cuda" => Ok(Device::Cuda(0)),
            other => other
                .strip_prefix("cuda:")
                .and_then(|n| n.parse().ok())
                .map(Device::Cuda)
                .ok_or_else(|| ParseDeviceError(s.to_string())),
        }
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Device::Cpu => f.write_str("cpu"),
            Device::Cuda(ordinal) => write!(f, "cuda:{ordinal}"),
        }
    }
}

impl TryFrom<String> for Device {
    type Error = ParseDeviceError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Device> for String {
    fn from(device: Device) -> Self {
        device.to_string()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    pub x: Vec<AtomFeatures>,
    pub edge_index: Vec<[usize; 2]>,
    pub edge_attr: Option<Vec<f32>>,
    /// Label rows stacked row-major, shape `[num_graphs, label_width]`.
    pub y: Vec<f64>,
    pub label_width: usize,
    pub batch: Vec<usize>,
    pub ptr: Vec<usize>,
    pub smiles: Vec<String>,
    pub device: Device,
}

impl Batch {
    pub fn from_records(records: &[GraphRecord], device: Device) -> Self {
        let with_attr = records.first().is_some_and(|r| r.edge_attr.is_some());
        let mut batch = Batch {
            x: Vec::new(),
            edge_index: Vec::new(),
            edge_attr: with_attr.then(Vec::new),
            y: Vec::new(),
            label_width: records.first().map_or(0, |r| r.y.len()),
            batch: Vec::new(),
            ptr: vec![0],
            smiles: Vec::with_capacity(records.len()),
            device,
        };

        for (graph, record) in records.iter().enumerate() {
            let offset = batch.x.len();
            batch.x.extend_from_slice(&record.x);
            batch.batch.extend(std::iter::repeat(graph).take(record.num_nodes()));
            batch.edge_index.extend(
                record
                    .edge_index
                    .iter()
                    .map(|&[src, dst]| [src + offset, dst + offset]),
            );
            if let (Some(all), Some(attr)) = (batch.edge_attr.as_mut(), &record.edge_attr) {
                all.extend_from_slice(attr);
            }
            batch.y.extend_from_slice(&record.y);
            batch.smiles.push(record.smiles.clone());
            batch.ptr.push(batch.x.len());
        }
        batch
    }

    pub fn num_graphs(&self) -> usize {
        self.ptr.len() - 1
    }

    pub fn num_nodes(&self) -> usize {
        self.x.len()
    }

    pub fn num_edges(&self) -> usize {
        self.edge_index.len()
    }

    pub fn y_shape(&self) -> [usize; 2] {
        [self.num_graphs(), self.label_width]
    }

    /// Node range of graph `i` within the batch.
    pub fn nodes_of(&self, i: usize) -> Range<usize> {
        self.ptr[i]..self.ptr[i + 1]
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoaderOptions {
    pub batch_size: usize,
    pub shuffle: bool,
    pub seed: u64,
    pub device: Device,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        LoaderOptions::from(&LoaderConfig::default())
    }
}

impl From<&LoaderConfig> for LoaderOptions {
    fn from(config: &LoaderConfig) -> Self {
        Self {
            batch_size: config.batch_size,
            shuffle: config.shuffle,
            seed: config.seed,
            device: config.device,
        }
    }
}

/// Iterates batches over a subset of a dataset, one pass per loader.
pub struct DataLoader<'a> {
    dataset: &'a MoleculeDataset,
    order: Vec<usize>,
    options: LoaderOptions,
    position: usize,
}

impl<'a> DataLoader<'a> {
    pub fn new(
        dataset: &'a MoleculeDataset,
        mut indices: Vec<usize>,
        options: LoaderOptions,
    ) -> Result<Self> {
        if options.batch_size == 0 {
            return Err(Error::InvalidConfig("batch_size must be at least 1".into()));
        }
        if let Some(&bad) = indices.iter().find(|&&i| i >= dataset.len()) {
            return Err(Error::InvalidConfig(format!(
                "index {bad} is out of range for a dataset of {} records",
                dataset.len()
            )));
        }
        if options.shuffle {
            indices.shuffle(&mut StdRng::seed_from_u64(options.seed));
        }
        Ok(Self {
            dataset,
            order: indices,
            options,
            position: 0,
        })
    }

    pub fn num_batches(&self) -> usize {
        self.order.len().div_ceil(self.options.batch_size)
    }

    pub fn device(&self) -> Device {
        self.options.device
    }
}

impl Iterator for DataLoader<'_> {
    type Item = Batch;

    fn next(&mut self) -> Option<Batch> {
        if self.position >= self.order.len() {
            return None;
        }
        let end = (self.position + self.options.batch_size).min(self.order.len());
        let records: Vec<GraphRecord> = self.order[self.position..end]
            .iter()
            .filter_map(|&i| self.dataset.get(i))
            .collect();
        self.position = end;
        Some(Batch::from_records(&records, self.options.device))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::{smiles_to_graph, EdgeMode};

    fn records() -> Vec<GraphRecord> {
        [("CCO", 1.0), ("O", 0.0), ("C=O", 1.0)]
            .iter()
            .map(|&(s, y)| smiles_to_graph(s, vec![y], EdgeMode::WithBondFeatures).unwrap())
            .collect()
    }

    #[test]
    fn disjoint_union_offsets_edges() {
        let batch = Batch::from_records(&records(), Device::Cpu);
        assert_eq!(batch.num_graphs(), 3);
        assert_eq!(batch.num_nodes(), 6);
        assert_eq!(batch.ptr, vec![0, 3, 4, 6]);
        assert_eq!(batch.batch, vec![0, 0, 0, 1, 2, 2]);
        assert_eq!(batch.edge_index[4..], [[4, 5], [5, 4]]);
        assert_eq!(batch.edge_attr.as_ref().unwrap()[4..], [2.0, 2.0]);
        assert_eq!(batch.y, vec![1.0, 0.0, 1.0]);
        assert_eq!(batch.y_shape(), [3, 1]);
        assert_eq!(batch.nodes_of(2), 4..6);
        for &[src, dst] in &batch.edge_index {
            assert_eq!(batch.batch[src], batch.batch[dst]);
        }
    }

    #[test]
    fn empty_batch() {
        let batch = Batch::from_records(&[], Device::Cuda(0));
        assert_eq!(batch.num_graphs(), 0);
        assert_eq!(batch.y_shape(), [0, 0]);
        assert!(batch.edge_attr.is_none());
    }

    #[test]
    fn device_strings() {
        assert_eq!("cpu".parse::<Device>().unwrap(), Device::Cpu);
        assert_eq!("CUDA".parse::<Device>().unwrap(), Device::Cuda(0));
        assert_eq!("cuda:3".parse::<Device>().unwrap(), Device::Cuda(3));
        assert!("tpu".parse::<Device>().is_err());
        assert!("cuda:x".parse::<Device>().is_err());
        assert_eq!(Device::Cuda(2).to_string(), "cuda:2");
    }
}

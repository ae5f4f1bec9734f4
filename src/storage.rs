use serde::{Deserialize, Serialize};

use crate::convert::EdgeMode;
use crate::features::AtomFeatures;
use crate::graph::GraphRecord;

/// Graph records concatenated into flat arrays.
///
/// Record `i` owns `x[node_slices[i]..node_slices[i + 1]]`, and likewise
/// for edges and labels. Edge indices stay local to their record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollatedStorage {
    pub x: Vec<AtomFeatures>,
    pub edge_index: Vec<[usize; 2]>,
    pub edge_attr: Option<Vec<f32>>,
    pub y: Vec<f64>,
    pub smiles: Vec<String>,
    pub node_slices: Vec<usize>,
    pub edge_slices: Vec<usize>,
    pub label_slices: Vec<usize>,
}

impl CollatedStorage {
    pub fn collate(records: &[GraphRecord], mode: EdgeMode) -> Self {
        let mut storage = Self {
            edge_attr: match mode {
                EdgeMode::AdjacencyOnly => None,
                EdgeMode::WithBondFeatures => Some(Vec::new()),
            },
            node_slices: vec![0],
            edge_slices: vec![0],
            label_slices: vec![0],
            ..Self::default()
        };

        for record in records {
            storage.x.extend_from_slice(&record.x);
            storage.edge_index.extend_from_slice(&record.edge_index);
            if let (Some(all), Some(attr)) = (storage.edge_attr.as_mut(), &record.edge_attr) {
                all.extend_from_slice(attr);
            }
            storage.y.extend_from_slice(&record.y);
            storage.smiles.push(record.smiles.clone());

            storage.node_slices.push(storage.x.len());
            storage.edge_slices.push(storage.edge_index.len());
            storage.label_slices.push(storage.y.len());
        }
        storage
    }

    pub fn len(&self) -> usize {
        self.smiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.smiles.is_empty()
    }

    /// Rebuilds record `index` from its slices.
    pub fn get(&self, index: usize) -> Option<GraphRecord> {
        let smiles = self.smiles.get(index)?;
        let nodes = self.node_slices[index]..self.node_slices[index + 1];
        let edges = self.edge_slices[index]..self.edge_slices[index + 1];
        let labels = self.label_slices[index]..self.label_slices[index + 1];

        Some(GraphRecord {
            x: self.x[nodes].to_vec(),
            edge_index: self.edge_index[edges.clone()].to_vec(),
            edge_attr: self.edge_attr.as_ref().map(|attr| attr[edges].to_vec()),
            y: self.y[labels].to_vec(),
            smiles: smiles.clone(),
        })
    }

    /// Label row of record `index` without materializing the record.
    pub fn label(&self, index: usize) -> Option<&[f64]> {
        let start = *self.label_slices.get(index)?;
        let end = *self.label_slices.get(index + 1)?;
        self.y.get(start..end)
    }

    /// Checks that the slice tables agree with the flat arrays.
    pub fn is_consistent(&self) -> bool {
        let n = self.len();
        let well_formed = |slices: &[usize], total: usize| {
            slices.len() == n + 1
                && slices.first() == Some(&0)
                && slices.last() == Some(&total)
                && slices.windows(2).all(|w| w[0] <= w[1])
        };
        well_formed(&self.node_slices, self.x.len())
            && well_formed(&self.edge_slices, self.edge_index.len())
            && well_formed(&self.label_slices, self.y.len())
            && self
                .edge_attr
                .as_ref()
                .map_or(true, |attr| attr.len() == self.edge_index.len())
    }
}

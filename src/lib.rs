//! Molecular graph datasets for graph neural networks.
//!
//! A table of SMILES strings and labels becomes a collection of graph
//! records: one node feature row per atom, directed edges for every bond,
//! optional bond-order codes. The collection is cached on disk and handed
//! to a training runtime as shuffled disjoint-union batches.
//!
//! ```
//! use molgraph::{smiles_to_graph, EdgeMode};
//!
//! let g = smiles_to_graph("CCO", vec![1.0], EdgeMode::WithBondFeatures).unwrap();
//! assert_eq!(g.x_shape(), [3, 5]);
//! assert_eq!(g.edge_index, vec![[0, 1], [1, 0], [1, 2], [2, 1]]);
//! assert_eq!(g.edge_attr, Some(vec![1.0, 1.0, 1.0, 1.0]));
//! ```

pub mod aromaticity;
pub mod atom;
pub mod bond;
pub mod cache;
pub mod config;
pub mod conjugation;
pub mod convert;
pub mod dataset;
pub mod element;
pub mod error;
pub mod features;
pub mod graph;
pub mod hybridization;
pub mod kekulize;
pub mod loader;
pub mod mol;
pub mod rings;
pub mod sanitize;
pub mod smiles;
pub mod split;
pub mod storage;
pub mod table;
pub mod traits;
pub mod valence;
pub mod wrappers;

pub use aromaticity::perceive_aromaticity;
pub use atom::Atom;
pub use bond::{Bond, BondOrder, SmilesBond, SmilesBondOrder};
pub use cache::{CacheError, CacheHeader};
pub use config::{Config, ConfigError, DatasetConfig, LoaderConfig, ParseErrorPolicy};
pub use convert::{molecule_to_graph, smiles_to_graph, EdgeMode};
pub use dataset::{BuildReport, MoleculeDataset, Origin, SkippedRow};
pub use element::Element;
pub use error::{Error, Result, RowError};
pub use features::{atom_features, bond_code, AROMATIC_BOND_CODE, NUM_ATOM_FEATURES};
pub use graph::GraphRecord;
pub use hybridization::assign_hybridization;
pub use kekulize::{kekulize, KekulizeError};
pub use loader::{Batch, DataLoader, Device, LoaderOptions};
pub use mol::Mol;
pub use rings::RingInfo;
pub use sanitize::sanitize;
pub use smiles::{from_smiles, parse_smiles, SmilesError};
pub use split::train_test_split;
pub use storage::CollatedStorage;
pub use table::{SourceTable, TableSchema};
pub use traits::{
    HasAromaticity, HasAtomicNum, HasBondOrder, HasFormalCharge, HasHybridization,
    HasHydrogenCount,
};
pub use wrappers::{Hybridization, WithHybridization};

#[cfg(test)]
mod tests;

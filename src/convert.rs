//! Molecule to graph record conversion.

use serde::{Deserialize, Serialize};

use crate::atom::Atom;
use crate::bond::Bond;
use crate::features::{atom_features, bond_code};
use crate::graph::GraphRecord;
use crate::mol::Mol;
use crate::smiles::{from_smiles, SmilesError};
use crate::wrappers::WithHybridization;

/// How edges are emitted. Fixed for a whole collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeMode {
    /// Sparse pairs from the dense adjacency matrix, no edge codes.
    #[default]
    AdjacencyOnly,
    /// Both directions of every bond with its bond-order code.
    WithBondFeatures,
}

impl EdgeMode {
    pub fn num_edge_features(self) -> usize {
        match self {
            EdgeMode::AdjacencyOnly => 0,
            EdgeMode::WithBondFeatures => 1,
        }
    }
}

/// Builds the graph record for an already sanitized molecule.
pub fn molecule_to_graph(
    mol: &Mol<WithHybridization<Atom>, Bond>,
    smiles: &str,
    label: Vec<f64>,
    mode: EdgeMode,
) -> GraphRecord {
    let x = mol.atoms().map(|v| atom_features(mol, v)).collect();

    let (edge_index, edge_attr) = match mode {
        EdgeMode::AdjacencyOnly => (adjacency_edges(mol), None),
        EdgeMode::WithBondFeatures => {
            let (edges, codes) = bond_edges(mol);
            (edges, Some(codes))
        }
    };

    GraphRecord {
        x,
        edge_index,
        edge_attr,
        y: label,
        smiles: smiles.to_string(),
    }
}

/// Parses, sanitizes and converts one SMILES string.
pub fn smiles_to_graph(
    smiles: &str,
    label: Vec<f64>,
    mode: EdgeMode,
) -> Result<GraphRecord, SmilesError> {
    let mol = from_smiles(smiles)?;
    Ok(molecule_to_graph(&mol, smiles, label, mode))
}

/// Nonzero cells of the adjacency matrix, row-major.
fn adjacency_edges<A, B>(mol: &Mol<A, B>) -> Vec<[usize; 2]> {
    mol.adjacency_matrix()
        .iter()
        .enumerate()
        .flat_map(|(src, row)| {
            row.iter()
                .enumerate()
                .filter(|&(_, &cell)| cell != 0)
                .map(move |(dst, _)| [src, dst])
        })
        .collect()
}

/// Both directions of every bond, sorted by `src * n + dst`.
fn bond_edges(mol: &Mol<WithHybridization<Atom>, Bond>) -> (Vec<[usize; 2]>, Vec<f32>) {
    let n = mol.atom_count();
    let mut entries: Vec<([usize; 2], f32)> = Vec::with_capacity(2 * mol.bond_count());
    for e in mol.bonds() {
        let Some((a, b)) = mol.bond_endpoints(e) else {
            continue;
        };
        let code = bond_code(mol.bond(e));
        entries.push(([a.index(), b.index()], code));
        entries.push(([b.index(), a.index()], code));
    }
    entries.sort_by_key(|&([src, dst], _)| src * n + dst);
    entries.into_iter().unzip()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::AROMATIC_BOND_CODE;
    use crate::kekulize::KekulizeError;

    fn graph(smiles: &str, mode: EdgeMode) -> GraphRecord {
        smiles_to_graph(smiles, vec![1.0], mode).unwrap()
    }

    fn keys(g: &GraphRecord) -> Vec<usize> {
        let n = g.num_nodes();
        g.edge_index.iter().map(|&[s, d]| s * n + d).collect()
    }

    #[test]
    fn ethanol_adjacency() {
        let g = graph("CCO", EdgeMode::AdjacencyOnly);
        assert_eq!(g.x_shape(), [3, 5]);
        assert_eq!(g.edge_index, vec![[0, 1], [1, 0], [1, 2], [2, 1]]);
        assert!(g.edge_attr.is_none());
        assert_eq!(g.smiles, "CCO");
    }

    #[test]
    fn water_has_no_edges() {
        for mode in [EdgeMode::AdjacencyOnly, EdgeMode::WithBondFeatures] {
            let g = graph("O", mode);
            assert_eq!(g.x_shape(), [1, 5]);
            assert!(g.edge_index.is_empty());
        }
        let g = graph("O", EdgeMode::WithBondFeatures);
        assert_eq!(g.edge_attr, Some(vec![]));
    }

    #[test]
    fn bond_mode_emits_both_directions() {
        let g = graph("OC(=O)C#N", EdgeMode::WithBondFeatures);
        assert_eq!(g.num_edges(), 8);
        assert!(g.is_undirected());
        let attr = g.edge_attr.as_ref().unwrap();
        let code = |s: usize, d: usize| {
            let i = g.edge_index.iter().position(|&p| p == [s, d]).unwrap();
            attr[i]
        };
        assert_eq!(code(1, 2), 2.0);
        assert_eq!(code(2, 1), 2.0);
        assert_eq!(code(3, 4), 3.0);
        assert_eq!(code(0, 1), 1.0);
    }

    #[test]
    fn ring_closure_bonds_are_sorted() {
        // The closing bond 5-0 is emitted last but sorts first.
        let g = graph("c1ccccc1", EdgeMode::WithBondFeatures);
        assert_eq!(g.edge_index[0], [0, 1]);
        assert_eq!(g.edge_index[1], [0, 5]);
        let k = keys(&g);
        assert!(k.windows(2).all(|w| w[0] <= w[1]));
        assert!(g
            .edge_attr
            .unwrap()
            .iter()
            .all(|&c| c == AROMATIC_BOND_CODE));
    }

    #[test]
    fn both_modes_share_edge_order() {
        for smiles in ["Cn1cnc2c1c(=O)n(c(=O)n2C)C", "CC(C)(C)O", "C1CC2CCC1C2"] {
            let adj = graph(smiles, EdgeMode::AdjacencyOnly);
            let bonds = graph(smiles, EdgeMode::WithBondFeatures);
            assert_eq!(adj.edge_index, bonds.edge_index, "{smiles}");
        }
    }

    #[test]
    fn resorting_is_idempotent() {
        let g = graph("CC(=O)Nc1ccc(O)cc1", EdgeMode::WithBondFeatures);
        let mut pairs: Vec<([usize; 2], f32)> = g
            .edge_index
            .iter()
            .copied()
            .zip(g.edge_attr.clone().unwrap())
            .collect();
        let n = g.num_nodes();
        pairs.sort_by_key(|&([s, d], _)| s * n + d);
        let (edges, attr): (Vec<_>, Vec<_>) = pairs.into_iter().unzip();
        assert_eq!(edges, g.edge_index);
        assert_eq!(Some(attr), g.edge_attr);
    }

    #[test]
    fn parse_failure_is_reported() {
        assert!(smiles_to_graph("C1CC", vec![0.0], EdgeMode::AdjacencyOnly).is_err());
    }

    #[test]
    fn aromatic_atoms_outside_rings_are_rejected() {
        for smiles in ["c", "cc", "Cc", "c1ccccc1o"] {
            assert!(
                matches!(
                    smiles_to_graph(smiles, vec![0.0], EdgeMode::AdjacencyOnly),
                    Err(SmilesError::Kekulize(KekulizeError::NonRingAromatic(_)))
                ),
                "{smiles}"
            );
        }
    }
}

use serde::{Deserialize, Serialize};

use crate::features::{AtomFeatures, NUM_ATOM_FEATURES};

/// One molecule as a graph: node features, directed edges, optional edge
/// codes, and its label row.
///
/// `edge_index` holds each bond twice, once per direction. When present,
/// `edge_attr` is parallel to `edge_index`. `y` is a single row of `k`
/// label values, i.e. shape `[1, k]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphRecord {
    pub x: Vec<AtomFeatures>,
    pub edge_index: Vec<[usize; 2]>,
    pub edge_attr: Option<Vec<f32>>,
    pub y: Vec<f64>,
    pub smiles: String,
}

impl GraphRecord {
    pub fn num_nodes(&self) -> usize {
        self.x.len()
    }

    /// Directed edge count, twice the bond count.
    pub fn num_edges(&self) -> usize {
        self.edge_index.len()
    }

    pub fn num_node_features(&self) -> usize {
        NUM_ATOM_FEATURES
    }

    pub fn num_edge_features(&self) -> usize {
        usize::from(self.edge_attr.is_some())
    }

    /// `[rows, columns]` of the node feature table.
    pub fn x_shape(&self) -> [usize; 2] {
        [self.num_nodes(), NUM_ATOM_FEATURES]
    }

    pub fn has_isolated_nodes(&self) -> bool {
        let mut touched = vec![false; self.num_nodes()];
        for &[src, dst] in &self.edge_index {
            touched[src] = true;
            touched[dst] = true;
        }
        touched.iter().any(|&t| !t)
    }

    pub fn has_self_loops(&self) -> bool {
        self.edge_index.iter().any(|&[src, dst]| src == dst)
    }

    /// Every edge has its reverse, with the same code when codes exist.
    pub fn is_undirected(&self) -> bool {
        let mut forward: Vec<([usize; 2], u32)> = self.keyed_edges(false);
        let mut reverse: Vec<([usize; 2], u32)> = self.keyed_edges(true);
        forward.sort_unstable();
        reverse.sort_unstable();
        forward == reverse
    }

    /// Mean out-degree over nodes, `0.0` for an empty graph.
    pub fn average_degree(&self) -> f64 {
        if self.x.is_empty() {
            return 0.0;
        }
        self.num_edges() as f64 / self.num_nodes() as f64
    }

    fn keyed_edges(&self, reversed: bool) -> Vec<([usize; 2], u32)> {
        self.edge_index
            .iter()
            .enumerate()
            .map(|(i, &[src, dst])| {
                let pair = if reversed { [dst, src] } else { [src, dst] };
                let code = self
                    .edge_attr
                    .as_ref()
                    .map_or(0, |attr| attr[i].to_bits());
                (pair, code)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(n: usize, edges: &[[usize; 2]], attr: Option<Vec<f32>>) -> GraphRecord {
        GraphRecord {
            x: vec![[6, 0, 0, 4, 0]; n],
            edge_index: edges.to_vec(),
            edge_attr: attr,
            y: vec![1.0],
            smiles: String::new(),
        }
    }

    #[test]
    fn counts_and_shape() {
        let g = record(3, &[[0, 1], [1, 0], [1, 2], [2, 1]], None);
        assert_eq!(g.num_nodes(), 3);
        assert_eq!(g.num_edges(), 4);
        assert_eq!(g.x_shape(), [3, 5]);
        assert_eq!(g.num_edge_features(), 0);
        assert!((g.average_degree() - 4.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn isolated_nodes_and_self_loops() {
        let g = record(3, &[[0, 1], [1, 0]], None);
        assert!(g.has_isolated_nodes());
        assert!(!g.has_self_loops());
        let g = record(1, &[[0, 0]], None);
        assert!(!g.has_isolated_nodes());
        assert!(g.has_self_loops());
    }

    #[test]
    fn undirected_checks_codes() {
        let g = record(2, &[[0, 1], [1, 0]], Some(vec![2.0, 2.0]));
        assert!(g.is_undirected());
        let g = record(2, &[[0, 1], [1, 0]], Some(vec![2.0, 1.0]));
        assert!(!g.is_undirected());
        let g = record(2, &[[0, 1]], None);
        assert!(!g.is_undirected());
    }

    #[test]
    fn empty_graph() {
        let g = record(0, &[], None);
        assert_eq!(g.average_degree(), 0.0);
        assert!(!g.has_isolated_nodes());
        assert!(g.is_undirected());
    }
}

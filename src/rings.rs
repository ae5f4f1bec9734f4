use std::collections::VecDeque;

use petgraph::algo::connected_components;
use petgraph::graph::NodeIndex;

use crate::mol::Mol;

/// Smallest set of smallest rings.
///
/// Each ring lists its atoms in traversal order, rotated so the lowest index
/// comes first. Rings are sorted by size.
#[derive(Debug, Clone, Default)]
pub struct RingInfo {
    rings: Vec<Vec<NodeIndex>>,
}

impl RingInfo {
    /// Candidates come from Horton's construction: for every root `r` and
    /// every bond `(x, y)`, the cycle `r → x - y → r` over shortest paths.
    /// The shortest linearly independent candidates (over GF(2) edge sets)
    /// form the basis.
    pub fn sssr<A, B>(mol: &Mol<A, B>) -> Self {
        let expected = Self::expected_ring_count(mol);
        if expected == 0 {
            return Self::default();
        }

        let mut candidates: Vec<(Vec<NodeIndex>, Vec<u64>)> = Vec::new();
        for root in mol.atoms() {
            let parent = bfs_parents(mol, root);
            for e in mol.bonds() {
                let Some((x, y)) = mol.bond_endpoints(e) else {
                    continue;
                };
                let (Some(px), Some(py)) = (path_to_root(&parent, x), path_to_root(&parent, y))
                else {
                    continue;
                };
                let disjoint = px[..px.len() - 1].iter().all(|v| !py.contains(v));
                if !disjoint {
                    continue;
                }
                let mut ring: Vec<NodeIndex> = px.iter().rev().copied().collect();
                ring.extend(&py[..py.len() - 1]);
                if ring.len() < 3 {
                    continue;
                }
                let ring = normalize(ring);
                let bits = edge_bits(mol, &ring);
                if !candidates.iter().any(|(_, b)| *b == bits) {
                    candidates.push((ring, bits));
                }
            }
        }

        candidates.sort_by(|a, b| a.0.len().cmp(&b.0.len()).then_with(|| a.0.cmp(&b.0)));

        let mut basis: Vec<Vec<u64>> = Vec::with_capacity(expected);
        let mut rings = Vec::with_capacity(expected);
        for (ring, bits) in candidates {
            if rings.len() == expected {
                break;
            }
            if insert_independent(&mut basis, bits) {
                rings.push(ring);
            }
        }

        Self { rings }
    }

    /// Cyclomatic number `E − V + C`.
    pub fn expected_ring_count<A, B>(mol: &Mol<A, B>) -> usize {
        let components = connected_components(mol.graph());
        (mol.bond_count() + components).saturating_sub(mol.atom_count())
    }

    pub fn rings(&self) -> &[Vec<NodeIndex>] {
        &self.rings
    }

    pub fn num_rings(&self) -> usize {
        self.rings.len()
    }

    pub fn is_ring_atom(&self, atom: NodeIndex) -> bool {
        self.rings.iter().any(|ring| ring.contains(&atom))
    }

    pub fn is_ring_bond(&self, a: NodeIndex, b: NodeIndex) -> bool {
        self.rings.iter().any(|ring| ring_edges(ring).any(|(x, y)| {
            (x == a && y == b) || (x == b && y == a)
        }))
    }
}

/// Consecutive atom pairs of a ring, including the closing pair.
pub(crate) fn ring_edges(ring: &[NodeIndex]) -> impl Iterator<Item = (NodeIndex, NodeIndex)> + '_ {
    (0..ring.len()).map(move |i| (ring[i], ring[(i + 1) % ring.len()]))
}

fn bfs_parents<A, B>(mol: &Mol<A, B>, root: NodeIndex) -> Vec<Option<NodeIndex>> {
    let mut parent = vec![None; mol.atom_count()];
    let mut seen = vec![false; mol.atom_count()];
    let mut queue = VecDeque::from([root]);
    seen[root.index()] = true;
    while let Some(v) = queue.pop_front() {
        let mut next: Vec<NodeIndex> = mol.neighbors(v).collect();
        next.sort();
        for w in next {
            if !seen[w.index()] {
                seen[w.index()] = true;
                parent[w.index()] = Some(v);
                queue.push_back(w);
            }
        }
    }
    parent[root.index()] = Some(root);
    parent
}

/// `v, parent(v), …, root`; `None` if `v` is unreachable.
fn path_to_root(parent: &[Option<NodeIndex>], v: NodeIndex) -> Option<Vec<NodeIndex>> {
    let mut path = vec![v];
    let mut cur = v;
    loop {
        let p = parent[cur.index()]?;
        if p == cur {
            return Some(path);
        }
        path.push(p);
        cur = p;
    }
}

fn normalize(ring: Vec<NodeIndex>) -> Vec<NodeIndex> {
    let len = ring.len();
    let start = (0..len).min_by_key(|&i| ring[i]).unwrap_or(0);
    let forward: Vec<NodeIndex> = (0..len).map(|k| ring[(start + k) % len]).collect();
    let backward: Vec<NodeIndex> = (0..len).map(|k| ring[(start + len - k) % len]).collect();
    forward.min(backward)
}

fn edge_bits<A, B>(mol: &Mol<A, B>, ring: &[NodeIndex]) -> Vec<u64> {
    let mut bits = vec![0u64; mol.bond_count().div_ceil(64)];
    for (a, b) in ring_edges(ring) {
        if let Some(e) = mol.bond_between(a, b) {
            bits[e.index() / 64] ^= 1 << (e.index() % 64);
        }
    }
    bits
}

fn leading_bit(bits: &[u64]) -> Option<usize> {
    bits.iter()
        .enumerate()
        .rev()
        .find(|(_, &w)| w != 0)
        .map(|(i, w)| i * 64 + 63 - w.leading_zeros() as usize)
}

/// Reduces `bits` against the basis and keeps it if anything remains.
fn insert_independent(basis: &mut Vec<Vec<u64>>, mut bits: Vec<u64>) -> bool {
    while let Some(lead) = leading_bit(&bits) {
        match basis.iter().find(|b| leading_bit(b) == Some(lead)) {
            Some(row) => {
                for (w, r) in bits.iter_mut().zip(row) {
                    *w ^= r;
                }
            }
            None => {
                basis.push(bits);
                return true;
            }
        }
    }
    false
}

//! Kekulization: concrete single/double bonds for aromatic systems.
//!
//! Atoms joined by aromatic SMILES bonds that still lack one valence unit
//! must each receive exactly one double bond within the aromatic subgraph.
//! That is a perfect matching problem on those atoms, solved here with
//! alternating-path augmentation.

use petgraph::graph::{EdgeIndex, NodeIndex};
use thiserror::Error;

use crate::atom::Atom;
use crate::bond::{Bond, BondOrder, SmilesBond, SmilesBondOrder};
use crate::element::Element;
use crate::mol::Mol;
use crate::rings::RingInfo;

/// No Kekulé structure exists for the aromatic system.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KekulizeError {
    #[error("cannot kekulize aromatic system: unmatched atoms {}", format_atoms(.0))]
    Unkekulizable(Vec<NodeIndex>),

    #[error("aromatic atoms outside any ring: {}", format_atoms(.0))]
    NonRingAromatic(Vec<NodeIndex>),
}

fn format_atoms(atoms: &[NodeIndex]) -> String {
    let list: Vec<String> = atoms.iter().map(|a| a.index().to_string()).collect();
    format!("[{}]", list.join(", "))
}

/// Replaces aromatic bonds with alternating single/double orders.
///
/// Aromatic atoms must lie on a ring.
///
/// Bonds written aromatic keep `is_aromatic = true` on the result; all
/// other bonds and every atom are carried over unchanged.
pub fn kekulize(mol: Mol<Atom, SmilesBond>) -> Result<Mol<Atom, Bond>, KekulizeError> {
    let n = mol.atom_count();

    let rings = RingInfo::sssr(&mol);
    let outside: Vec<NodeIndex> = mol
        .atoms()
        .filter(|&v| mol.atom(v).is_aromatic && !rings.is_ring_atom(v))
        .collect();
    if !outside.is_empty() {
        return Err(KekulizeError::NonRingAromatic(outside));
    }

    let mut aromatic_adj: Vec<Vec<(NodeIndex, EdgeIndex)>> = vec![Vec::new(); n];
    for e in mol.bonds() {
        if mol.bond(e).order != SmilesBondOrder::Aromatic {
            continue;
        }
        if let Some((a, b)) = mol.bond_endpoints(e) {
            aromatic_adj[a.index()].push((b, e));
            aromatic_adj[b.index()].push((a, e));
        }
    }

    let needs_double: Vec<bool> = mol
        .atoms()
        .map(|v| !aromatic_adj[v.index()].is_empty() && lacks_one_valence(&mol, v))
        .collect();

    let mut matching = Matching {
        adj: &aromatic_adj,
        eligible: &needs_double,
        mate: vec![None; n],
    };

    let mut candidates: Vec<NodeIndex> = mol.atoms().filter(|v| needs_double[v.index()]).collect();
    // Constrained atoms first keeps augmenting paths short.
    candidates.sort_by_key(|v| {
        aromatic_adj[v.index()]
            .iter()
            .filter(|(w, _)| needs_double[w.index()])
            .count()
    });

    for &v in &candidates {
        if matching.mate[v.index()].is_none() {
            let mut visited = vec![false; n];
            matching.augment(v, &mut visited);
        }
    }

    let unmatched: Vec<NodeIndex> = candidates
        .iter()
        .copied()
        .filter(|v| matching.mate[v.index()].is_none())
        .collect();
    if !unmatched.is_empty() {
        let mut unmatched = unmatched;
        unmatched.sort();
        return Err(KekulizeError::Unkekulizable(unmatched));
    }

    let doubled: Vec<EdgeIndex> = matching.mate.iter().flatten().map(|&(_, e)| e).collect();

    let mut out = Mol::new();
    for v in mol.atoms() {
        out.add_atom(mol.atom(v).clone());
    }
    for e in mol.bonds() {
        let Some((a, b)) = mol.bond_endpoints(e) else {
            continue;
        };
        let written = mol.bond(e).order;
        let order = match written {
            SmilesBondOrder::Aromatic if doubled.contains(&e) => BondOrder::Double,
            SmilesBondOrder::Aromatic | SmilesBondOrder::Single | SmilesBondOrder::Implicit => {
                BondOrder::Single
            }
            SmilesBondOrder::Double => BondOrder::Double,
            SmilesBondOrder::Triple => BondOrder::Triple,
        };
        out.add_bond(
            a,
            b,
            Bond {
                order,
                is_aromatic: written == SmilesBondOrder::Aromatic,
            },
        );
    }
    Ok(out)
}

/// True when the atom is exactly one valence unit short of its target.
fn lacks_one_valence(mol: &Mol<Atom, SmilesBond>, v: NodeIndex) -> bool {
    let atom = mol.atom(v);
    let Some(element) = Element::from_atomic_num(atom.atomic_num) else {
        return false;
    };
    let used: i16 = mol
        .bonds_of(v)
        .map(|e| mol.bond(e).order.valence_contribution() as i16)
        .sum::<i16>()
        + atom.hydrogen_count as i16;

    let charge = atom.formal_charge as i16;
    // Charge removes a bonding slot from B and C, adds one to N, O, S and P.
    let shift = if element.outer_shell_electrons() <= 4 {
        -charge.abs()
    } else {
        charge
    };

    element
        .default_valences()
        .iter()
        .map(|&val| val as i16 + shift)
        .find(|&val| val >= used)
        .is_some_and(|target| target - used == 1)
}

struct Matching<'a> {
    adj: &'a [Vec<(NodeIndex, EdgeIndex)>],
    eligible: &'a [bool],
    mate: Vec<Option<(NodeIndex, EdgeIndex)>>,
}

impl Matching<'_> {
    /// Depth-first search for an alternating path from the unmatched atom
    /// `u` to another unmatched atom, flipping it on success.
    fn augment(&mut self, u: NodeIndex, visited: &mut [bool]) -> bool {
        visited[u.index()] = true;
        let adj = self.adj;
        for &(w, e) in &adj[u.index()] {
            if !self.eligible[w.index()] || visited[w.index()] {
                continue;
            }
            visited[w.index()] = true;
            let free = match self.mate[w.index()] {
                None => true,
                Some((x, _)) => !visited[x.index()] && self.augment_from_matched(x, w, visited),
            };
            if free {
                self.mate[u.index()] = Some((w, e));
                self.mate[w.index()] = Some((u, e));
                return true;
            }
        }
        false
    }

    /// `x` is currently matched to `w`; try to rematch `x` elsewhere.
    fn augment_from_matched(&mut self, x: NodeIndex, w: NodeIndex, visited: &mut [bool]) -> bool {
        let saved = self.mate[x.index()];
        self.mate[x.index()] = None;
        if self.augment(x, visited) {
            true
        } else {
            self.mate[x.index()] = saved;
            self.mate[w.index()] = saved.map(|(_, e)| (x, e));
            false
        }
    }
}

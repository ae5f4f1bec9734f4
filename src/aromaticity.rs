use petgraph::graph::NodeIndex;

use crate::atom::Atom;
use crate::bond::{Bond, BondOrder};
use crate::mol::Mol;
use crate::rings::{ring_edges, RingInfo};
use crate::traits::{HasAtomicNum, HasBondOrder, HasFormalCharge, HasHydrogenCount};
use crate::valence::total_degree;

/// Elements that can take part in a planar π system.
const SP2_CAPABLE: [u8; 9] = [
    5,  // B
    6,  // C
    7,  // N
    8,  // O
    15, // P
    16, // S
    33, // As
    34, // Se
    52, // Te
];

/// SSSR rings that pass the Hückel `4n + 2` test on a Kekulé structure.
pub fn aromatic_rings<A, B>(mol: &Mol<A, B>) -> Vec<Vec<NodeIndex>>
where
    A: HasAtomicNum + HasFormalCharge + HasHydrogenCount,
    B: HasBondOrder,
{
    let info = RingInfo::sssr(mol);
    info.rings()
        .iter()
        .filter(|ring| is_aromatic_ring(mol, ring, &info))
        .cloned()
        .collect()
}

/// Marks atoms and bonds of every aromatic ring.
///
/// Flags are only ever set: anything written aromatic in the input stays
/// aromatic even when its ring fails the test.
pub fn perceive_aromaticity(mol: &mut Mol<Atom, Bond>) {
    for ring in aromatic_rings(mol) {
        for &v in &ring {
            mol.atom_mut(v).is_aromatic = true;
        }
        for (a, b) in ring_edges(&ring) {
            if let Some(e) = mol.bond_between(a, b) {
                mol.bond_mut(e).is_aromatic = true;
            }
        }
    }
}

fn is_aromatic_ring<A, B>(mol: &Mol<A, B>, ring: &[NodeIndex], info: &RingInfo) -> bool
where
    A: HasAtomicNum + HasFormalCharge + HasHydrogenCount,
    B: HasBondOrder,
{
    if ring
        .iter()
        .any(|&v| !SP2_CAPABLE.contains(&mol.atom(v).atomic_num()))
    {
        return false;
    }

    let has_triple = ring_edges(ring).any(|(a, b)| {
        mol.bond_between(a, b)
            .is_some_and(|e| mol.bond(e).bond_order() == BondOrder::Triple)
    });
    if has_triple {
        return false;
    }

    let mut total: u8 = 0;
    for (i, &v) in ring.iter().enumerate() {
        match pi_electrons(mol, v, ring, i, info) {
            Some(e) => total = total.saturating_add(e),
            None => return false,
        }
    }
    is_huckel(total)
}

/// π electrons the atom donates to the ring, `None` if it breaks the
/// conjugation.
fn pi_electrons<A, B>(
    mol: &Mol<A, B>,
    v: NodeIndex,
    ring: &[NodeIndex],
    pos: usize,
    info: &RingInfo,
) -> Option<u8>
where
    A: HasAtomicNum + HasFormalCharge + HasHydrogenCount,
    B: HasBondOrder,
{
    let atom = mol.atom(v);
    let has_double = mol
        .bonds_of(v)
        .any(|e| mol.bond(e).bond_order() == BondOrder::Double);
    let double_in_ring = has_double_to_ring_neighbor(mol, v, ring, pos);
    let degree = total_degree(mol, v);

    match (atom.atomic_num(), atom.formal_charge()) {
        // A carbonyl-like carbon keeps its π electron outside the ring.
        (6, 0) if has_exocyclic_heteroatom_double(mol, v, info) => Some(0),
        (6, 0) => has_double.then_some(1),
        (6, -1) => Some(2),
        (6, 1) => Some(if has_double { 1 } else { 0 }),
        (7, 0) | (15, 0) | (33, 0) => {
            if has_double {
                Some(1)
            } else if degree <= 3 {
                Some(2)
            } else {
                None
            }
        }
        (7, 1) => double_in_ring.then_some(1),
        (7, -1) => Some(2),
        (8 | 16 | 34 | 52, _) => Some(if double_in_ring { 1 } else { 2 }),
        (5, _) => Some(if has_double { 1 } else { 0 }),
        _ => None,
    }
}

fn has_double_to_ring_neighbor<A, B>(
    mol: &Mol<A, B>,
    v: NodeIndex,
    ring: &[NodeIndex],
    pos: usize,
) -> bool
where
    B: HasBondOrder,
{
    let len = ring.len();
    let prev = ring[(pos + len - 1) % len];
    let next = ring[(pos + 1) % len];
    [prev, next].into_iter().any(|w| {
        mol.bond_between(v, w)
            .is_some_and(|e| mol.bond(e).bond_order() == BondOrder::Double)
    })
}

/// Double bond from `v` to N, O or S that is not part of any ring.
fn has_exocyclic_heteroatom_double<A, B>(mol: &Mol<A, B>, v: NodeIndex, info: &RingInfo) -> bool
where
    A: HasAtomicNum,
    B: HasBondOrder,
{
    mol.bonds_of(v).any(|e| {
        if mol.bond(e).bond_order() != BondOrder::Double {
            return false;
        }
        mol.other_end(e, v).is_some_and(|w| {
            matches!(mol.atom(w).atomic_num(), 7 | 8 | 16) && !info.is_ring_bond(v, w)
        })
    })
}

fn is_huckel(pi_electrons: u8) -> bool {
    pi_electrons >= 2 && (pi_electrons - 2) % 4 == 0
}

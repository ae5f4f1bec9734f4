//! Numeric encodings for atoms and bonds.

use petgraph::graph::NodeIndex;

use crate::bond::BondOrder;
use crate::mol::Mol;
use crate::traits::{HasAromaticity, HasAtomicNum, HasBondOrder, HasFormalCharge, HasHybridization};
use crate::wrappers::Hybridization;

/// Columns per node feature row.
pub const NUM_ATOM_FEATURES: usize = 5;

/// Edge code for aromatic bonds, distinct from the integer orders 1 to 3.
pub const AROMATIC_BOND_CODE: f32 = 1.5;

/// `[atomic_number, degree, formal_charge, hybridization_code, is_aromatic]`
pub type AtomFeatures = [i64; NUM_ATOM_FEATURES];

/// Feature row for one atom. Degree counts explicit neighbours only.
pub fn atom_features<A, B>(mol: &Mol<A, B>, idx: NodeIndex) -> AtomFeatures
where
    A: HasAtomicNum + HasFormalCharge + HasHybridization + HasAromaticity,
{
    let atom = mol.atom(idx);
    [
        atom.atomic_num() as i64,
        mol.degree(idx) as i64,
        atom.formal_charge() as i64,
        hybridization_code(atom.hybridization()),
        atom.is_aromatic() as i64,
    ]
}

pub fn hybridization_code(hybridization: Hybridization) -> i64 {
    match hybridization {
        Hybridization::Unspecified => 0,
        Hybridization::S => 1,
        Hybridization::SP => 2,
        Hybridization::SP2 => 3,
        Hybridization::SP3 => 4,
        Hybridization::SP3D => 5,
        Hybridization::SP3D2 => 6,
        Hybridization::Other => 7,
    }
}

/// Bond-order code; aromaticity overrides the Kekulé order.
pub fn bond_code<B: HasBondOrder + HasAromaticity>(bond: &B) -> f32 {
    if bond.is_aromatic() {
        return AROMATIC_BOND_CODE;
    }
    match bond.bond_order() {
        BondOrder::Single => 1.0,
        BondOrder::Double => 2.0,
        BondOrder::Triple => 3.0,
    }
}

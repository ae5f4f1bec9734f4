//! Hybridization from σ bonds plus lone pairs.

use petgraph::graph::NodeIndex;

use crate::conjugation::assign_conjugation;
use crate::element::outer_shell_electrons;
use crate::mol::Mol;
use crate::traits::{HasAromaticity, HasAtomicNum, HasBondOrder, HasFormalCharge, HasHydrogenCount};
use crate::valence::{num_radical_electrons, total_degree, total_valence};
use crate::wrappers::Hybridization;

fn bonds_plus_lone_pairs<A, B>(mol: &Mol<A, B>, idx: NodeIndex) -> i16
where
    A: HasAtomicNum + HasHydrogenCount + HasFormalCharge,
    B: HasBondOrder,
{
    let atom = mol.atom(idx);
    let degree = total_degree(mol, idx) as i16;
    if atom.atomic_num() <= 1 {
        return degree;
    }

    let n_outer = outer_shell_electrons(atom.atomic_num()) as i16;
    let valence = total_valence(mol, idx) as i16;
    let charge = atom.formal_charge() as i16;
    let free = n_outer - (valence + charge);

    if valence + n_outer - charge < 8 {
        let radicals = num_radical_electrons(mol, idx) as i16;
        degree + (free - radicals) / 2 + radicals
    } else {
        degree + free / 2
    }
}

/// Hybridization of one atom given whether any of its bonds is conjugated.
///
/// Four orbitals on an atom with at most three neighbours and a conjugated
/// bond means a lone pair in a p orbital, so the atom is SP2.
pub fn hybridization_of<A, B>(mol: &Mol<A, B>, idx: NodeIndex, conjugated: bool) -> Hybridization
where
    A: HasAtomicNum + HasHydrogenCount + HasFormalCharge,
    B: HasBondOrder,
{
    let atom = mol.atom(idx);
    if atom.atomic_num() == 0 {
        return Hybridization::Unspecified;
    }

    let orbitals = if atom.atomic_num() < 89 {
        bonds_plus_lone_pairs(mol, idx)
    } else {
        total_degree(mol, idx) as i16
    };

    match orbitals {
        i16::MIN..=1 => Hybridization::S,
        2 => Hybridization::SP,
        3 => Hybridization::SP2,
        4 if total_degree(mol, idx) <= 3 && conjugated => Hybridization::SP2,
        4 => Hybridization::SP3,
        5 => Hybridization::SP3D,
        6 => Hybridization::SP3D2,
        _ => Hybridization::Other,
    }
}

/// Hybridization of every atom, in atom order.
pub fn assign_hybridization<A, B>(mol: &Mol<A, B>) -> Vec<Hybridization>
where
    A: HasAtomicNum + HasHydrogenCount + HasFormalCharge + HasAromaticity,
    B: HasBondOrder + HasAromaticity,
{
    let conjugation = assign_conjugation(mol);
    mol.atoms()
        .map(|idx| {
            let conjugated = mol.bonds_of(idx).any(|e| conjugation[e.index()]);
            hybridization_of(mol, idx, conjugated)
        })
        .collect()
}

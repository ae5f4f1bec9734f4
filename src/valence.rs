//! Valence and unpaired-electron bookkeeping for sanitized molecules.

use petgraph::graph::NodeIndex;

use crate::element::{outer_shell_electrons, Element};
use crate::mol::Mol;
use crate::traits::{HasAtomicNum, HasBondOrder, HasFormalCharge, HasHydrogenCount};

/// Bond-order sum plus implicit hydrogens.
pub fn total_valence<A, B>(mol: &Mol<A, B>, atom: NodeIndex) -> u8
where
    A: HasHydrogenCount,
    B: HasBondOrder,
{
    mol.bonds_of(atom)
        .map(|e| mol.bond(e).bond_order().valence_contribution())
        .fold(mol.atom(atom).hydrogen_count(), u8::saturating_add)
}

/// Explicit neighbours plus implicit hydrogens.
pub(crate) fn total_degree<A, B>(mol: &Mol<A, B>, atom: NodeIndex) -> u8
where
    A: HasHydrogenCount,
{
    (mol.degree(atom) as u8).saturating_add(mol.atom(atom).hydrogen_count())
}

/// Unpaired electrons on an atom: `1` for `[CH3]`, `2` for `[CH2]`.
pub fn num_radical_electrons<A, B>(mol: &Mol<A, B>, idx: NodeIndex) -> u8
where
    A: HasAtomicNum + HasHydrogenCount + HasFormalCharge,
    B: HasBondOrder,
{
    let atom = mol.atom(idx);
    let atomic_num = atom.atomic_num();
    let charge = atom.formal_charge() as i16;
    let Some(element) = Element::from_atomic_num(atomic_num) else {
        return 0;
    };
    let n_outer = outer_shell_electrons(atomic_num) as i16;

    let valences = element.default_valences();
    if valences.is_empty() {
        // Bonded metals are assumed closed-shell; free ions keep the parity
        // of their remaining valence electrons.
        if mol.degree(idx) > 0 {
            return 0;
        }
        return (n_outer - charge).max(0).rem_euclid(2) as u8;
    }

    let valence = total_valence(mol, idx) as i16;
    let shell: i16 = if atomic_num <= 2 { 2 } else { 8 };

    let mut radicals = shell - n_outer - valence + charge;
    if radicals < 0 {
        radicals = valences
            .iter()
            .map(|&v| v as i16 - valence + charge)
            .find(|&r| r >= 0)
            .filter(|_| valences.len() > 1)
            .unwrap_or(0);
    }

    let from_outer = n_outer - valence - charge;
    if (0..radicals).contains(&from_outer) {
        radicals = from_outer;
    }

    radicals.max(0) as u8
}

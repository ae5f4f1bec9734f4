use petgraph::graph::{EdgeIndex, NodeIndex};

use crate::bond::BondOrder;
use crate::element::{outer_shell_electrons, Element};
use crate::mol::Mol;
use crate::traits::{HasAromaticity, HasAtomicNum, HasBondOrder, HasFormalCharge, HasHydrogenCount};
use crate::valence::{num_radical_electrons, total_degree, total_valence};

/// Electrons an atom could contribute to a π system, negative when it
/// cannot take part at all.
fn available_electrons<A, B>(mol: &Mol<A, B>, idx: NodeIndex) -> i16
where
    A: HasAtomicNum + HasHydrogenCount + HasFormalCharge,
    B: HasBondOrder,
{
    let atom = mol.atom(idx);
    let Some(&default_valence) = Element::from_atomic_num(atom.atomic_num())
        .and_then(|e| e.default_valences().first())
    else {
        return -1;
    };
    if default_valence <= 1 {
        return -1;
    }

    let degree = total_degree(mol, idx);
    if degree > 3 {
        return -1;
    }

    let n_outer = outer_shell_electrons(atom.atomic_num()) as i16;
    let lone = (n_outer - default_valence as i16 - atom.formal_charge() as i16).max(0);
    let radicals = num_radical_electrons(mol, idx) as i16;

    (default_valence as i16 - degree as i16) + lone - radicals
}

fn is_candidate<A, B>(mol: &Mol<A, B>, idx: NodeIndex) -> bool
where
    A: HasAtomicNum + HasHydrogenCount + HasFormalCharge,
    B: HasBondOrder,
{
    let atom = mol.atom(idx);
    let anum = atom.atomic_num();
    let Some(&default_valence) = Element::from_atomic_num(anum)
        .and_then(|e| e.default_valences().first())
    else {
        return false;
    };
    if default_valence <= 1 {
        return false;
    }
    if atom.formal_charge() == 0 && total_valence(mol, idx) > default_valence {
        return false;
    }

    // Heavier pnictogens and chalcogens only conjugate when terminal.
    let n_outer = outer_shell_electrons(anum);
    let row_ok =
        anum <= 10 || (n_outer != 5 && n_outer != 6) || (n_outer == 6 && total_degree(mol, idx) < 2);

    row_ok && available_electrons(mol, idx) > 0
}

/// Per-bond conjugation flags, indexed by `EdgeIndex::index()`.
///
/// Aromatic bonds are always conjugated. Otherwise a double or triple bond
/// is conjugated together with every other bond of an atom that joins it to
/// a further candidate atom.
pub fn assign_conjugation<A, B>(mol: &Mol<A, B>) -> Vec<bool>
where
    A: HasAtomicNum + HasHydrogenCount + HasFormalCharge + HasAromaticity,
    B: HasBondOrder + HasAromaticity,
{
    let mut conjugated = vec![false; mol.bond_count()];

    for e in mol.bonds() {
        let both_aromatic = mol
            .bond_endpoints(e)
            .is_some_and(|(a, b)| mol.atom(a).is_aromatic() && mol.atom(b).is_aromatic());
        if mol.bond(e).is_aromatic() || both_aromatic {
            conjugated[e.index()] = true;
        }
    }

    for center in mol.atoms() {
        if !is_candidate(mol, center) || !(2..=3).contains(&total_degree(mol, center)) {
            continue;
        }
        let bonds: Vec<EdgeIndex> = mol.bonds_of(center).collect();

        for &multiple in &bonds {
            if !matches!(mol.bond(multiple).bond_order(), BondOrder::Double | BondOrder::Triple) {
                continue;
            }
            let Some(partner) = mol.other_end(multiple, center) else {
                continue;
            };
            if !is_candidate(mol, partner) {
                continue;
            }

            for &other in &bonds {
                if other == multiple {
                    continue;
                }
                let Some(next) = mol.other_end(other, center) else {
                    continue;
                };
                if total_degree(mol, next) <= 3 && is_candidate(mol, next) {
                    conjugated[multiple.index()] = true;
                    conjugated[other.index()] = true;
                }
            }
        }
    }

    conjugated
}

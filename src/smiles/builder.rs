use petgraph::graph::NodeIndex;

use crate::atom::Atom;
use crate::bond::{SmilesBond, SmilesBondOrder};
use crate::mol::Mol;
use crate::smiles::parse_tree::ParseTree;
use crate::smiles::tokenizer::{AtomToken, BondToken};

pub fn build_mol(tree: &ParseTree) -> Mol<Atom, SmilesBond> {
    let mut mol = Mol::new();

    let nodes: Vec<NodeIndex> = tree
        .atoms
        .iter()
        .map(|tok| {
            mol.add_atom(Atom {
                atomic_num: tok.element.atomic_num(),
                formal_charge: tok.charge,
                isotope: tok.isotope,
                hydrogen_count: tok.hcount.unwrap_or(0),
                is_aromatic: tok.is_aromatic,
                atom_class: tok.atom_class,
            })
        })
        .collect();

    for bond in &tree.bonds {
        let order = resolve_bond_order(
            bond.bond,
            tree.atoms[bond.from].is_aromatic,
            tree.atoms[bond.to].is_aromatic,
        );
        mol.add_bond(nodes[bond.from], nodes[bond.to], SmilesBond { order });
    }

    for (tok, &node) in tree.atoms.iter().zip(&nodes) {
        if !tok.is_bracket() {
            let h = implicit_hydrogens(&mol, node, tok);
            mol.atom_mut(node).hydrogen_count = h;
        }
    }

    mol
}

fn resolve_bond_order(
    bond: Option<BondToken>,
    from_aromatic: bool,
    to_aromatic: bool,
) -> SmilesBondOrder {
    match bond {
        Some(BondToken::Single) | Some(BondToken::Directional) => SmilesBondOrder::Single,
        Some(BondToken::Double) => SmilesBondOrder::Double,
        Some(BondToken::Triple) => SmilesBondOrder::Triple,
        Some(BondToken::Aromatic) => SmilesBondOrder::Aromatic,
        None if from_aromatic && to_aromatic => SmilesBondOrder::Aromatic,
        None => SmilesBondOrder::Implicit,
    }
}

/// Hydrogens needed to reach the smallest default valence that covers the
/// explicit bonds. Aromatic atoms give one valence unit to the π system.
fn implicit_hydrogens(mol: &Mol<Atom, SmilesBond>, node: NodeIndex, tok: &AtomToken) -> u8 {
    let bond_sum: u8 = mol
        .bonds_of(node)
        .map(|e| mol.bond(e).order.valence_contribution())
        .fold(0u8, u8::saturating_add);

    let target = tok
        .element
        .default_valences()
        .iter()
        .copied()
        .find(|&v| v >= bond_sum);

    match target {
        Some(v) => {
            let h = v - bond_sum;
            if tok.is_aromatic {
                h.saturating_sub(1)
            } else {
                h
            }
        }
        None => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::smiles::parse_tree::build_parse_tree;
    use crate::smiles::tokenizer::tokenize;

    fn parse(s: &str) -> Mol<Atom, SmilesBond> {
        build_mol(&build_parse_tree(&tokenize(s).unwrap()).unwrap())
    }

    fn h(mol: &Mol<Atom, SmilesBond>, i: usize) -> u8 {
        mol.atom(NodeIndex::new(i)).hydrogen_count
    }

    #[test]
    fn saturated_hydrogens() {
        let mol = parse("CCO");
        assert_eq!((h(&mol, 0), h(&mol, 1), h(&mol, 2)), (3, 2, 1));
    }

    #[test]
    fn unsaturated_hydrogens() {
        let mol = parse("C=C");
        assert_eq!((h(&mol, 0), h(&mol, 1)), (2, 2));
        let mol = parse("C#N");
        assert_eq!((h(&mol, 0), h(&mol, 1)), (1, 0));
    }

    #[test]
    fn higher_valence_selected_when_needed() {
        let mol = parse("CS(=O)(=O)C");
        assert_eq!(h(&mol, 1), 0);
        let mol = parse("ClP(Cl)(Cl)(Cl)Cl");
        assert_eq!(h(&mol, 1), 0);
    }

    #[test]
    fn bracket_hydrogens_are_literal() {
        let mol = parse("[CH2]C");
        assert_eq!(h(&mol, 0), 2);
        let mol = parse("[C]");
        assert_eq!(h(&mol, 0), 0);
    }

    #[test]
    fn aromatic_atoms_lose_one_hydrogen() {
        let mol = parse("c1ccccc1");
        for i in 0..6 {
            assert_eq!(h(&mol, i), 1);
        }
        for e in mol.bonds() {
            assert_eq!(mol.bond(e).order, SmilesBondOrder::Aromatic);
        }
    }

    #[test]
    fn substituent_bond_is_implicit() {
        let mol = parse("Cc1ccccc1");
        let e = mol.bond_between(NodeIndex::new(0), NodeIndex::new(1)).unwrap();
        assert_eq!(mol.bond(e).order, SmilesBondOrder::Implicit);
        assert_eq!(h(&mol, 1), 0);
    }

    #[test]
    fn directional_bonds_are_single() {
        let mol = parse(r"F/C=C\F");
        let e = mol.bond_between(NodeIndex::new(0), NodeIndex::new(1)).unwrap();
        assert_eq!(mol.bond(e).order, SmilesBondOrder::Single);
        assert_eq!(h(&mol, 1), 1);
    }
}

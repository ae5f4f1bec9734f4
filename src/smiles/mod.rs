//! SMILES reading: tokenizer → parse tree → molecular graph.

mod builder;
pub mod error;
mod parse_tree;
mod tokenizer;

use crate::atom::Atom;
use crate::bond::{Bond, SmilesBond};
use crate::mol::Mol;
use crate::sanitize::sanitize;
use crate::wrappers::WithHybridization;
pub use error::SmilesError;

/// Parses a SMILES string into a graph exactly as written.
///
/// Bond orders are left as written (aromatic bonds stay aromatic) and no
/// perception is run. Atom and bond indices follow the string.
pub fn parse_smiles(s: &str) -> Result<Mol<Atom, SmilesBond>, SmilesError> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(SmilesError::EmptyInput);
    }
    let tokens = tokenizer::tokenize(trimmed)?;
    let tree = parse_tree::build_parse_tree(&tokens)?;
    Ok(builder::build_mol(&tree))
}

/// Parses and sanitizes: kekulization, aromaticity and hybridization.
pub fn from_smiles(s: &str) -> Result<Mol<WithHybridization<Atom>, Bond>, SmilesError> {
    Ok(sanitize(parse_smiles(s)?)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bond::SmilesBondOrder;
    use petgraph::graph::NodeIndex;

    fn n(i: usize) -> NodeIndex {
        NodeIndex::new(i)
    }

    fn atom(mol: &Mol<Atom, SmilesBond>, i: usize) -> &Atom {
        mol.atom(n(i))
    }

    #[test]
    fn ethanol() {
        let mol = parse_smiles("CCO").unwrap();
        assert_eq!(mol.atom_count(), 3);
        assert_eq!(mol.bond_count(), 2);
        assert_eq!(atom(&mol, 2).atomic_num, 8);
        assert_eq!(atom(&mol, 2).hydrogen_count, 1);
    }

    #[test]
    fn water() {
        let mol = parse_smiles("O").unwrap();
        assert_eq!(mol.atom_count(), 1);
        assert_eq!(mol.bond_count(), 0);
        assert_eq!(atom(&mol, 0).hydrogen_count, 2);
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        let mol = parse_smiles("  CC\n").unwrap();
        assert_eq!(mol.atom_count(), 2);
    }

    #[test]
    fn acetic_acid() {
        let mol = parse_smiles("CC(=O)O").unwrap();
        assert_eq!(mol.atom_count(), 4);
        assert_eq!(atom(&mol, 0).hydrogen_count, 3); // CH3
        assert_eq!(atom(&mol, 1).hydrogen_count, 0); // C(=O)O
        assert_eq!(atom(&mol, 2).hydrogen_count, 0); // =O
        assert_eq!(atom(&mol, 3).hydrogen_count, 1); // OH
        let e = mol.bond_between(n(1), n(2)).unwrap();
        assert_eq!(mol.bond(e).order, SmilesBondOrder::Double);
    }

    #[test]
    fn charges_and_isotopes() {
        let mol = parse_smiles("[NH4+].[2H][O-]").unwrap();
        assert_eq!(atom(&mol, 0).formal_charge, 1);
        assert_eq!(atom(&mol, 0).hydrogen_count, 4);
        assert_eq!(atom(&mol, 1).isotope, 2);
        assert_eq!(atom(&mol, 1).atomic_num, 1);
        assert_eq!(atom(&mol, 2).formal_charge, -1);
        assert_eq!(mol.bond_count(), 1);
    }

    #[test]
    fn atom_maps_are_kept() {
        let mol = parse_smiles("[CH3:1][OH:2]").unwrap();
        assert_eq!(atom(&mol, 0).atom_class, 1);
        assert_eq!(atom(&mol, 1).atom_class, 2);
    }

    #[test]
    fn caffeine() {
        let mol = parse_smiles("Cn1cnc2c1c(=O)n(c(=O)n2C)C").unwrap();
        assert_eq!(mol.atom_count(), 14);
        assert_eq!(mol.bond_count(), 15);
    }

    #[test]
    fn error_cases() {
        assert_eq!(parse_smiles("").unwrap_err(), SmilesError::EmptyInput);
        assert_eq!(parse_smiles("   ").unwrap_err(), SmilesError::EmptyInput);
        assert!(parse_smiles("C(C").is_err());
        assert!(parse_smiles("C1CC").is_err());
        assert!(parse_smiles("X").is_err());
        assert!(parse_smiles("[C").is_err());
        assert!(parse_smiles("not a smiles").is_err());
    }

    #[test]
    fn from_smiles_reports_kekulize_failure() {
        assert!(matches!(
            from_smiles("c1cccc1"),
            Err(SmilesError::Kekulize(_))
        ));
    }
}

use crate::aromaticity::perceive_aromaticity;
use crate::atom::Atom;
use crate::bond::{Bond, SmilesBond};
use crate::hybridization::assign_hybridization;
use crate::kekulize::{kekulize, KekulizeError};
use crate::mol::Mol;
use crate::wrappers::WithHybridization;

/// Kekulize, perceive aromaticity, then attach hybridization to every atom.
///
/// Atom and bond indices are preserved throughout.
pub fn sanitize(
    mol: Mol<Atom, SmilesBond>,
) -> Result<Mol<WithHybridization<Atom>, Bond>, KekulizeError> {
    let mut mol = kekulize(mol)?;
    perceive_aromaticity(&mut mol);
    let hybridization = assign_hybridization(&mol);
    Ok(mol.map_atoms(|idx, inner| WithHybridization {
        inner,
        hybridization: hybridization[idx.index()],
    }))
}

/// Concrete (Kekulé) bond order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BondOrder {
    #[default]
    Single,
    Double,
    Triple,
}

impl BondOrder {
    pub fn valence_contribution(self) -> u8 {
        match self {
            BondOrder::Single => 1,
            BondOrder::Double => 2,
            BondOrder::Triple => 3,
        }
    }
}

/// Bond of a sanitized molecule.
///
/// `order` is always a Kekulé assignment; `is_aromatic` records whether the
/// bond belongs to an aromatic system, either as written or as perceived.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bond {
    pub order: BondOrder,
    pub is_aromatic: bool,
}

impl crate::traits::HasBondOrder for Bond {
    fn bond_order(&self) -> BondOrder {
        self.order
    }
}

impl crate::traits::HasAromaticity for Bond {
    fn is_aromatic(&self) -> bool {
        self.is_aromatic
    }
}

/// Bond order exactly as written in a SMILES string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SmilesBondOrder {
    Single,
    Double,
    Triple,
    Aromatic,
    /// No bond symbol between two atoms.
    #[default]
    Implicit,
}

impl SmilesBondOrder {
    /// Contribution to the bond-order sum used for implicit hydrogens.
    /// Aromatic bonds count as single; the missing π bond is accounted for
    /// by the aromatic atom itself.
    pub fn valence_contribution(self) -> u8 {
        match self {
            SmilesBondOrder::Double => 2,
            SmilesBondOrder::Triple => 3,
            SmilesBondOrder::Single | SmilesBondOrder::Aromatic | SmilesBondOrder::Implicit => 1,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SmilesBond {
    pub order: SmilesBondOrder,
}

/// Atom stored on each node of a [`Mol`](crate::Mol).
///
/// Holds what a structural formula states directly. Perceived properties
/// such as hybridization are attached by wrapper types from
/// [`wrappers`](crate::wrappers).
///
/// # Examples
///
/// ```
/// use molgraph::Atom;
///
/// let oxygen = Atom {
///     atomic_num: 8,
///     hydrogen_count: 2,
///     ..Atom::default()
/// };
/// assert_eq!(oxygen.formal_charge, 0);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Atom {
    /// Atomic number (1 = H, 6 = C, …).
    pub atomic_num: u8,
    /// Formal charge in elementary charge units.
    pub formal_charge: i8,
    /// Mass number, `0` for natural abundance.
    pub isotope: u16,
    /// Implicit hydrogens. These are not graph nodes.
    pub hydrogen_count: u8,
    /// Set by the parser for lowercase atoms and by aromaticity perception.
    pub is_aromatic: bool,
    /// Atom map number from `[C:7]`.
    pub atom_class: u16,
}

impl crate::traits::HasAtomicNum for Atom {
    fn atomic_num(&self) -> u8 {
        self.atomic_num
    }
}

impl crate::traits::HasFormalCharge for Atom {
    fn formal_charge(&self) -> i8 {
        self.formal_charge
    }
}

impl crate::traits::HasHydrogenCount for Atom {
    fn hydrogen_count(&self) -> u8 {
        self.hydrogen_count
    }
}

impl crate::traits::HasAromaticity for Atom {
    fn is_aromatic(&self) -> bool {
        self.is_aromatic
    }
}

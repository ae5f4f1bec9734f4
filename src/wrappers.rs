use crate::traits::*;

/// Orbital hybridization of an atom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Hybridization {
    /// Nothing was assigned (dummy atoms, atomic number 0).
    Unspecified,
    S,
    SP,
    SP2,
    #[default]
    SP3,
    SP3D,
    SP3D2,
    Other,
}

/// Attaches a perceived hybridization to an atom type.
#[derive(Debug, Clone, PartialEq)]
pub struct WithHybridization<T> {
    pub inner: T,
    pub hybridization: Hybridization,
}

impl<T> HasHybridization for WithHybridization<T> {
    fn hybridization(&self) -> Hybridization {
        self.hybridization
    }
}

macro_rules! delegate_trait {
    ($wrapper:ident, $trait:ident, $method:ident, $ret:ty) => {
        impl<T: $trait> $trait for $wrapper<T> {
            fn $method(&self) -> $ret {
                self.inner.$method()
            }
        }
    };
}

delegate_trait!(WithHybridization, HasAtomicNum, atomic_num, u8);
delegate_trait!(WithHybridization, HasFormalCharge, formal_charge, i8);
delegate_trait!(WithHybridization, HasHydrogenCount, hydrogen_count, u8);
delegate_trait!(WithHybridization, HasAromaticity, is_aromatic, bool);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atom::Atom;

    #[test]
    fn wrapper_delegates_atom_properties() {
        let wrapped = WithHybridization {
            inner: Atom {
                atomic_num: 7,
                formal_charge: 1,
                hydrogen_count: 4,
                ..Atom::default()
            },
            hybridization: Hybridization::SP3,
        };
        assert_eq!(wrapped.atomic_num(), 7);
        assert_eq!(wrapped.formal_charge(), 1);
        assert_eq!(wrapped.hydrogen_count(), 4);
        assert!(!wrapped.is_aromatic());
        assert_eq!(wrapped.hybridization(), Hybridization::SP3);
    }
}

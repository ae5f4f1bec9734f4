use thiserror::Error;

use crate::kekulize::KekulizeError;

/// Errors produced while reading a SMILES string.
///
/// Positions are character offsets into the trimmed input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SmilesError {
    #[error("empty SMILES string")]
    EmptyInput,

    #[error("unexpected character '{ch}' at position {pos}")]
    UnexpectedChar { pos: usize, ch: char },

    #[error("invalid element '{text}' at position {pos}")]
    InvalidElement { pos: usize, text: String },

    #[error("unclosed bracket atom starting at position {pos}")]
    UnclosedBracket { pos: usize },

    #[error("invalid charge in bracket atom at position {pos}")]
    InvalidCharge { pos: usize },

    #[error("isotope overflow in bracket atom at position {pos}")]
    InvalidIsotope { pos: usize },

    #[error("unclosed ring {digit}")]
    UnclosedRing { digit: u16 },

    #[error("unmatched parenthesis at position {pos}")]
    UnmatchedParen { pos: usize },

    #[error("ring closure {digit} at position {pos} has no preceding atom")]
    DanglingRingClosure { digit: u16, pos: usize },

    #[error("ring closure {digit} at position {pos} bonds an atom to itself")]
    RingSelfLoop { digit: u16, pos: usize },

    #[error("duplicate bond closed by ring {digit} at position {pos}")]
    DuplicateBond { digit: u16, pos: usize },

    #[error("conflicting bond types on ring closure {digit}")]
    RingBondConflict { digit: u16 },

    #[error("bond symbol at position {pos} is not followed by an atom")]
    DanglingBond { pos: usize },

    #[error(transparent)]
    Kekulize(#[from] KekulizeError),
}

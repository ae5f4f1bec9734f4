use crate::smiles::error::SmilesError;
use crate::smiles::tokenizer::{AtomToken, BondToken, Token};

/// An edge of the parse tree, recorded when both ends are known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseBond {
    pub from: usize,
    pub to: usize,
    pub bond: Option<BondToken>,
}

/// Atoms in input order plus bonds in the order they were closed.
#[derive(Debug, Clone)]
pub struct ParseTree {
    pub atoms: Vec<AtomToken>,
    pub bonds: Vec<ParseBond>,
}

struct OpenRing {
    atom: usize,
    bond: Option<BondToken>,
}

#[derive(Default)]
struct TreeBuilder {
    atoms: Vec<AtomToken>,
    bonds: Vec<ParseBond>,
    branches: Vec<(usize, usize)>,
    current: Option<usize>,
    pending: Option<(BondToken, usize)>,
    rings: Vec<Option<OpenRing>>,
}

impl TreeBuilder {
    fn take_pending(&mut self) -> Option<BondToken> {
        self.pending.take().map(|(bond, _)| bond)
    }

    fn ensure_no_pending(&self) -> Result<(), SmilesError> {
        match self.pending {
            Some((_, pos)) => Err(SmilesError::DanglingBond { pos }),
            None => Ok(()),
        }
    }

    fn has_bond(&self, a: usize, b: usize) -> bool {
        self.bonds
            .iter()
            .any(|bd| (bd.from == a && bd.to == b) || (bd.from == b && bd.to == a))
    }

    fn atom(&mut self, tok: &AtomToken) {
        let idx = self.atoms.len();
        self.atoms.push(tok.clone());
        let bond = self.take_pending();
        if let Some(prev) = self.current {
            self.bonds.push(ParseBond {
                from: prev,
                to: idx,
                bond,
            });
        }
        self.current = Some(idx);
    }

    fn bond(&mut self, bond: BondToken, pos: usize) -> Result<(), SmilesError> {
        if self.current.is_none() || self.pending.is_some() {
            return Err(SmilesError::UnexpectedChar {
                pos,
                ch: bond_symbol(bond),
            });
        }
        self.pending = Some((bond, pos));
        Ok(())
    }

    fn ring_closure(&mut self, digit: u16, pos: usize) -> Result<(), SmilesError> {
        let cur = self
            .current
            .ok_or(SmilesError::DanglingRingClosure { digit, pos })?;
        let slot = digit as usize;
        if self.rings.len() <= slot {
            self.rings.resize_with(slot + 1, || None);
        }
        let here = self.take_pending();

        match self.rings[slot].take() {
            None => {
                self.rings[slot] = Some(OpenRing {
                    atom: cur,
                    bond: here,
                });
            }
            Some(open) => {
                if open.atom == cur {
                    return Err(SmilesError::RingSelfLoop { digit, pos });
                }
                if self.has_bond(open.atom, cur) {
                    return Err(SmilesError::DuplicateBond { digit, pos });
                }
                let bond = match (open.bond, here) {
                    (Some(a), Some(b)) if a != b => {
                        return Err(SmilesError::RingBondConflict { digit })
                    }
                    (a, b) => a.or(b),
                };
                self.bonds.push(ParseBond {
                    from: open.atom,
                    to: cur,
                    bond,
                });
            }
        }
        Ok(())
    }

    fn open_branch(&mut self, pos: usize) -> Result<(), SmilesError> {
        let cur = self.current.ok_or(SmilesError::UnmatchedParen { pos })?;
        self.branches.push((cur, pos));
        Ok(())
    }

    fn close_branch(&mut self, pos: usize) -> Result<(), SmilesError> {
        self.ensure_no_pending()?;
        let (atom, _) = self
            .branches
            .pop()
            .ok_or(SmilesError::UnmatchedParen { pos })?;
        self.current = Some(atom);
        Ok(())
    }

    fn dot(&mut self, pos: usize) -> Result<(), SmilesError> {
        self.ensure_no_pending()?;
        if !self.branches.is_empty() {
            return Err(SmilesError::UnexpectedChar { pos, ch: '.' });
        }
        self.current = None;
        Ok(())
    }

    fn finish(self) -> Result<ParseTree, SmilesError> {
        self.ensure_no_pending()?;
        if let Some(&(_, pos)) = self.branches.last() {
            return Err(SmilesError::UnmatchedParen { pos });
        }
        if let Some(digit) = self.rings.iter().position(Option::is_some) {
            return Err(SmilesError::UnclosedRing {
                digit: digit as u16,
            });
        }
        Ok(ParseTree {
            atoms: self.atoms,
            bonds: self.bonds,
        })
    }
}

fn bond_symbol(bond: BondToken) -> char {
    match bond {
        BondToken::Single => '-',
        BondToken::Double => '=',
        BondToken::Triple => '#',
        BondToken::Aromatic => ':',
        BondToken::Directional => '/',
    }
}

pub fn build_parse_tree(tokens: &[Token]) -> Result<ParseTree, SmilesError> {
    let mut builder = TreeBuilder::default();

    for token in tokens {
        match token {
            Token::Atom(atom) => builder.atom(atom),
            Token::Bond { bond, pos } => builder.bond(*bond, *pos)?,
            Token::RingClosure { digit, pos } => builder.ring_closure(*digit, *pos)?,
            Token::OpenParen(pos) => builder.open_branch(*pos)?,
            Token::CloseParen(pos) => builder.close_branch(*pos)?,
            Token::Dot(pos) => builder.dot(*pos)?,
        }
    }

    builder.finish()
}

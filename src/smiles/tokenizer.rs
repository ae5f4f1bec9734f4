use crate::element::Element;
use crate::smiles::error::SmilesError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Atom(AtomToken),
    Bond { bond: BondToken, pos: usize },
    RingClosure { digit: u16, pos: usize },
    OpenParen(usize),
    CloseParen(usize),
    Dot(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtomToken {
    pub element: Element,
    pub is_aromatic: bool,
    pub isotope: u16,
    /// `None` for bare atoms, whose hydrogens are implied by valence.
    pub hcount: Option<u8>,
    pub charge: i8,
    /// Atom map number after `:`, `0` when absent.
    pub atom_class: u16,
}

impl AtomToken {
    fn bare(element: Element, is_aromatic: bool) -> Self {
        Self {
            element,
            is_aromatic,
            isotope: 0,
            hcount: None,
            charge: 0,
            atom_class: 0,
        }
    }

    pub fn is_bracket(&self) -> bool {
        self.hcount.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BondToken {
    Single,
    Double,
    Triple,
    Aromatic,
    /// `/` or `\`. Double-bond geometry is not retained.
    Directional,
}

struct Scanner {
    chars: Vec<char>,
    pos: usize,
}

impl Scanner {
    fn new(input: &str) -> Self {
        Self {
            chars: input.chars().collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += 1;
        Some(ch)
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn digit(&mut self) -> Option<u8> {
        let d = self.peek()?.to_digit(10)?;
        self.pos += 1;
        Some(d as u8)
    }

    /// Reads a run of digits, `None` if there are none.
    fn number(&mut self) -> Option<Result<u16, ()>> {
        let mut value: Option<u16> = None;
        while let Some(d) = self.digit() {
            let next = value
                .unwrap_or(0)
                .checked_mul(10)
                .and_then(|v| v.checked_add(d as u16));
            match next {
                Some(v) => value = Some(v),
                None => return Some(Err(())),
            }
        }
        value.map(Ok)
    }
}

pub fn tokenize(input: &str) -> Result<Vec<Token>, SmilesError> {
    let mut sc = Scanner::new(input);
    let mut tokens = Vec::new();

    while let Some(ch) = sc.peek() {
        let pos = sc.pos;
        let token = match ch {
            '[' => Token::Atom(bracket_atom(&mut sc)?),
            'B' | 'C' | 'N' | 'O' | 'P' | 'S' | 'F' | 'I' => {
                sc.bump();
                let element = match (ch, sc.peek()) {
                    ('B', Some('r')) => {
                        sc.bump();
                        Element::BR
                    }
                    ('C', Some('l')) => {
                        sc.bump();
                        Element::CL
                    }
                    _ => organic_element(ch),
                };
                Token::Atom(AtomToken::bare(element, false))
            }
            'b' | 'c' | 'n' | 'o' | 'p' | 's' => {
                sc.bump();
                let element = organic_element(ch.to_ascii_uppercase());
                Token::Atom(AtomToken::bare(element, true))
            }
            '*' => {
                sc.bump();
                Token::Atom(AtomToken::bare(Element::DUMMY, false))
            }
            '-' | '=' | '#' | ':' | '/' | '\\' => {
                sc.bump();
                let bond = match ch {
                    '-' => BondToken::Single,
                    '=' => BondToken::Double,
                    '#' => BondToken::Triple,
                    ':' => BondToken::Aromatic,
                    _ => BondToken::Directional,
                };
                Token::Bond { bond, pos }
            }
            '(' => {
                sc.bump();
                Token::OpenParen(pos)
            }
            ')' => {
                sc.bump();
                Token::CloseParen(pos)
            }
            '.' => {
                sc.bump();
                Token::Dot(pos)
            }
            '%' => {
                sc.bump();
                match (sc.digit(), sc.digit()) {
                    (Some(d1), Some(d2)) => Token::RingClosure {
                        digit: d1 as u16 * 10 + d2 as u16,
                        pos,
                    },
                    _ => return Err(SmilesError::UnexpectedChar { pos, ch: '%' }),
                }
            }
            '0'..='9' => {
                let digit = sc.digit().unwrap_or(0) as u16;
                Token::RingClosure { digit, pos }
            }
            ch => return Err(SmilesError::UnexpectedChar { pos, ch }),
        };
        tokens.push(token);
    }

    Ok(tokens)
}

fn organic_element(upper: char) -> Element {
    match upper {
        'B' => Element::B,
        'C' => Element::C,
        'N' => Element::N,
        'O' => Element::O,
        'P' => Element::P,
        'S' => Element::S,
        'F' => Element::F,
        _ => Element::I,
    }
}

fn bracket_atom(sc: &mut Scanner) -> Result<AtomToken, SmilesError> {
    let start = sc.pos;
    sc.bump(); // '['

    let isotope = match sc.number() {
        Some(Ok(v)) => v,
        Some(Err(())) => return Err(SmilesError::InvalidIsotope { pos: start }),
        None => 0,
    };

    let (element, is_aromatic) = bracket_element(sc, start)?;

    // Chirality is accepted but not retained.
    if sc.eat('@') {
        sc.eat('@');
    }

    let hcount = if sc.eat('H') {
        sc.digit().unwrap_or(1)
    } else {
        0
    };

    let charge = bracket_charge(sc, start)?;

    let atom_class = if sc.eat(':') {
        match sc.number() {
            Some(Ok(v)) => v,
            _ => return Err(SmilesError::UnexpectedChar { pos: sc.pos, ch: ':' }),
        }
    } else {
        0
    };

    if !sc.eat(']') {
        return Err(SmilesError::UnclosedBracket { pos: start });
    }

    Ok(AtomToken {
        element,
        is_aromatic,
        isotope,
        hcount: Some(hcount),
        charge,
        atom_class,
    })
}

fn bracket_element(sc: &mut Scanner, start: usize) -> Result<(Element, bool), SmilesError> {
    let first = match sc.peek() {
        Some(ch) => ch,
        None => return Err(SmilesError::UnclosedBracket { pos: start }),
    };

    if first.is_ascii_lowercase() {
        let two: String = [Some(first), sc.peek_at(1)].iter().flatten().collect();
        let aromatic_two = match two.as_str() {
            "se" => Some(Element::SE),
            "te" => Some(Element::TE),
            "as" => Some(Element::AS),
            _ => None,
        };
        if let Some(element) = aromatic_two {
            sc.pos += 2;
            return Ok((element, true));
        }
        if matches!(first, 'b' | 'c' | 'n' | 'o' | 'p' | 's') {
            sc.pos += 1;
            return Ok((organic_element(first.to_ascii_uppercase()), true));
        }
    }

    if first == '*' {
        sc.pos += 1;
        return Ok((Element::DUMMY, false));
    }

    if first.is_ascii_uppercase() {
        if let Some(second) = sc.peek_at(1).filter(char::is_ascii_lowercase) {
            let symbol: String = [first, second].iter().collect();
            if let Some(element) = Element::from_symbol(&symbol) {
                sc.pos += 2;
                return Ok((element, false));
            }
        }
        if let Some(element) = Element::from_symbol(&first.to_string()) {
            sc.pos += 1;
            return Ok((element, false));
        }
    }

    Err(SmilesError::InvalidElement {
        pos: sc.pos,
        text: first.to_string(),
    })
}

fn bracket_charge(sc: &mut Scanner, start: usize) -> Result<i8, SmilesError> {
    let sign: i8 = match sc.peek() {
        Some('+') => 1,
        Some('-') => -1,
        _ => return Ok(0),
    };
    let symbol = if sign > 0 { '+' } else { '-' };
    sc.bump();

    if let Some(number) = sc.number() {
        let magnitude = number.map_err(|()| SmilesError::InvalidCharge { pos: start })?;
        return i8::try_from(magnitude)
            .map(|m| sign * m)
            .map_err(|_| SmilesError::InvalidCharge { pos: start });
    }

    let mut charge = sign;
    while sc.eat(symbol) {
        charge = charge
            .checked_add(sign)
            .ok_or(SmilesError::InvalidCharge { pos: start })?;
    }
    Ok(charge)
}

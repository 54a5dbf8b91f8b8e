//! Beam lines: flat ordered lists of signed references.

use std::fmt;

use crate::{Name, SourcePos};

/// Orientation of a line entry. `Minus` means traversed reflected.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Sign {
    #[default]
    Plus,
    Minus,
}

impl Sign {
    #[inline]
    #[must_use]
    pub const fn flip(self) -> Self {
        match self {
            Sign::Plus => Sign::Minus,
            Sign::Minus => Sign::Plus,
        }
    }

    pub const fn symbol(self) -> char {
        match self {
            Sign::Plus => '+',
            Sign::Minus => '-',
        }
    }
}

/// One signed reference to an element or line.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LineEntry {
    pub name: Name,
    pub sign: Sign,
}

impl LineEntry {
    pub fn new(name: Name, sign: Sign) -> Self {
        LineEntry { name, sign }
    }

    pub fn plus(name: impl Into<Name>) -> Self {
        LineEntry::new(name.into(), Sign::Plus)
    }

    pub fn minus(name: impl Into<Name>) -> Self {
        LineEntry::new(name.into(), Sign::Minus)
    }
}

impl fmt::Display for LineEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.sign.symbol(), self.name)
    }
}

/// A named, fully flattened beam line.
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Line {
    pub name: Name,
    pub entries: Vec<LineEntry>,
    pub pos: SourcePos,
}

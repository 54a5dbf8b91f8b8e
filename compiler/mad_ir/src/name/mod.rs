//! Case-insensitive identifiers.
//!
//! MAD identifiers are compared without regard to case. A `Name` stores the
//! trimmed, ASCII upper-cased form so that equality and hashing on the
//! stored text is already case-insensitive.

use std::borrow::Borrow;
use std::fmt;

/// A normalized (trimmed, upper-cased) identifier.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Name(Box<str>);

impl Name {
    /// Normalize raw identifier text.
    pub fn new(raw: &str) -> Self {
        Name(raw.trim().to_ascii_uppercase().into_boxed_str())
    }

    /// The normalized text.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether `raw` names the same symbol as `self`.
    pub fn matches(&self, raw: &str) -> bool {
        self.0.eq_ignore_ascii_case(raw.trim())
    }
}

impl From<&str> for Name {
    fn from(raw: &str) -> Self {
        Name::new(raw)
    }
}

impl From<&String> for Name {
    fn from(raw: &String) -> Self {
        Name::new(raw)
    }
}

impl Borrow<str> for Name {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Name {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name({})", self.0)
    }
}

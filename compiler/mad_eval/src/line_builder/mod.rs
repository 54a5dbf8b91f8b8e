//! Beam-line algebra.
//!
//! Lines are built bottom-up as flat lists of signed entries:
//! - a reference to an element yields one `+` entry;
//! - a reference to an existing line splices a copy of its entries;
//! - anything else is kept as a forward `+` reference;
//! - `N*body` repeats the body's list N times;
//! - `-body` reverses the list and flips every sign.

use mad_ir::{Line, LineEntry, Name, SourcePos};

use thiserror::Error;

use crate::{EntryTarget, SymbolTables};

/// A repetition that would flatten to more than `limit` entries.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
#[error("repeated line would exceed {limit} entries")]
pub struct LineOverflow {
    pub limit: usize,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LineBuilder {
    entries: Vec<LineEntry>,
}

impl LineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: Vec<LineEntry>) -> Self {
        LineBuilder { entries }
    }

    /// A single reference. The flag is false for a name that is neither an
    /// element nor a line.
    pub fn reference(name: Name, tables: &SymbolTables) -> (Self, bool) {
        match tables.resolve(&name) {
            EntryTarget::Element(_) => (Self::from_entries(vec![LineEntry::plus(name)]), true),
            EntryTarget::Line(line) => (Self::from_entries(line.entries.clone()), true),
            EntryTarget::Undefined => (Self::from_entries(vec![LineEntry::plus(name)]), false),
        }
    }

    #[must_use]
    pub fn concat(mut self, other: LineBuilder) -> Self {
        self.entries.extend(other.entries);
        self
    }

    /// `count*body`, with `count` as written in the source.
    ///
    /// `limit` caps the flattened length; 0 leaves only the allocation bound.
    pub fn repeat(count: &str, body: LineBuilder, limit: usize) -> Result<Self, LineOverflow> {
        let times = repeat_count(count);
        if times == 0 || body.is_empty() {
            return Ok(Self::new());
        }
        // Largest length a `Vec<LineEntry>` can allocate.
        let ceiling = (usize::MAX >> 1) / std::mem::size_of::<LineEntry>();
        let bound = if limit == 0 { ceiling } else { limit.min(ceiling) };
        let total = body
            .len()
            .checked_mul(times)
            .filter(|&total| total <= bound)
            .ok_or(LineOverflow { limit: bound })?;

        let mut entries = Vec::with_capacity(total);
        for _ in 0..times {
            entries.extend(body.entries.iter().cloned());
        }
        Ok(LineBuilder { entries })
    }

    #[must_use]
    pub fn reflect(mut self) -> Self {
        self.entries.reverse();
        for entry in &mut self.entries {
            entry.sign = entry.sign.flip();
        }
        self
    }

    pub fn entries(&self) -> &[LineEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn finish(self, name: Name, pos: SourcePos) -> Line {
        Line {
            name,
            entries: self.entries,
            pos,
        }
    }
}

/// Interpret repetition-count text the way `atof` followed by truncation
/// does: the longest numeric prefix counts, the rest is ignored.
///
/// Negative, non-numeric and NaN counts repeat zero times.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "saturating float-to-int cast of a checked non-negative value"
)]
pub fn repeat_count(text: &str) -> usize {
    let value = leading_float(text);
    if value.is_nan() || value < 1.0 {
        0
    } else {
        value.trunc() as usize
    }
}

/// Longest prefix of `text` (after leading whitespace) that parses as a
/// decimal float, or 0.0 if there is none.
fn leading_float(text: &str) -> f64 {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_start = end;
    end += count_digits(&bytes[end..]);
    let mut digits = end - int_start;
    if bytes.get(end) == Some(&b'.') {
        let frac = count_digits(&bytes[end + 1..]);
        digits += frac;
        end += 1 + frac;
    }
    if digits == 0 {
        return 0.0;
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end.min(bytes.len())..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }
    text[..end].parse().unwrap_or(0.0)
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

#[cfg(test)]
mod tests;

//! Captured comment text.

use crate::SourcePos;

/// A block of text captured verbatim in comment mode.
///
/// Text captured after the last line of input carries
/// [`SourcePos::END_OF_FILE`].
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Comment {
    pub text: String,
    pub pos: SourcePos,
}

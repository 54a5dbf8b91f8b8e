//! Comment-mode tracking and the captured comment list.

use mad_ir::{Comment, SourcePos};
use thiserror::Error;

/// An end-of-comment marker with no open comment block.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
#[error("end of comment without a matching begin")]
pub struct UnmatchedEnd;

/// Nesting counter for comment blocks plus the text they captured.
///
/// Comments are kept sorted by line; text captured at end of input sorts
/// last.
#[derive(Clone, Debug, Default)]
pub struct CommentLog {
    depth: u32,
    comments: Vec<Comment>,
}

impl CommentLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self) {
        self.depth = self.depth.saturating_add(1);
    }

    pub fn end(&mut self) -> Result<(), UnmatchedEnd> {
        if self.depth == 0 {
            return Err(UnmatchedEnd);
        }
        self.depth -= 1;
        Ok(())
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.depth > 0
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn capture(&mut self, text: impl Into<String>, pos: SourcePos) {
        let at = self.comments.partition_point(|c| c.pos.line <= pos.line);
        self.comments.insert(
            at,
            Comment {
                text: text.into(),
                pos,
            },
        );
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    /// The first comment captured at `line`.
    pub fn at_line(&self, line: u32) -> Option<&Comment> {
        let at = self.comments.partition_point(|c| c.pos.line < line);
        self.comments.get(at).filter(|c| c.pos.line == line)
    }

    /// Comments captured after the last line of input.
    pub fn trailing(&self) -> impl Iterator<Item = &Comment> {
        self.comments.iter().filter(|c| c.pos.is_end_of_file())
    }

    pub fn len(&self) -> usize {
        self.comments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }
}

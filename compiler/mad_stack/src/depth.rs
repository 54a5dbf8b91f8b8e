//! Logical recursion-depth accounting.

use std::fmt;

/// Raised by [`DepthGuard::enter`] when the limit would be exceeded.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DepthExceeded {
    pub limit: usize,
}

impl fmt::Display for DepthExceeded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "recursion depth limit of {} exceeded", self.limit)
    }
}

impl std::error::Error for DepthExceeded {}

/// Counts nested `enter`/`exit` pairs against a fixed limit.
///
/// A limit of 0 disables the check.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DepthGuard {
    depth: usize,
    limit: usize,
}

impl DepthGuard {
    pub const fn new(limit: usize) -> Self {
        DepthGuard { depth: 0, limit }
    }

    pub const fn unlimited() -> Self {
        DepthGuard::new(0)
    }

    /// Descend one level.
    #[inline]
    pub fn enter(&mut self) -> Result<(), DepthExceeded> {
        if self.limit > 0 && self.depth >= self.limit {
            return Err(DepthExceeded { limit: self.limit });
        }
        self.depth += 1;
        Ok(())
    }

    /// Return from a level entered with a successful `enter`.
    #[inline]
    pub fn exit(&mut self) {
        debug_assert!(self.depth > 0, "DepthGuard::exit without enter");
        self.depth = self.depth.saturating_sub(1);
    }

    #[inline]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    #[inline]
    pub const fn limit(&self) -> usize {
        self.limit
    }
}

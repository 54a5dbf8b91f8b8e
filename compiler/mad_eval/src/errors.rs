//! Fatal errors: the conditions that end a run.

use mad_diagnostic::{errors, Diagnostic};
use mad_ir::{ArenaError, SourcePos};
use thiserror::Error;

/// A condition that stops the run.
///
/// Everything else is a recoverable diagnostic.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum FatalError {
    /// A string constant or literal used where a number is required.
    #[error("string constant {symbol} used in an algebraic expression")]
    StringInAlgebra { symbol: String, pos: SourcePos },

    /// A repetition whose flattened result exceeds the entry limit.
    #[error("repeated line would exceed {limit} entries")]
    LineTooLong { limit: usize, pos: SourcePos },

    /// A stale or double-released arena handle.
    #[error("internal error: {0}")]
    Arena(#[from] ArenaError),
}

impl FatalError {
    pub fn string_in_algebra(symbol: impl Into<String>, pos: SourcePos) -> Self {
        FatalError::StringInAlgebra {
            symbol: symbol.into(),
            pos,
        }
    }

    /// The diagnostic to report; `fallback` is used when the error
    /// carries no position of its own.
    pub fn to_diagnostic(&self, fallback: SourcePos) -> Diagnostic {
        match self {
            FatalError::StringInAlgebra { symbol, pos } => errors::string_in_algebra(symbol, *pos),
            FatalError::LineTooLong { limit, pos } => errors::line_too_long(*limit, *pos),
            FatalError::Arena(err) => errors::internal(err, fallback),
        }
    }
}

pub type EvalResult<T> = Result<T, FatalError>;

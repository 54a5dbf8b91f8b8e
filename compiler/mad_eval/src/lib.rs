//! MAD Eval - the semantic core of the MAD deck interpreter
//!
//! Consumes parsed [`Statement`](mad_ir::Statement)s and maintains four
//! case-insensitive symbol tables:
//!
//! - **Constants**: evaluated once, when defined.
//! - **Variables**: expressions re-evaluated on every lookup, so they follow
//!   later changes to the variables and elements they reference.
//! - **Elements**: kind-tagged attribute slots filled by the
//!   [`ElementBuilder`].
//! - **Lines**: flat signed reference lists produced by the
//!   [`LineBuilder`] from concatenation, repetition and reflection.
//!
//! Recoverable conditions are reported as diagnostics and replaced by a
//! neutral value. The only fatal conditions are a string used as a number
//! and internal arena corruption; both surface as [`FatalError`].
//!
//! # Example
//!
//! ```text
//! let mut ctx = InterpreterContext::new();
//! ctx.run(statements)?;
//! let k1 = ctx.attribute_value("QF", "K1")?;
//! ```

mod comments;
mod config;
mod context;
mod element_builder;
mod errors;
mod eval;
mod line_builder;
mod lower;
mod operators;
mod tables;

pub use comments::{CommentLog, UnmatchedEnd};
pub use config::{InterpreterConfig, DEFAULT_MAX_EVAL_DEPTH, DEFAULT_MAX_LINE_ENTRIES};
pub use context::InterpreterContext;
pub use element_builder::{AttributeError, ElementBuilder};
pub use errors::{EvalResult, FatalError};
pub use eval::Evaluator;
pub use line_builder::{repeat_count, LineBuilder, LineOverflow};
pub use operators::{evaluate_binary, evaluate_func, evaluate_unary};
pub use tables::{
    ConstantTable, ElementTable, EntryTarget, LineTable, Record, SymbolTable, SymbolTables,
    VariableTable,
};

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber driven by `RUST_LOG`.
///
/// Does nothing unless `RUST_LOG` is set; safe to call more than once.
/// Table definitions log at `debug`, pragmas at `info`, every diagnostic
/// at `warn` (recoverable) or `error` (fatal).
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}

#[cfg(test)]
mod tests;

//! MAD IR - core data types for the MAD semantic core
//!
//! This crate holds everything the interpreter and its front ends share:
//! - Case-folded `Name`s for symbol lookup
//! - `SourcePos` and the include-aware `SourceMap`
//! - A generational `Slab` arena with stale-handle detection
//! - The expression AST (`ExprArena`, `ExprKind`) and its renderer
//! - Element kinds, their attribute catalogs and the bare-flag defaults
//! - Line entries, comments, and the parser-facing `Statement` model
//!
//! # Design Philosophy
//!
//! - **Flatten Everything**: expression nodes live in an arena and refer to
//!   each other through `ExprId` handles, never `Box<Expr>`.
//! - **Fold Once**: identifiers are upper-cased when a `Name` is built, so
//!   every table lookup is a plain hash lookup.

mod arena;
mod comment;
mod element;
mod expr;
mod line;
mod name;
mod source;
mod statement;
mod symbol;
pub mod syntax;
mod value;

pub use arena::{ArenaError, Handle, Slab};
pub use comment::Comment;
pub use element::{Element, ElementKind, KindSet, MatrixIndex, MatrixTables, MATRIX_DIM};
pub use expr::{BinaryOp, ExprArena, ExprId, ExprKind, MathFunc, UnaryOp};
pub use line::{Line, LineEntry, Sign};
pub use name::Name;
pub use source::{FileId, SourceMap, SourcePos};
pub use statement::{AssignMode, ElementItem, Statement, StmtKind};
pub use symbol::{Constant, Variable};
pub use value::Value;

//! Constant and variable records.

use crate::{ExprId, Name, SourcePos, Value};

/// A constant: evaluated once at definition time.
///
/// `source` is kept only so the definition can be rendered back.
#[derive(Clone, PartialEq, Debug)]
pub struct Constant {
    pub name: Name,
    pub value: Value,
    pub source: ExprId,
    pub pos: SourcePos,
}

/// A variable: its expression is evaluated on every lookup.
#[derive(Clone, PartialEq, Debug)]
pub struct Variable {
    pub name: Name,
    pub expr: ExprId,
    pub pos: SourcePos,
}

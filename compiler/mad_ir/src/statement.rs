//! Statements delivered by a front end.

use crate::syntax::{Expr, LineExpr};
use crate::{ElementKind, SourcePos};

/// How a variable assignment binds its right-hand side.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub enum AssignMode {
    /// `name = expr`: re-evaluated on every lookup.
    #[default]
    Deferred,
    /// `name := expr`: evaluated once, the number is stored.
    Immediate,
}

/// One attribute item of an element definition.
#[derive(Clone, PartialEq, Debug)]
pub enum ElementItem {
    /// `KEYWORD = expr`
    Assign { keyword: String, value: Expr },
    /// A bare `KEYWORD` with no value.
    Flag { keyword: String },
    /// `TYPE = label`
    Type { label: String },
    /// `RM(i, j) = expr`, raw indices as written.
    Rm { i: f64, j: f64, value: Expr },
    /// `TM(i, j, k) = expr`
    Tm { i: f64, j: f64, k: f64, value: Expr },
}

impl ElementItem {
    pub fn assign(keyword: impl Into<String>, value: Expr) -> Self {
        ElementItem::Assign {
            keyword: keyword.into(),
            value,
        }
    }

    pub fn flag(keyword: impl Into<String>) -> Self {
        ElementItem::Flag {
            keyword: keyword.into(),
        }
    }
}

#[derive(Clone, PartialEq, Debug)]
pub enum StmtKind {
    /// `CONST name = expr`
    ConstantDef { name: String, value: Expr },
    /// `name = expr` / `name := expr`
    VariableDef {
        name: String,
        value: Expr,
        mode: AssignMode,
    },
    /// `name: KIND, items...`
    ElementDef {
        name: String,
        kind: ElementKind,
        items: Vec<ElementItem>,
    },
    /// `name: LINE = body`
    LineDef { name: String, body: LineExpr },
    BeginComment,
    EndComment,
    /// Text captured while in comment mode.
    Comment { text: String, at_eof: bool },
    /// `USE`, `BEAM` and similar: accepted, logged, no semantic effect.
    Pragma { keyword: String, text: String },
}

/// A statement with the position it was read at.
#[derive(Clone, PartialEq, Debug)]
pub struct Statement {
    pub kind: StmtKind,
    pub pos: SourcePos,
}

impl Statement {
    pub fn new(kind: StmtKind, pos: SourcePos) -> Self {
        Statement { kind, pos }
    }

    pub fn constant(name: impl Into<String>, value: Expr, pos: SourcePos) -> Self {
        Statement::new(
            StmtKind::ConstantDef {
                name: name.into(),
                value,
            },
            pos,
        )
    }

    pub fn variable(name: impl Into<String>, value: Expr, pos: SourcePos) -> Self {
        Statement::new(
            StmtKind::VariableDef {
                name: name.into(),
                value,
                mode: AssignMode::Deferred,
            },
            pos,
        )
    }

    pub fn immediate(name: impl Into<String>, value: Expr, pos: SourcePos) -> Self {
        Statement::new(
            StmtKind::VariableDef {
                name: name.into(),
                value,
                mode: AssignMode::Immediate,
            },
            pos,
        )
    }

    pub fn element(
        name: impl Into<String>,
        kind: ElementKind,
        items: Vec<ElementItem>,
        pos: SourcePos,
    ) -> Self {
        Statement::new(
            StmtKind::ElementDef {
                name: name.into(),
                kind,
                items,
            },
            pos,
        )
    }

    pub fn line(name: impl Into<String>, body: LineExpr, pos: SourcePos) -> Self {
        Statement::new(
            StmtKind::LineDef {
                name: name.into(),
                body,
            },
            pos,
        )
    }
}

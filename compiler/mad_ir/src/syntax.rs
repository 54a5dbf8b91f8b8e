//! Parser-facing trees.
//!
//! Front ends hand the interpreter these owned trees. Identifiers are still
//! raw text here; they are classified against the symbol tables when an
//! `Expr` is lowered into the `ExprArena`.

use crate::{BinaryOp, MathFunc, UnaryOp};

/// A parsed expression, before identifier resolution.
#[derive(Clone, PartialEq, Debug)]
pub enum Expr {
    Number(f64),
    Str(String),
    Ident(String),
    /// `NAME[L]`
    ElementLength(String),
    Paren(Box<Expr>),
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Call {
        func: MathFunc,
        arg: Box<Expr>,
    },
}

impl Expr {
    pub fn ident(name: impl Into<String>) -> Self {
        Expr::Ident(name.into())
    }

    pub fn string(text: impl Into<String>) -> Self {
        Expr::Str(text.into())
    }

    pub fn length_of(element: impl Into<String>) -> Self {
        Expr::ElementLength(element.into())
    }

    #[must_use]
    pub fn paren(self) -> Self {
        Expr::Paren(Box::new(self))
    }

    pub fn unary(op: UnaryOp, operand: Expr) -> Self {
        Expr::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Self {
        Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn call(func: MathFunc, arg: Expr) -> Self {
        Expr::Call {
            func,
            arg: Box::new(arg),
        }
    }
}

/// A parsed line body.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum LineExpr {
    /// `name`
    Ref(String),
    /// `(a, b, ...)`
    Seq(Vec<LineExpr>),
    /// `N*body`. The count is the literal text as written.
    Repeat { count: String, body: Box<LineExpr> },
    /// `-body`
    Reflect(Box<LineExpr>),
}

impl LineExpr {
    pub fn reference(name: impl Into<String>) -> Self {
        LineExpr::Ref(name.into())
    }

    /// A sequence of plain references.
    pub fn refs<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        LineExpr::Seq(names.into_iter().map(LineExpr::reference).collect())
    }

    pub fn repeat(count: impl Into<String>, body: LineExpr) -> Self {
        LineExpr::Repeat {
            count: count.into(),
            body: Box::new(body),
        }
    }

    #[must_use]
    pub fn reflect(self) -> Self {
        LineExpr::Reflect(Box::new(self))
    }
}

//! Expression AST stored in an arena.
//!
//! Nodes refer to their children by `ExprId`. Every node has exactly one
//! owner (a constant, variable, element slot or parent node), so releasing
//! an owner releases its whole subtree with [`ExprArena::release`].

use std::fmt::{self, Write as _};

use crate::arena::{ArenaError, Handle, Slab};
use crate::Name;

/// Handle to an expression node.
pub type ExprId = Handle<ExprKind>;

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnaryOp {
    Plus,
    Minus,
}

impl UnaryOp {
    pub const fn symbol(self) -> &'static str {
        match self {
            UnaryOp::Plus => "+",
            UnaryOp::Minus => "-",
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    /// `a ^ b`
    Pow,
    /// `MAX(a, b)`
    Max,
    /// `MIN(a, b)`
    Min,
}

impl BinaryOp {
    /// Infix symbol, or `None` for the function-call forms.
    pub const fn symbol(self) -> Option<&'static str> {
        match self {
            BinaryOp::Add => Some("+"),
            BinaryOp::Sub => Some("-"),
            BinaryOp::Mul => Some("*"),
            BinaryOp::Div => Some("/"),
            BinaryOp::Pow => Some("^"),
            BinaryOp::Max | BinaryOp::Min => None,
        }
    }

    pub const fn keyword(self) -> &'static str {
        match self {
            BinaryOp::Add => "ADD",
            BinaryOp::Sub => "SUB",
            BinaryOp::Mul => "MUL",
            BinaryOp::Div => "DIV",
            BinaryOp::Pow => "POW",
            BinaryOp::Max => "MAX",
            BinaryOp::Min => "MIN",
        }
    }
}

/// Single-argument math functions.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MathFunc {
    Sqrt,
    Log,
    Exp,
    Sin,
    Cos,
    Tan,
    Asin,
    Abs,
}

impl MathFunc {
    pub const ALL: [MathFunc; 8] = [
        MathFunc::Sqrt,
        MathFunc::Log,
        MathFunc::Exp,
        MathFunc::Sin,
        MathFunc::Cos,
        MathFunc::Tan,
        MathFunc::Asin,
        MathFunc::Abs,
    ];

    pub const fn keyword(self) -> &'static str {
        match self {
            MathFunc::Sqrt => "SQRT",
            MathFunc::Log => "LOG",
            MathFunc::Exp => "EXP",
            MathFunc::Sin => "SIN",
            MathFunc::Cos => "COS",
            MathFunc::Tan => "TAN",
            MathFunc::Asin => "ASIN",
            MathFunc::Abs => "ABS",
        }
    }

    /// Case-insensitive lookup by function name.
    pub fn from_keyword(word: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|func| func.keyword().eq_ignore_ascii_case(word.trim()))
    }
}

/// An expression node.
///
/// Identifier nodes are classified when the expression is built:
/// `NumIdent` refers to a numeric constant, `StrIdent` to a string-valued
/// constant in a non-arithmetic position, and `VarIdent` to a variable
/// (or a name defined later).
#[derive(Clone, PartialEq, Debug)]
pub enum ExprKind {
    Number(f64),
    Str(String),
    Unary {
        op: UnaryOp,
        operand: ExprId,
    },
    Binary {
        op: BinaryOp,
        left: ExprId,
        right: ExprId,
    },
    Func {
        func: MathFunc,
        arg: ExprId,
    },
    NumIdent(Name),
    VarIdent(Name),
    StrIdent(Name),
    /// `NAME[L]`: the length attribute of an element.
    ElementLength(Name),
    /// A parenthesized subexpression, kept for rendering.
    Brackets(ExprId),
}

impl ExprKind {
    /// Direct children, left to right.
    pub fn children(&self) -> [Option<ExprId>; 2] {
        match *self {
            ExprKind::Unary { operand, .. } => [Some(operand), None],
            ExprKind::Binary { left, right, .. } => [Some(left), Some(right)],
            ExprKind::Func { arg, .. } => [Some(arg), None],
            ExprKind::Brackets(inner) => [Some(inner), None],
            ExprKind::Number(_)
            | ExprKind::Str(_)
            | ExprKind::NumIdent(_)
            | ExprKind::VarIdent(_)
            | ExprKind::StrIdent(_)
            | ExprKind::ElementLength(_) => [None, None],
        }
    }

    /// The symbol an identifier node refers to.
    pub fn ident(&self) -> Option<&Name> {
        match self {
            ExprKind::NumIdent(name)
            | ExprKind::VarIdent(name)
            | ExprKind::StrIdent(name)
            | ExprKind::ElementLength(name) => Some(name),
            _ => None,
        }
    }
}

/// Arena of expression nodes.
#[derive(Clone, Debug, Default)]
pub struct ExprArena {
    nodes: Slab<ExprKind>,
}

impl ExprArena {
    pub fn new() -> Self {
        ExprArena { nodes: Slab::new() }
    }

    #[inline]
    pub fn alloc(&mut self, kind: ExprKind) -> ExprId {
        self.nodes.insert(kind)
    }

    pub fn number(&mut self, value: f64) -> ExprId {
        self.alloc(ExprKind::Number(value))
    }

    #[inline]
    pub fn get(&self, id: ExprId) -> Result<&ExprKind, ArenaError> {
        self.nodes.get(id).ok_or_else(|| ArenaError::stale(id))
    }

    pub fn contains(&self, id: ExprId) -> bool {
        self.nodes.contains(id)
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Release `id` and every node beneath it.
    ///
    /// Iterative, so arbitrarily deep trees cannot overflow the stack.
    /// Returns the number of nodes released.
    pub fn release(&mut self, id: ExprId) -> Result<usize, ArenaError> {
        let mut pending = vec![id];
        let mut released = 0;
        while let Some(next) = pending.pop() {
            let kind = self.nodes.remove(next)?;
            pending.extend(kind.children().into_iter().flatten());
            released += 1;
        }
        Ok(released)
    }

    /// Render `id` back to source-like text.
    pub fn render(&self, id: ExprId) -> Result<String, ArenaError> {
        let mut out = String::new();
        self.render_into(id, &mut out)?;
        Ok(out)
    }

    fn render_into(&self, id: ExprId, out: &mut String) -> Result<(), ArenaError> {
        match self.get(id)? {
            ExprKind::Number(value) => push(out, format_args!("{value}")),
            ExprKind::Str(text) => push(out, format_args!("\"{text}\"")),
            ExprKind::NumIdent(name) | ExprKind::VarIdent(name) | ExprKind::StrIdent(name) => {
                out.push_str(name.as_str());
            }
            ExprKind::ElementLength(name) => push(out, format_args!("{name}[L]")),
            ExprKind::Brackets(inner) => {
                out.push('(');
                self.render_into(*inner, out)?;
                out.push(')');
            }
            ExprKind::Unary { op, operand } => {
                out.push_str(op.symbol());
                self.render_into(*operand, out)?;
            }
            ExprKind::Binary { op, left, right } => {
                if let Some(symbol) = op.symbol() {
                    self.render_into(*left, out)?;
                    out.push_str(symbol);
                    self.render_into(*right, out)?;
                } else {
                    out.push_str(op.keyword());
                    out.push('(');
                    self.render_into(*left, out)?;
                    out.push(',');
                    self.render_into(*right, out)?;
                    out.push(')');
                }
            }
            ExprKind::Func { func, arg } => {
                out.push_str(func.keyword());
                out.push('(');
                self.render_into(*arg, out)?;
                out.push(')');
            }
        }
        Ok(())
    }
}

#[inline]
fn push(out: &mut String, args: fmt::Arguments<'_>) {
    // Writing into a String cannot fail.
    let _ = out.write_fmt(args);
}

#[cfg(test)]
mod tests;

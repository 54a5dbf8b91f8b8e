//! Lowering of parsed expressions into the arena.
//!
//! Each identifier is classified against the tables as they stand when the
//! statement is read: a numeric constant becomes `NumIdent`, a string
//! constant `StrIdent`, anything else `VarIdent` (with a warning when the
//! name is not a variable yet). A string in an arithmetic position is
//! rejected here, before anything is evaluated.
//!
//! Constant definitions use a stricter mode: only constants may be named,
//! and any other identifier folds to `0` with an undefined-constant warning.

use mad_diagnostic::{errors, Reporter};
use mad_ir::syntax::Expr;
use mad_ir::{ExprArena, ExprId, ExprKind, Name, SourcePos};
use mad_stack::ensure_sufficient_stack;

use crate::{EvalResult, FatalError, SymbolTables};

pub(crate) struct Lowerer<'a> {
    exprs: &'a mut ExprArena,
    tables: &'a SymbolTables,
    reporter: &'a mut Reporter,
    pos: SourcePos,
    constants_only: bool,
}

impl<'a> Lowerer<'a> {
    pub(crate) fn new(
        exprs: &'a mut ExprArena,
        tables: &'a SymbolTables,
        reporter: &'a mut Reporter,
        pos: SourcePos,
    ) -> Self {
        Lowerer {
            exprs,
            tables,
            reporter,
            pos,
            constants_only: false,
        }
    }

    /// Lower a right-hand side. A bare string is allowed at the top.
    pub(crate) fn lower(&mut self, expr: &Expr) -> EvalResult<ExprId> {
        self.lower_in(expr, false)
    }

    /// Lower the right-hand side of a constant definition.
    pub(crate) fn lower_constant(&mut self, expr: &Expr) -> EvalResult<ExprId> {
        self.constants_only = true;
        let result = self.lower_in(expr, false);
        self.constants_only = false;
        result
    }

    fn lower_in(&mut self, expr: &Expr, arithmetic: bool) -> EvalResult<ExprId> {
        ensure_sufficient_stack(|| self.lower_kind(expr, arithmetic))
    }

    fn lower_kind(&mut self, expr: &Expr, arithmetic: bool) -> EvalResult<ExprId> {
        let kind = match expr {
            Expr::Number(value) => ExprKind::Number(*value),
            Expr::Str(text) => {
                if arithmetic {
                    return Err(FatalError::string_in_algebra(
                        format!("\"{text}\""),
                        self.pos,
                    ));
                }
                ExprKind::Str(text.clone())
            }
            Expr::Ident(raw) => self.classify(Name::new(raw), arithmetic)?,
            Expr::ElementLength(raw) => {
                let name = Name::new(raw);
                if !self.tables.elements.contains(&name) {
                    self.reporter.report(errors::undefined_element(&name, self.pos));
                }
                ExprKind::ElementLength(name)
            }
            Expr::Paren(inner) => ExprKind::Brackets(self.lower_in(inner, arithmetic)?),
            Expr::Unary { op, operand } => ExprKind::Unary {
                op: *op,
                operand: self.lower_in(operand, true)?,
            },
            Expr::Binary { op, left, right } => {
                let left = self.lower_in(left, true)?;
                let right = self.lower_in(right, true)?;
                ExprKind::Binary {
                    op: *op,
                    left,
                    right,
                }
            }
            Expr::Call { func, arg } => ExprKind::Func {
                func: *func,
                arg: self.lower_in(arg, true)?,
            },
        };
        Ok(self.exprs.alloc(kind))
    }

    fn classify(&mut self, name: Name, arithmetic: bool) -> EvalResult<ExprKind> {
        let is_string = self.tables.constants.get(&name).map(|c| c.value.is_str());
        match is_string {
            Some(true) if arithmetic => {
                Err(FatalError::string_in_algebra(name.to_string(), self.pos))
            }
            Some(true) => Ok(ExprKind::StrIdent(name)),
            Some(false) => Ok(ExprKind::NumIdent(name)),
            None if self.constants_only => {
                self.reporter.report(errors::undefined_constant(&name, self.pos));
                Ok(ExprKind::Number(0.0))
            }
            None => {
                if !self.tables.variables.contains(&name) {
                    self.reporter.report(errors::undefined_variable(&name, self.pos));
                }
                Ok(ExprKind::VarIdent(name))
            }
        }
    }
}

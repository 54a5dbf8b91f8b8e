//! Expression evaluator.
//!
//! Walks an arena expression against the symbol tables as they are at the
//! moment of the call. Identifier lookups happen here, not when the
//! expression was built, which is what makes variables lazy.

use mad_diagnostic::{errors, Reporter};
use mad_ir::{ExprArena, ExprId, ExprKind, Name, SourcePos, Value};
use mad_stack::{ensure_sufficient_stack, DepthGuard};

use crate::operators::{evaluate_binary, evaluate_func, evaluate_unary};
use crate::{EvalResult, FatalError, SymbolTables};

/// Evaluates expressions for one statement or query.
pub struct Evaluator<'a> {
    exprs: &'a ExprArena,
    tables: &'a SymbolTables,
    reporter: &'a mut Reporter,
    guard: DepthGuard,
    /// Set once the depth limit is hit; the rest of the walk yields 0.
    tripped: bool,
    pos: SourcePos,
}

impl<'a> Evaluator<'a> {
    pub fn new(
        exprs: &'a ExprArena,
        tables: &'a SymbolTables,
        reporter: &'a mut Reporter,
        max_depth: usize,
        pos: SourcePos,
    ) -> Self {
        Evaluator {
            exprs,
            tables,
            reporter,
            guard: DepthGuard::new(max_depth),
            tripped: false,
            pos,
        }
    }

    #[tracing::instrument(level = "trace", skip(self))]
    pub fn evaluate(&mut self, id: ExprId) -> EvalResult<Value> {
        self.tripped = false;
        self.eval(id)
    }

    /// Evaluate in an arithmetic position: a string result is fatal.
    pub fn evaluate_number(&mut self, id: ExprId) -> EvalResult<f64> {
        self.tripped = false;
        self.number(id)
    }

    fn eval(&mut self, id: ExprId) -> EvalResult<Value> {
        if self.tripped {
            return Ok(Value::Number(0.0));
        }
        if let Err(exceeded) = self.guard.enter() {
            self.tripped = true;
            self.reporter
                .report(errors::recursion_limit(exceeded.limit, self.pos));
            return Ok(Value::Number(0.0));
        }
        let result = ensure_sufficient_stack(|| self.eval_kind(id));
        self.guard.exit();
        result
    }

    fn eval_kind(&mut self, id: ExprId) -> EvalResult<Value> {
        let exprs = self.exprs;
        match exprs.get(id)? {
            ExprKind::Number(value) => Ok(Value::Number(*value)),
            ExprKind::Str(text) => Ok(Value::Str(text.clone())),
            ExprKind::Unary { op, operand } => {
                let operand = self.number(*operand)?;
                Ok(Value::Number(evaluate_unary(*op, operand)))
            }
            ExprKind::Binary { op, left, right } => {
                let left = self.number(*left)?;
                let right = self.number(*right)?;
                Ok(Value::Number(evaluate_binary(*op, left, right)))
            }
            ExprKind::Func { func, arg } => {
                let arg = self.number(*arg)?;
                Ok(Value::Number(evaluate_func(*func, arg)))
            }
            ExprKind::NumIdent(name) => match self.constant(name) {
                // The constant was redefined as a string after this
                // expression was read.
                Value::Str(_) => Err(FatalError::string_in_algebra(name.to_string(), self.pos)),
                number => Ok(number),
            },
            ExprKind::StrIdent(name) => Ok(self.constant(name)),
            ExprKind::VarIdent(name) => self.variable(name),
            ExprKind::ElementLength(name) => self.element_length(name),
            ExprKind::Brackets(inner) => self.eval(*inner),
        }
    }

    fn number(&mut self, id: ExprId) -> EvalResult<f64> {
        match self.eval(id)? {
            Value::Number(value) => Ok(value),
            Value::Str(text) => Err(FatalError::string_in_algebra(
                self.symbol_of(id, &text),
                self.pos,
            )),
        }
    }

    fn constant(&mut self, name: &Name) -> Value {
        match self.tables.constants.get(name) {
            Some(constant) => constant.value.clone(),
            None => {
                self.reporter.report(errors::undefined_constant(name, self.pos));
                Value::Number(0.0)
            }
        }
    }

    fn variable(&mut self, name: &Name) -> EvalResult<Value> {
        let tables = self.tables;
        match tables.variables.get(name) {
            Some(variable) => self.eval(variable.expr),
            None => {
                self.reporter.report(errors::undefined_variable(name, self.pos));
                Ok(Value::Number(0.0))
            }
        }
    }

    fn element_length(&mut self, name: &Name) -> EvalResult<Value> {
        let tables = self.tables;
        let Some(element) = tables.elements.get(name) else {
            self.reporter.report(errors::undefined_element(name, self.pos));
            return Ok(Value::Number(0.0));
        };
        match element.length() {
            Some(length) => self.eval(length),
            None => Ok(Value::Number(0.0)),
        }
    }

    /// Name to blame for a string in arithmetic: the identifier behind
    /// `id`, or the quoted literal.
    fn symbol_of(&self, mut id: ExprId, text: &str) -> String {
        while let Ok(kind) = self.exprs.get(id) {
            if let ExprKind::Brackets(inner) = kind {
                id = *inner;
                continue;
            }
            if let Some(name) = kind.ident() {
                return name.to_string();
            }
            break;
        }
        format!("\"{text}\"")
    }
}

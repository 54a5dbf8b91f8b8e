//! The interpreter context.
//!
//! Owns the expression arena, the four symbol tables, the diagnostic
//! reporter (with its line tracker) and the comment log, and applies parsed
//! statements to them one at a time.
//!
//! Every public entry point reports a fatal error exactly once before
//! returning it; the caller decides how to end the run.

use std::f64::consts::PI;

use mad_diagnostic::{errors, Diagnostic, DiagnosticEmitter, DiagnosticQueue, Reporter};
use mad_ir::syntax::{Expr, LineExpr};
use mad_ir::{
    AssignMode, Comment, Constant, Element, ElementItem, ElementKind, ExprArena, ExprId,
    ExprKind, KindSet, LineEntry, MatrixIndex, Name, SourceMap, SourcePos, Statement, StmtKind,
    Value, Variable,
};
use mad_stack::ensure_sufficient_stack;

use crate::eval::Evaluator;
use crate::lower::Lowerer;
use crate::{
    AttributeError, CommentLog, ConstantTable, ElementBuilder, ElementTable, EntryTarget,
    EvalResult, FatalError, InterpreterConfig, LineBuilder, LineTable, SymbolTables,
    VariableTable,
};

pub struct InterpreterContext {
    config: InterpreterConfig,
    exprs: ExprArena,
    tables: SymbolTables,
    reporter: Reporter,
    comments: CommentLog,
    /// Position of the statement being applied.
    pos: SourcePos,
}

impl Default for InterpreterContext {
    fn default() -> Self {
        Self::new()
    }
}

impl InterpreterContext {
    pub fn new() -> Self {
        Self::with_config(InterpreterConfig::default())
    }

    pub fn with_config(config: InterpreterConfig) -> Self {
        let mut ctx = InterpreterContext {
            reporter: Reporter::new(config.diagnostics.clone()),
            config,
            exprs: ExprArena::new(),
            tables: SymbolTables::new(),
            comments: CommentLog::new(),
            pos: SourcePos::default(),
        };
        ctx.seed_builtins();
        ctx
    }

    /// `PI` is predefined in every deck.
    fn seed_builtins(&mut self) {
        let source = self.exprs.number(PI);
        let pi = Constant {
            name: Name::new("PI"),
            value: Value::Number(PI),
            source,
            pos: SourcePos::default(),
        };
        if let Err(err) = self.tables.constants.insert(pi, &mut self.exprs) {
            tracing::error!(%err, "failed to seed PI");
        }
    }

    #[must_use]
    pub fn with_emitter(mut self, emitter: Box<dyn DiagnosticEmitter>) -> Self {
        self.reporter.set_emitter(emitter);
        self
    }

    pub fn set_emitter(&mut self, emitter: Box<dyn DiagnosticEmitter>) {
        self.reporter.set_emitter(emitter);
    }

    // Accessors

    pub fn config(&self) -> &InterpreterConfig {
        &self.config
    }

    pub fn exprs(&self) -> &ExprArena {
        &self.exprs
    }

    pub fn tables(&self) -> &SymbolTables {
        &self.tables
    }

    pub fn constants(&self) -> &ConstantTable {
        &self.tables.constants
    }

    pub fn variables(&self) -> &VariableTable {
        &self.tables.variables
    }

    pub fn elements(&self) -> &ElementTable {
        &self.tables.elements
    }

    pub fn lines(&self) -> &LineTable {
        &self.tables.lines
    }

    pub fn diagnostics(&self) -> &DiagnosticQueue {
        self.reporter.queue()
    }

    pub fn comments(&self) -> &CommentLog {
        &self.comments
    }

    /// The comment captured at global line `line`.
    pub fn comment_at(&self, line: u32) -> Option<&Comment> {
        self.comments.at_line(line)
    }

    pub fn sources(&self) -> &SourceMap {
        self.reporter.sources()
    }

    /// The line tracker, for front ends that read files and includes.
    pub fn sources_mut(&mut self) -> &mut SourceMap {
        self.reporter.sources_mut()
    }

    // Statement processing

    /// Apply one statement.
    ///
    /// While a comment block is open only comment statements take effect.
    pub fn apply(&mut self, stmt: &Statement) -> EvalResult<()> {
        self.pos = stmt.pos;
        let is_comment = matches!(
            stmt.kind,
            StmtKind::BeginComment | StmtKind::EndComment | StmtKind::Comment { .. }
        );
        if self.comments.is_active() && !is_comment {
            tracing::debug!(line = stmt.pos.line, "statement inside comment block skipped");
            return Ok(());
        }
        let result = match &stmt.kind {
            StmtKind::ConstantDef { name, value } => self.constant_def(name, value),
            StmtKind::VariableDef { name, value, mode } => self.variable_def(name, value, *mode),
            StmtKind::ElementDef { name, kind, items } => self.element_def(name, *kind, items),
            StmtKind::LineDef { name, body } => self.line_def(name, body),
            StmtKind::BeginComment => {
                self.begin_comment();
                Ok(())
            }
            StmtKind::EndComment => {
                self.end_comment();
                Ok(())
            }
            StmtKind::Comment { text, at_eof } => {
                self.capture_comment(text.clone(), *at_eof);
                Ok(())
            }
            StmtKind::Pragma { keyword, text } => {
                self.pragma(keyword, text);
                Ok(())
            }
        };
        self.check(result)
    }

    /// Apply statements in order, stopping at the first fatal error.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn run<I>(&mut self, statements: I) -> EvalResult<()>
    where
        I: IntoIterator<Item = Statement>,
    {
        let mut applied = 0_usize;
        for stmt in statements {
            self.apply(&stmt)?;
            applied += 1;
        }
        tracing::debug!(
            applied,
            constants = self.tables.constants.len(),
            variables = self.tables.variables.len(),
            elements = self.tables.elements.len(),
            lines = self.tables.lines.len(),
            "run complete"
        );
        Ok(())
    }

    /// Print the emitter summary and flush it.
    pub fn finish(&mut self) {
        self.reporter.finish();
    }

    pub fn define_constant(&mut self, name: &str, value: &Expr, pos: SourcePos) -> EvalResult<()> {
        self.pos = pos;
        let result = self.constant_def(name, value);
        self.check(result)
    }

    pub fn define_variable(
        &mut self,
        name: &str,
        value: &Expr,
        mode: AssignMode,
        pos: SourcePos,
    ) -> EvalResult<()> {
        self.pos = pos;
        let result = self.variable_def(name, value, mode);
        self.check(result)
    }

    pub fn define_element(
        &mut self,
        name: &str,
        kind: ElementKind,
        items: &[ElementItem],
        pos: SourcePos,
    ) -> EvalResult<()> {
        self.pos = pos;
        let result = self.element_def(name, kind, items);
        self.check(result)
    }

    pub fn define_line(&mut self, name: &str, body: &LineExpr, pos: SourcePos) -> EvalResult<()> {
        self.pos = pos;
        let result = self.line_def(name, body);
        self.check(result)
    }

    pub fn begin_comment(&mut self) {
        self.comments.begin();
    }

    pub fn end_comment(&mut self) {
        if self.comments.end().is_err() {
            self.warn(errors::unmatched_end_comment(self.pos));
        }
    }

    pub fn capture_comment(&mut self, text: impl Into<String>, at_eof: bool) {
        let pos = if at_eof {
            SourcePos::END_OF_FILE
        } else {
            self.pos
        };
        self.comments.capture(text, pos);
    }

    /// `USE`, `BEAM` and friends are only logged.
    pub fn pragma(&mut self, keyword: &str, text: &str) {
        tracing::info!(
            keyword = %keyword.trim().to_ascii_uppercase(),
            text,
            line = self.pos.line,
            "pragma"
        );
    }

    fn constant_def(&mut self, raw: &str, value: &Expr) -> EvalResult<()> {
        let name = Name::new(raw);
        if self.tables.variables.contains(&name) {
            self.warn(errors::constant_shadows_variable(&name, self.pos));
            return Ok(());
        }
        let source = self.lowerer().lower_constant(value)?;
        let value = self.evaluator().evaluate(source)?;
        if self.tables.constants.contains(&name) {
            self.warn(errors::constant_redefined(&name, self.pos));
        }
        tracing::debug!(constant = %name, %value, "constant defined");
        let record = Constant {
            name,
            value,
            source,
            pos: self.pos,
        };
        self.tables.constants.insert(record, &mut self.exprs)?;
        Ok(())
    }

    fn variable_def(&mut self, raw: &str, value: &Expr, mode: AssignMode) -> EvalResult<()> {
        let name = Name::new(raw);
        if self.tables.constants.contains(&name) {
            self.warn(errors::variable_shadows_constant(&name, self.pos));
            return Ok(());
        }
        let mut expr = self.lowerer().lower(value)?;
        if mode == AssignMode::Immediate {
            let value = self.evaluator().evaluate(expr)?;
            self.exprs.release(expr)?;
            expr = self.exprs.alloc(match value {
                Value::Number(number) => ExprKind::Number(number),
                Value::Str(text) => ExprKind::Str(text),
            });
        }
        tracing::debug!(variable = %name, ?mode, "variable defined");
        let record = Variable {
            name,
            expr,
            pos: self.pos,
        };
        self.tables.variables.insert(record, &mut self.exprs)?;
        Ok(())
    }

    fn element_def(&mut self, raw: &str, kind: ElementKind, items: &[ElementItem]) -> EvalResult<()> {
        let name = Name::new(raw);
        if self.tables.elements.remove(&name, &mut self.exprs)? {
            self.warn(errors::element_redefined(&name, self.pos));
        }
        let mut builder = ElementBuilder::start(name, kind, self.pos);
        for item in items {
            self.element_item(&mut builder, item)?;
        }
        let element = builder.finish();
        tracing::debug!(element = %element.name, kind = %element.kind, "element defined");
        self.tables.elements.insert(element, &mut self.exprs)?;
        Ok(())
    }

    fn element_item(&mut self, builder: &mut ElementBuilder, item: &ElementItem) -> EvalResult<()> {
        match item {
            ElementItem::Assign { keyword, value } => {
                if keyword.trim().eq_ignore_ascii_case("TYPE") {
                    if let Some(label) = label_text(value) {
                        builder.label(label);
                        return Ok(());
                    }
                }
                if !builder.accepts(keyword) {
                    let keyword = keyword.trim().to_ascii_uppercase();
                    self.warn(errors::unknown_attribute(builder.kind(), &keyword, self.pos));
                    return Ok(());
                }
                let expr = self.lowerer().lower(value)?;
                let outcome = builder.attribute(keyword, expr);
                self.settle(outcome, expr, builder.name())
            }
            ElementItem::Flag { keyword } => {
                let outcome = builder.flag(keyword, &mut self.exprs);
                match outcome {
                    Ok(Some(previous)) => {
                        self.exprs.release(previous)?;
                    }
                    Ok(None) => {}
                    Err(err) => self.warn(err.to_diagnostic(builder.name(), self.pos)),
                }
                Ok(())
            }
            ElementItem::Type { label } => {
                builder.label(label);
                Ok(())
            }
            ElementItem::Rm { i, j, value } => {
                let index = MatrixIndex::rm(*i, *j);
                self.matrix_item(builder, index, || format!("({i},{j})"), value)
            }
            ElementItem::Tm { i, j, k, value } => {
                let index = MatrixIndex::tm(*i, *j, *k);
                self.matrix_item(builder, index, || format!("({i},{j},{k})"), value)
            }
        }
    }

    fn matrix_item(
        &mut self,
        builder: &mut ElementBuilder,
        index: Option<MatrixIndex>,
        raw: impl FnOnce() -> String,
        value: &Expr,
    ) -> EvalResult<()> {
        if builder.kind() != ElementKind::Matrix {
            let err = AttributeError::NotMatrix {
                kind: builder.kind(),
            };
            self.warn(err.to_diagnostic(builder.name(), self.pos));
            return Ok(());
        }
        let Some(index) = index else {
            self.warn(errors::matrix_index_out_of_range(&raw(), self.pos));
            return Ok(());
        };
        let expr = self.lowerer().lower(value)?;
        let outcome = builder.matrix_entry(index, expr);
        self.settle(outcome, expr, builder.name())
    }

    /// Release whatever a builder call displaced or rejected.
    fn settle(
        &mut self,
        outcome: Result<Option<ExprId>, AttributeError>,
        expr: ExprId,
        element: &Name,
    ) -> EvalResult<()> {
        match outcome {
            Ok(Some(previous)) => {
                self.exprs.release(previous)?;
            }
            Ok(None) => {}
            Err(err) => {
                self.exprs.release(expr)?;
                self.warn(err.to_diagnostic(element, self.pos));
            }
        }
        Ok(())
    }

    fn line_def(&mut self, raw: &str, body: &LineExpr) -> EvalResult<()> {
        let name = Name::new(raw);
        // Built before the old definition goes, so a line may extend itself.
        let builder = self.flatten(body)?;
        if self.tables.lines.remove(&name, &mut self.exprs)? {
            self.warn(errors::line_redefined(&name, self.pos));
        }
        let line = builder.finish(name, self.pos);
        tracing::debug!(line = %line.name, entries = line.entries.len(), "line defined");
        self.tables.lines.insert(line, &mut self.exprs)?;
        Ok(())
    }

    /// Flatten a line body against the current tables.
    pub fn build_line(&mut self, body: &LineExpr) -> EvalResult<LineBuilder> {
        let result = self.flatten(body);
        self.check(result)
    }

    fn flatten(&mut self, body: &LineExpr) -> EvalResult<LineBuilder> {
        ensure_sufficient_stack(|| match body {
            LineExpr::Ref(raw) => {
                let name = Name::new(raw);
                let (builder, found) = LineBuilder::reference(name.clone(), &self.tables);
                if !found {
                    self.warn(errors::undefined_line_member(&name, self.pos));
                }
                Ok(builder)
            }
            LineExpr::Seq(items) => {
                let mut builder = LineBuilder::new();
                for item in items {
                    builder = builder.concat(self.flatten(item)?);
                }
                Ok(builder)
            }
            LineExpr::Repeat { count, body } => {
                let inner = self.flatten(body)?;
                LineBuilder::repeat(count, inner, self.config.max_line_entries).map_err(|err| {
                    FatalError::LineTooLong {
                        limit: err.limit,
                        pos: self.pos,
                    }
                })
            }
            LineExpr::Reflect(body) => Ok(self.flatten(body)?.reflect()),
        })
    }

    // Queries

    /// Lower a parsed expression against the current tables.
    pub fn lower(&mut self, expr: &Expr) -> EvalResult<ExprId> {
        let result = self.lowerer().lower(expr);
        self.check(result)
    }

    pub fn evaluate(&mut self, id: ExprId) -> EvalResult<Value> {
        let result = self.evaluator().evaluate(id);
        self.check(result)
    }

    /// Value of a constant; constants never need re-evaluation.
    pub fn constant_value(&self, name: &str) -> Option<&Value> {
        self.tables.constants.lookup(name).map(|c| &c.value)
    }

    /// Current value of a variable, or `None` if it is not defined.
    pub fn variable_value(&mut self, name: &str) -> EvalResult<Option<Value>> {
        let Some(expr) = self.tables.variables.lookup(name).map(|v| v.expr) else {
            return Ok(None);
        };
        self.evaluate(expr).map(Some)
    }

    /// Current value of one element attribute.
    ///
    /// `None` if the element is undefined or its kind has no such slot; an
    /// unset slot is `0.0`.
    pub fn attribute_value(&mut self, element: &str, keyword: &str) -> EvalResult<Option<Value>> {
        let slot = self
            .tables
            .elements
            .lookup(element)
            .and_then(|el| el.slot(keyword));
        match slot {
            None => Ok(None),
            Some(None) => Ok(Some(Value::Number(0.0))),
            Some(Some(expr)) => self.evaluate(expr).map(Some),
        }
    }

    /// Current value of a matrix entry; unset entries are `0.0`.
    pub fn matrix_value(&mut self, element: &str, index: MatrixIndex) -> EvalResult<Option<Value>> {
        let entry = self
            .tables
            .elements
            .lookup(element)
            .and_then(Element::matrix)
            .map(|tables| tables.get(index));
        match entry {
            None => Ok(None),
            Some(None) => Ok(Some(Value::Number(0.0))),
            Some(Some(expr)) => self.evaluate(expr).map(Some),
        }
    }

    /// Current length of an element; `0.0` for kinds without a length.
    pub fn element_length(&mut self, name: &str) -> EvalResult<Option<Value>> {
        let length = self.tables.elements.lookup(name).map(Element::length);
        match length {
            None => Ok(None),
            Some(None) => Ok(Some(Value::Number(0.0))),
            Some(Some(expr)) => self.evaluate(expr).map(Some),
        }
    }

    /// What a line entry refers to now.
    pub fn resolve_entry(&self, entry: &LineEntry) -> EntryTarget<'_> {
        self.tables.resolve(&entry.name)
    }

    /// Elements of the given kinds, in definition order.
    pub fn elements_of(&self, kinds: KindSet) -> Vec<&Element> {
        self.tables
            .elements
            .ordered()
            .into_iter()
            .filter(|el| kinds.contains(el.kind.flag()))
            .collect()
    }

    pub fn render(&self, id: ExprId) -> EvalResult<String> {
        Ok(self.exprs.render(id)?)
    }

    // Internals

    fn lowerer(&mut self) -> Lowerer<'_> {
        Lowerer::new(&mut self.exprs, &self.tables, &mut self.reporter, self.pos)
    }

    fn evaluator(&mut self) -> Evaluator<'_> {
        Evaluator::new(
            &self.exprs,
            &self.tables,
            &mut self.reporter,
            self.config.max_eval_depth,
            self.pos,
        )
    }

    fn warn(&mut self, diagnostic: Diagnostic) {
        self.reporter.report(diagnostic);
    }

    /// Report a fatal error before handing it back.
    fn check<T>(&mut self, result: EvalResult<T>) -> EvalResult<T> {
        if let Err(err) = &result {
            self.reporter.report(err.to_diagnostic(self.pos));
        }
        result
    }
}

/// `TYPE = name` or `TYPE = "name"`.
fn label_text(value: &Expr) -> Option<&str> {
    match value {
        Expr::Str(text) | Expr::Ident(text) => Some(text),
        _ => None,
    }
}

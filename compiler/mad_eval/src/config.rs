//! Interpreter configuration.

use mad_diagnostic::DiagnosticConfig;

/// Default cap on expression nesting during one evaluation.
pub const DEFAULT_MAX_EVAL_DEPTH: usize = 10_000;

/// Default cap on the number of entries one line may flatten to.
pub const DEFAULT_MAX_LINE_ENTRIES: usize = 1 << 24;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InterpreterConfig {
    /// Nesting depth at which evaluation stops with a warning and yields 0.
    /// 0 disables the limit.
    pub max_eval_depth: usize,
    /// Entry count above which a repetition stops the run.
    /// 0 leaves only the allocation bound.
    pub max_line_entries: usize,
    pub diagnostics: DiagnosticConfig,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        InterpreterConfig {
            max_eval_depth: DEFAULT_MAX_EVAL_DEPTH,
            max_line_entries: DEFAULT_MAX_LINE_ENTRIES,
            diagnostics: DiagnosticConfig::default(),
        }
    }
}

impl InterpreterConfig {
    #[must_use]
    pub fn with_max_eval_depth(mut self, depth: usize) -> Self {
        self.max_eval_depth = depth;
        self
    }

    #[must_use]
    pub fn with_max_line_entries(mut self, entries: usize) -> Self {
        self.max_line_entries = entries;
        self
    }

    #[must_use]
    pub fn with_diagnostics(mut self, diagnostics: DiagnosticConfig) -> Self {
        self.diagnostics = diagnostics;
        self
    }
}

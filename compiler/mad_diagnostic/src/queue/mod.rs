//! Diagnostic queue for collecting and deduplicating diagnostics.
//!
//! Features:
//! - Warning limits to keep long decks readable
//! - Deduplication of identical messages raised on the same line
//! - Fatal diagnostics are always kept

use crate::{Diagnostic, Severity};

/// Configuration for diagnostic processing.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct DiagnosticConfig {
    /// Maximum number of warnings kept (0 = unlimited).
    pub limit: usize,
    /// Drop a diagnostic identical to the previous one on the same line.
    pub deduplicate: bool,
}

impl Default for DiagnosticConfig {
    fn default() -> Self {
        DiagnosticConfig {
            limit: 0,
            deduplicate: true,
        }
    }
}

impl DiagnosticConfig {
    /// Create a config that keeps everything (for testing).
    pub fn unlimited() -> Self {
        DiagnosticConfig {
            limit: 0,
            deduplicate: false,
        }
    }

    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }
}

/// Queue of reported diagnostics in arrival order.
#[derive(Clone, Debug, Default)]
pub struct DiagnosticQueue {
    diagnostics: Vec<Diagnostic>,
    config: DiagnosticConfig,
    warning_count: usize,
    fatal_count: usize,
    suppressed: usize,
}

impl DiagnosticQueue {
    pub fn new() -> Self {
        Self::with_config(DiagnosticConfig::default())
    }

    pub fn with_config(config: DiagnosticConfig) -> Self {
        DiagnosticQueue {
            diagnostics: Vec::new(),
            config,
            warning_count: 0,
            fatal_count: 0,
            suppressed: 0,
        }
    }

    pub fn config(&self) -> &DiagnosticConfig {
        &self.config
    }

    /// Queue `diagnostic`. Returns false if it was filtered out.
    pub fn add(&mut self, diagnostic: Diagnostic) -> bool {
        if self.is_duplicate(&diagnostic) {
            self.suppressed += 1;
            return false;
        }
        match diagnostic.severity {
            Severity::Warning => {
                if self.limit_reached() {
                    self.suppressed += 1;
                    return false;
                }
                self.warning_count += 1;
            }
            Severity::Fatal => self.fatal_count += 1,
        }
        self.diagnostics.push(diagnostic);
        true
    }

    fn is_duplicate(&self, diagnostic: &Diagnostic) -> bool {
        self.config.deduplicate
            && diagnostic.severity == Severity::Warning
            && self.diagnostics.last().is_some_and(|last| {
                last.pos.line == diagnostic.pos.line
                    && last.code == diagnostic.code
                    && last.message == diagnostic.message
            })
    }

    /// Whether further warnings are dropped.
    pub fn limit_reached(&self) -> bool {
        self.config.limit > 0 && self.warning_count >= self.config.limit
    }

    pub fn warning_count(&self) -> usize {
        self.warning_count
    }

    pub fn fatal_count(&self) -> usize {
        self.fatal_count
    }

    /// Diagnostics dropped by deduplication or the limit.
    pub fn suppressed_count(&self) -> usize {
        self.suppressed
    }

    pub fn has_fatal(&self) -> bool {
        self.fatal_count > 0
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.diagnostics.iter()
    }

    pub fn as_slice(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Take every queued diagnostic, leaving the counters intact.
    pub fn flush(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }
}

impl<'a> IntoIterator for &'a DiagnosticQueue {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.diagnostics.iter()
    }
}

//! Diagnostic Emitters
//!
//! An emitter receives each diagnostic as soon as it is reported. The line
//! format is `"<file>:<line>: <message>"` for positions inside a named file
//! and `"Line <n>: <message>"` for unnamed buffers.

mod terminal;

pub use terminal::{ColorMode, TerminalEmitter};

use mad_ir::SourceMap;

use crate::Diagnostic;

/// Trait for emitting diagnostics.
pub trait DiagnosticEmitter {
    /// Emit a single diagnostic.
    fn emit(&mut self, diagnostic: &Diagnostic, sources: &SourceMap);

    /// Emit multiple diagnostics.
    fn emit_all(&mut self, diagnostics: &[Diagnostic], sources: &SourceMap) {
        for diag in diagnostics {
            self.emit(diag, sources);
        }
    }

    /// Flush any buffered output.
    fn flush(&mut self);

    /// Emit a summary of warnings and fatal errors.
    fn emit_summary(&mut self, warning_count: usize, fatal_count: usize);
}

/// Render the position prefix and message of `diagnostic`.
pub fn render(diagnostic: &Diagnostic, sources: &SourceMap) -> String {
    let pos = diagnostic.pos;
    let message = &diagnostic.message;
    if pos.is_end_of_file() {
        return format!("End of input: {message}");
    }
    match pos.file.and_then(|file| sources.file_name(file)) {
        Some(file) => format!("{file}:{}: {message}", pos.local_line),
        None => format!("Line {}: {message}", pos.line),
    }
}

//! Terminal Emitter
//!
//! Line-oriented output with optional ANSI color on the position prefix.

use std::io::{self, Write};

use mad_ir::SourceMap;

use crate::{Diagnostic, Severity};

use super::{render, DiagnosticEmitter};

mod colors {
    pub const FATAL: &str = "\x1b[1;31m"; // Bold red
    pub const WARNING: &str = "\x1b[1;33m"; // Bold yellow
    pub const NOTE: &str = "\x1b[1;36m"; // Bold cyan
    pub const RESET: &str = "\x1b[0m";
}

#[inline]
fn plural_s(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

/// Color output mode for terminal emitter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    /// For `Auto`, `is_tty` decides.
    pub fn should_use_colors(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

/// Terminal emitter with optional color support.
pub struct TerminalEmitter<W: Write> {
    writer: W,
    colors: bool,
}

impl<W: Write> TerminalEmitter<W> {
    pub fn new(writer: W, colors: bool) -> Self {
        TerminalEmitter { writer, colors }
    }

    pub fn with_color_mode(writer: W, mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter::new(writer, mode.should_use_colors(is_tty))
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_colored(&mut self, text: &str, color: &str) {
        // Output errors are ignored: diagnostics are also queued.
        if self.colors {
            let _ = write!(self.writer, "{color}{text}{}", colors::RESET);
        } else {
            let _ = write!(self.writer, "{text}");
        }
    }
}

impl TerminalEmitter<io::Stderr> {
    pub fn stderr(mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter::with_color_mode(io::stderr(), mode, is_tty)
    }
}

impl<W: Write> DiagnosticEmitter for TerminalEmitter<W> {
    fn emit(&mut self, diagnostic: &Diagnostic, sources: &SourceMap) {
        let color = match diagnostic.severity {
            Severity::Warning => colors::WARNING,
            Severity::Fatal => colors::FATAL,
        };
        self.write_colored(&render(diagnostic, sources), color);
        let _ = writeln!(self.writer);
        for note in &diagnostic.notes {
            let _ = write!(self.writer, "  ");
            self.write_colored("note", colors::NOTE);
            let _ = writeln!(self.writer, ": {note}");
        }
    }

    fn flush(&mut self) {
        let _ = self.writer.flush();
    }

    fn emit_summary(&mut self, warning_count: usize, fatal_count: usize) {
        if fatal_count > 0 {
            let text = format!(
                "run aborted after {fatal_count} fatal error{}",
                plural_s(fatal_count)
            );
            self.write_colored(&text, colors::FATAL);
            let _ = writeln!(self.writer);
        }
        if warning_count > 0 {
            let text = format!("{warning_count} warning{}", plural_s(warning_count));
            self.write_colored(&text, colors::WARNING);
            let _ = writeln!(self.writer);
        }
    }
}

//! One constructor per condition the interpreter reports.
//!
//! Message wording lives here so callers never format diagnostics inline.

use std::fmt;

use mad_ir::{ElementKind, Name, SourcePos};

use crate::{Diagnostic, ErrorCode};

// Table definitions

pub fn constant_redefined(name: &Name, pos: SourcePos) -> Diagnostic {
    Diagnostic::warning(ErrorCode::E1001)
        .with_message(format!("constant {name} is redefined"))
        .at(pos)
}

pub fn constant_shadows_variable(name: &Name, pos: SourcePos) -> Diagnostic {
    Diagnostic::warning(ErrorCode::E1002)
        .with_message(format!(
            "{name} is already defined as a variable, constant not defined"
        ))
        .at(pos)
}

pub fn variable_shadows_constant(name: &Name, pos: SourcePos) -> Diagnostic {
    Diagnostic::warning(ErrorCode::E1003)
        .with_message(format!(
            "{name} is already defined as a constant, variable not defined"
        ))
        .at(pos)
}

pub fn element_redefined(name: &Name, pos: SourcePos) -> Diagnostic {
    Diagnostic::warning(ErrorCode::E1004)
        .with_message(format!("element {name} is redefined"))
        .at(pos)
}

pub fn line_redefined(name: &Name, pos: SourcePos) -> Diagnostic {
    Diagnostic::warning(ErrorCode::E1005)
        .with_message(format!("line {name} is redefined"))
        .at(pos)
}

// Evaluation

pub fn undefined_constant(name: &Name, pos: SourcePos) -> Diagnostic {
    Diagnostic::warning(ErrorCode::E2001)
        .with_message(format!("constant {name} is undefined"))
        .with_note("using 0")
        .at(pos)
}

pub fn undefined_variable(name: &Name, pos: SourcePos) -> Diagnostic {
    Diagnostic::warning(ErrorCode::E2002)
        .with_message(format!("{name} is not yet defined"))
        .at(pos)
}

pub fn undefined_element(name: &Name, pos: SourcePos) -> Diagnostic {
    Diagnostic::warning(ErrorCode::E2003)
        .with_message(format!("element {name} is not yet defined"))
        .at(pos)
}

/// `symbol` is the offending identifier, or the quoted literal.
pub fn string_in_algebra(symbol: &str, pos: SourcePos) -> Diagnostic {
    Diagnostic::fatal(ErrorCode::E2004)
        .with_message(format!(
            "string constant {symbol} used in an algebraic expression"
        ))
        .at(pos)
}

pub fn recursion_limit(limit: usize, pos: SourcePos) -> Diagnostic {
    Diagnostic::warning(ErrorCode::E2005)
        .with_message(format!("expression nesting exceeds {limit} levels"))
        .with_note("a variable probably refers to itself; using 0")
        .at(pos)
}

// Elements

pub fn unknown_attribute(kind: ElementKind, keyword: &str, pos: SourcePos) -> Diagnostic {
    Diagnostic::warning(ErrorCode::E3001)
        .with_message(format!("{kind} has no attribute {keyword}, ignored"))
        .at(pos)
}

pub fn flag_without_default(kind: ElementKind, keyword: &str, pos: SourcePos) -> Diagnostic {
    Diagnostic::warning(ErrorCode::E3002)
        .with_message(format!(
            "attribute {keyword} of {kind} needs a value, ignored"
        ))
        .at(pos)
}

pub fn matrix_index_out_of_range(index: &str, pos: SourcePos) -> Diagnostic {
    Diagnostic::warning(ErrorCode::E3003)
        .with_message(format!("matrix index {index} out of range 1..6, ignored"))
        .at(pos)
}

pub fn matrix_entry_on_non_matrix(name: &Name, kind: ElementKind, pos: SourcePos) -> Diagnostic {
    Diagnostic::warning(ErrorCode::E3004)
        .with_message(format!(
            "{kind} {name} has no transfer matrix, entry ignored"
        ))
        .at(pos)
}

// Lines

pub fn undefined_line_member(name: &Name, pos: SourcePos) -> Diagnostic {
    Diagnostic::warning(ErrorCode::E4001)
        .with_message(format!("beam element/line {name} not yet defined"))
        .at(pos)
}

pub fn line_too_long(limit: usize, pos: SourcePos) -> Diagnostic {
    Diagnostic::fatal(ErrorCode::E4002)
        .with_message(format!("repeated line would exceed {limit} entries"))
        .at(pos)
}

// Comments

pub fn unmatched_end_comment(pos: SourcePos) -> Diagnostic {
    Diagnostic::warning(ErrorCode::E5001)
        .with_message("ENDCOMMENT without matching COMMENT")
        .at(pos)
}

// Internal

pub fn internal(message: impl fmt::Display, pos: SourcePos) -> Diagnostic {
    Diagnostic::fatal(ErrorCode::E9001)
        .with_message(format!("internal error: {message}"))
        .at(pos)
}

#[cfg(test)]
mod tests;

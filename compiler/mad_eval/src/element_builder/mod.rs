//! Per-statement element assembly.
//!
//! An `ElementBuilder` starts from a record with every slot unset and
//! accepts already-lowered attribute expressions one item at a time. Setting
//! a slot twice keeps the last value; the replaced expression is handed
//! back so the caller can release it.

use mad_diagnostic::{errors, Diagnostic};
use mad_ir::{Element, ElementKind, ExprArena, ExprId, MatrixIndex, Name, SourcePos};
use thiserror::Error;

/// Why an attribute item was ignored.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AttributeError {
    #[error("{kind} has no attribute {keyword}")]
    Unknown { kind: ElementKind, keyword: String },

    #[error("attribute {keyword} of {kind} needs a value")]
    NoDefault { kind: ElementKind, keyword: String },

    #[error("{kind} has no transfer matrix")]
    NotMatrix { kind: ElementKind },
}

impl AttributeError {
    pub fn to_diagnostic(&self, element: &Name, pos: SourcePos) -> Diagnostic {
        match self {
            AttributeError::Unknown { kind, keyword } => {
                errors::unknown_attribute(*kind, keyword, pos)
            }
            AttributeError::NoDefault { kind, keyword } => {
                errors::flag_without_default(*kind, keyword, pos)
            }
            AttributeError::NotMatrix { kind } => {
                errors::matrix_entry_on_non_matrix(element, *kind, pos)
            }
        }
    }
}

#[derive(Debug)]
pub struct ElementBuilder {
    element: Element,
}

impl ElementBuilder {
    pub fn start(name: Name, kind: ElementKind, pos: SourcePos) -> Self {
        ElementBuilder {
            element: Element::new(name, kind, pos),
        }
    }

    pub fn name(&self) -> &Name {
        &self.element.name
    }

    pub fn kind(&self) -> ElementKind {
        self.element.kind
    }

    /// Whether `keyword` names one of this kind's slots.
    pub fn accepts(&self, keyword: &str) -> bool {
        self.element.kind.slot_index(keyword).is_some()
    }

    fn slot_index(&self, keyword: &str) -> Result<usize, AttributeError> {
        self.element
            .kind
            .slot_index(keyword)
            .ok_or_else(|| AttributeError::Unknown {
                kind: self.element.kind,
                keyword: keyword.trim().to_ascii_uppercase(),
            })
    }

    /// `KEYWORD = expr`
    pub fn attribute(
        &mut self,
        keyword: &str,
        expr: ExprId,
    ) -> Result<Option<ExprId>, AttributeError> {
        let index = self.slot_index(keyword)?;
        Ok(self.element.set_slot(index, expr))
    }

    /// Bare `KEYWORD`: installs the kind's default tilt as a number node.
    pub fn flag(
        &mut self,
        keyword: &str,
        exprs: &mut ExprArena,
    ) -> Result<Option<ExprId>, AttributeError> {
        let index = self.slot_index(keyword)?;
        let kind = self.element.kind;
        let value = kind
            .flag_default(keyword)
            .ok_or_else(|| AttributeError::NoDefault {
                kind,
                keyword: keyword.trim().to_ascii_uppercase(),
            })?;
        Ok(self.element.set_slot(index, exprs.number(value)))
    }

    /// `TYPE = label`
    pub fn label(&mut self, label: &str) {
        self.element.label = Some(label.trim().to_string());
    }

    /// `RM(i, j) = expr` / `TM(i, j, k) = expr`
    pub fn matrix_entry(
        &mut self,
        index: MatrixIndex,
        expr: ExprId,
    ) -> Result<Option<ExprId>, AttributeError> {
        let kind = self.element.kind;
        let tables = self
            .element
            .matrix_mut()
            .ok_or(AttributeError::NotMatrix { kind })?;
        Ok(tables.set(index, expr))
    }

    pub fn finish(self) -> Element {
        self.element
    }
}

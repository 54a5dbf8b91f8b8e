//! MAD Diagnostic - warning and fatal-error reporting
//!
//! Every recoverable condition met while building tables, evaluating
//! expressions or assembling lines becomes a [`Diagnostic`]. The
//! [`Reporter`] mirrors each one into `tracing`, queues it, and hands it to
//! an attached [`DiagnosticEmitter`] as soon as it is raised.

mod diagnostic;
mod emitter;
mod error_code;
pub mod errors;
mod queue;
mod reporter;

pub use diagnostic::{Diagnostic, Severity};
pub use emitter::{render, ColorMode, DiagnosticEmitter, TerminalEmitter};
pub use error_code::ErrorCode;
pub use queue::{DiagnosticConfig, DiagnosticQueue};
pub use reporter::Reporter;

//! Stack safety for recursive evaluation.
//!
//! Two separate protections:
//! - [`ensure_sufficient_stack`] grows the native stack on demand, so a
//!   legitimately deep expression (a long chain of variables, a heavily
//!   parenthesized line body) never overflows.
//! - [`DepthGuard`] caps the logical nesting depth, so a variable that
//!   refers to itself stops with a diagnostic instead of recursing until
//!   memory runs out.
//!
//! On `wasm32` the stack cannot be grown and `ensure_sufficient_stack` is a
//! plain call.

mod depth;

pub use depth::{DepthExceeded, DepthGuard};

/// Grow when less than this much stack remains (100KB).
const RED_ZONE: usize = 100 * 1024;

/// Size of each new stack segment (1MB).
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Run `f`, first switching to a fresh stack segment if the current one is
/// nearly exhausted.
///
/// Wrap the body of every recursive evaluator or builder step:
///
/// ```text
/// fn eval(&mut self, id: ExprId) -> Result<Value, FatalError> {
///     ensure_sufficient_stack(|| self.eval_kind(id))
/// }
/// ```
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

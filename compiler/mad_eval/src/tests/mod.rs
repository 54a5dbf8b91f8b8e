//! Test modules for crate-private helpers.

mod lower_tests;
mod operators_tests;

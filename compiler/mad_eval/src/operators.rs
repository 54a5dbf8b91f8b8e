//! Numeric operator implementations for the evaluator.
//!
//! Direct enum dispatch: the operator set is closed. All arithmetic is IEEE
//! `f64`; division by zero and domain errors yield `inf`/`NaN` without a
//! diagnostic.

use mad_ir::{BinaryOp, MathFunc, UnaryOp};

#[inline]
pub fn evaluate_binary(op: BinaryOp, left: f64, right: f64) -> f64 {
    match op {
        BinaryOp::Add => left + right,
        BinaryOp::Sub => left - right,
        BinaryOp::Mul => left * right,
        BinaryOp::Div => left / right,
        BinaryOp::Pow => left.powf(right),
        BinaryOp::Max => left.max(right),
        BinaryOp::Min => left.min(right),
    }
}

#[inline]
pub fn evaluate_unary(op: UnaryOp, operand: f64) -> f64 {
    match op {
        UnaryOp::Plus => operand,
        UnaryOp::Minus => -operand,
    }
}

#[inline]
pub fn evaluate_func(func: MathFunc, arg: f64) -> f64 {
    match func {
        MathFunc::Sqrt => arg.sqrt(),
        MathFunc::Log => arg.ln(),
        MathFunc::Exp => arg.exp(),
        MathFunc::Sin => arg.sin(),
        MathFunc::Cos => arg.cos(),
        MathFunc::Tan => arg.tan(),
        MathFunc::Asin => arg.asin(),
        MathFunc::Abs => arg.abs(),
    }
}

//! Tests for numeric operator dispatch.

use crate::operators::{evaluate_binary, evaluate_func, evaluate_unary};
use mad_ir::{BinaryOp, MathFunc, UnaryOp};
use std::f64::consts::PI;

#[test]
fn test_arithmetic() {
    assert_eq!(evaluate_binary(BinaryOp::Add, 2.0, 3.0), 5.0);
    assert_eq!(evaluate_binary(BinaryOp::Sub, 5.0, 3.0), 2.0);
    assert_eq!(evaluate_binary(BinaryOp::Mul, 2.5, 4.0), 10.0);
    assert_eq!(evaluate_binary(BinaryOp::Div, 7.0, 2.0), 3.5);
    assert_eq!(evaluate_binary(BinaryOp::Pow, 2.0, 10.0), 1024.0);
}

#[test]
fn test_max_min() {
    assert_eq!(evaluate_binary(BinaryOp::Max, -1.0, 3.0), 3.0);
    assert_eq!(evaluate_binary(BinaryOp::Min, -1.0, 3.0), -1.0);
}

#[test]
fn test_division_by_zero_is_ieee() {
    assert_eq!(evaluate_binary(BinaryOp::Div, 1.0, 0.0), f64::INFINITY);
    assert_eq!(evaluate_binary(BinaryOp::Div, -1.0, 0.0), f64::NEG_INFINITY);
    assert!(evaluate_binary(BinaryOp::Div, 0.0, 0.0).is_nan());
}

#[test]
fn test_unary() {
    assert_eq!(evaluate_unary(UnaryOp::Minus, 1.5), -1.5);
    assert_eq!(evaluate_unary(UnaryOp::Plus, -2.0), -2.0);
}

#[test]
fn test_functions() {
    assert_eq!(evaluate_func(MathFunc::Sqrt, 16.0), 4.0);
    assert_eq!(evaluate_func(MathFunc::Log, 1.0), 0.0);
    assert_eq!(evaluate_func(MathFunc::Exp, 0.0), 1.0);
    assert_eq!(evaluate_func(MathFunc::Sin, 0.0), 0.0);
    assert_eq!(evaluate_func(MathFunc::Cos, 0.0), 1.0);
    assert_eq!(evaluate_func(MathFunc::Tan, 0.0), 0.0);
    assert_eq!(evaluate_func(MathFunc::Asin, 1.0), PI / 2.0);
    assert_eq!(evaluate_func(MathFunc::Abs, -3.0), 3.0);
}

#[test]
fn test_domain_errors_are_nan() {
    assert!(evaluate_func(MathFunc::Sqrt, -1.0).is_nan());
    assert!(evaluate_func(MathFunc::Asin, 2.0).is_nan());
    assert_eq!(evaluate_func(MathFunc::Log, 0.0), f64::NEG_INFINITY);
}

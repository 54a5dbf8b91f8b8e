#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use pretty_assertions::assert_eq;

fn sample(arena: &mut ExprArena) -> ExprId {
    // (K1 + 0.5) * Q1[L]
    let k1 = arena.alloc(ExprKind::NumIdent(Name::new("k1")));
    let half = arena.number(0.5);
    let sum = arena.alloc(ExprKind::Binary {
        op: BinaryOp::Add,
        left: k1,
        right: half,
    });
    let paren = arena.alloc(ExprKind::Brackets(sum));
    let len = arena.alloc(ExprKind::ElementLength(Name::new("q1")));
    arena.alloc(ExprKind::Binary {
        op: BinaryOp::Mul,
        left: paren,
        right: len,
    })
}

#[test]
fn test_render_infix_and_brackets() {
    let mut arena = ExprArena::new();
    let root = sample(&mut arena);
    assert_eq!(arena.render(root).unwrap(), "(K1+0.5)*Q1[L]");
}

#[test]
fn test_render_functions_and_unary() {
    let mut arena = ExprArena::new();
    let x = arena.alloc(ExprKind::VarIdent(Name::new("x")));
    let minus = arena.alloc(ExprKind::Unary {
        op: UnaryOp::Minus,
        operand: x,
    });
    let sqrt = arena.alloc(ExprKind::Func {
        func: MathFunc::Sqrt,
        arg: minus,
    });
    let two = arena.number(2.0);
    let max = arena.alloc(ExprKind::Binary {
        op: BinaryOp::Max,
        left: sqrt,
        right: two,
    });
    assert_eq!(arena.render(max).unwrap(), "MAX(SQRT(-X),2)");
}

#[test]
fn test_render_string_literal() {
    let mut arena = ExprArena::new();
    let s = arena.alloc(ExprKind::Str("fodo".to_string()));
    assert_eq!(arena.render(s).unwrap(), "\"fodo\"");
}

#[test]
fn test_release_frees_whole_subtree() {
    let mut arena = ExprArena::new();
    let root = sample(&mut arena);
    let keep = arena.number(1.0);
    assert_eq!(arena.len(), 7);

    assert_eq!(arena.release(root), Ok(6));
    assert_eq!(arena.len(), 1);
    assert!(arena.contains(keep));
    assert!(!arena.contains(root));
}

#[test]
fn test_release_twice_is_an_error() {
    let mut arena = ExprArena::new();
    let one = arena.number(1.0);
    arena.release(one).unwrap();
    assert!(arena.release(one).is_err());
    assert!(arena.get(one).is_err());
}

#[test]
fn test_release_deep_chain_does_not_recurse() {
    let mut arena = ExprArena::new();
    let mut id = arena.number(1.0);
    for _ in 0..200_000 {
        id = arena.alloc(ExprKind::Unary {
            op: UnaryOp::Minus,
            operand: id,
        });
    }
    assert_eq!(arena.release(id), Ok(200_001));
    assert!(arena.is_empty());
}

#[test]
fn test_math_func_keywords() {
    assert_eq!(MathFunc::from_keyword("asin"), Some(MathFunc::Asin));
    assert_eq!(MathFunc::from_keyword(" Sqrt "), Some(MathFunc::Sqrt));
    assert_eq!(MathFunc::from_keyword("atan"), None);
}

#[test]
fn test_children_and_ident() {
    let mut arena = ExprArena::new();
    let root = sample(&mut arena);
    let kind = arena.get(root).unwrap();
    assert!(kind.children().iter().all(Option::is_some));
    assert_eq!(kind.ident(), None);

    let name = ExprKind::StrIdent(Name::new("label"));
    assert_eq!(name.ident().map(Name::as_str), Some("LABEL"));
    assert_eq!(name.children(), [None, None]);
}

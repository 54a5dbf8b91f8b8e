#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Tests for identifier classification during lowering.

use crate::lower::Lowerer;
use crate::{FatalError, SymbolTables};
use mad_diagnostic::{ErrorCode, Reporter};
use mad_ir::syntax::Expr;
use mad_ir::{
    BinaryOp, Constant, Element, ElementKind, ExprArena, ExprKind, Name, SourcePos, Value,
};

fn tables_with_constants(exprs: &mut ExprArena) -> SymbolTables {
    let mut tables = SymbolTables::new();
    for (name, value) in [("two", Value::Number(2.0)), ("label", Value::from("arc"))] {
        let source = exprs.number(0.0);
        let record = Constant {
            name: Name::new(name),
            value,
            source,
            pos: SourcePos::buffer(1),
        };
        tables.constants.insert(record, exprs).unwrap();
    }
    tables
}

#[test]
fn test_identifiers_are_classified() {
    let mut exprs = ExprArena::new();
    let tables = tables_with_constants(&mut exprs);
    let mut reporter = Reporter::default();
    let (num, text, var) = {
        let mut lowerer = Lowerer::new(&mut exprs, &tables, &mut reporter, SourcePos::buffer(3));
        (
            lowerer.lower(&Expr::ident("Two")).unwrap(),
            lowerer.lower(&Expr::ident("label")).unwrap(),
            lowerer.lower(&Expr::ident("kqf")).unwrap(),
        )
    };

    assert_eq!(exprs.get(num), Ok(&ExprKind::NumIdent(Name::new("TWO"))));
    assert_eq!(exprs.get(text), Ok(&ExprKind::StrIdent(Name::new("LABEL"))));
    assert_eq!(exprs.get(var), Ok(&ExprKind::VarIdent(Name::new("KQF"))));

    let codes: Vec<_> = reporter.queue().iter().map(|d| d.code).collect();
    assert_eq!(codes, vec![ErrorCode::E2002]);
}

#[test]
fn test_string_constant_in_arithmetic_is_rejected() {
    let mut exprs = ExprArena::new();
    let tables = tables_with_constants(&mut exprs);
    let mut reporter = Reporter::default();
    let mut lowerer = Lowerer::new(&mut exprs, &tables, &mut reporter, SourcePos::buffer(4));

    let expr = Expr::binary(BinaryOp::Mul, Expr::ident("label"), Expr::Number(2.0));
    assert_eq!(
        lowerer.lower(&expr),
        Err(FatalError::string_in_algebra("LABEL", SourcePos::buffer(4)))
    );
}

#[test]
fn test_parenthesized_string_stays_a_string() {
    let mut exprs = ExprArena::new();
    let tables = SymbolTables::new();
    let mut reporter = Reporter::default();
    let id = Lowerer::new(&mut exprs, &tables, &mut reporter, SourcePos::buffer(1))
        .lower(&Expr::string("fodo").paren())
        .unwrap();
    assert_eq!(exprs.render(id).unwrap(), "(\"fodo\")");
}

#[test]
fn test_element_length_warns_only_when_undefined() {
    let mut exprs = ExprArena::new();
    let mut tables = SymbolTables::new();
    let element = Element::new(Name::new("qf"), ElementKind::Quadrupole, SourcePos::buffer(1));
    tables.elements.insert(element, &mut exprs).unwrap();
    let mut reporter = Reporter::default();
    {
        let mut lowerer = Lowerer::new(&mut exprs, &tables, &mut reporter, SourcePos::buffer(2));
        lowerer.lower(&Expr::length_of("qf")).unwrap();
        lowerer.lower(&Expr::length_of("qd")).unwrap();
    }

    let codes: Vec<_> = reporter.queue().iter().map(|d| d.code).collect();
    assert_eq!(codes, vec![ErrorCode::E2003]);
}

#[test]
fn test_constant_definition_sees_only_constants() {
    let mut exprs = ExprArena::new();
    let tables = tables_with_constants(&mut exprs);
    let mut reporter = Reporter::default();
    let (known, unknown) = {
        let mut lowerer = Lowerer::new(&mut exprs, &tables, &mut reporter, SourcePos::buffer(5));
        (
            lowerer.lower_constant(&Expr::ident("two")).unwrap(),
            lowerer.lower_constant(&Expr::ident("kqf")).unwrap(),
        )
    };

    assert_eq!(exprs.get(known), Ok(&ExprKind::NumIdent(Name::new("TWO"))));
    assert_eq!(exprs.get(unknown), Ok(&ExprKind::Number(0.0)));

    let codes: Vec<_> = reporter.queue().iter().map(|d| d.code).collect();
    assert_eq!(codes, vec![ErrorCode::E2001]);
}

#[test]
fn test_constant_mode_ends_with_the_definition() {
    let mut exprs = ExprArena::new();
    let tables = SymbolTables::new();
    let mut reporter = Reporter::default();
    let mut lowerer = Lowerer::new(&mut exprs, &tables, &mut reporter, SourcePos::buffer(6));
    lowerer.lower_constant(&Expr::ident("kqf")).unwrap();
    let var = lowerer.lower(&Expr::ident("kqf")).unwrap();
    assert_eq!(exprs.get(var), Ok(&ExprKind::VarIdent(Name::new("KQF"))));
}

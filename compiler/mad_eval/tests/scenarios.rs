//! End-to-end decks fed statement by statement through the interpreter.
//!
//! Each test builds the statements a front end would produce for a short
//! deck and checks the resulting tables and diagnostics.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

use mad_diagnostic::{ErrorCode, TerminalEmitter};
use mad_eval::{EntryTarget, FatalError, InterpreterConfig, InterpreterContext};
use mad_ir::syntax::{Expr, LineExpr};
use mad_ir::{BinaryOp, ElementItem, ElementKind, Sign, SourcePos, Statement, StmtKind, Value};
use pretty_assertions::assert_eq;

fn at(line: u32) -> SourcePos {
    SourcePos::buffer(line)
}

fn num(value: f64) -> Expr {
    Expr::Number(value)
}

fn signed(ctx: &InterpreterContext, line: &str) -> Vec<(String, Sign)> {
    ctx.lines()
        .lookup(line)
        .expect("line defined")
        .entries
        .iter()
        .map(|e| (e.name.to_string(), e.sign))
        .collect()
}

fn codes(ctx: &InterpreterContext) -> Vec<ErrorCode> {
    ctx.diagnostics().iter().map(|d| d.code).collect()
}

/// `CONST PI2 = 1.5708;` then `Q1: QUADRUPOLE, L=1.0, K1=0.3;`
fn quadrupole_deck() -> Vec<Statement> {
    vec![
        Statement::constant("PI2", num(1.5708), at(1)),
        Statement::element(
            "Q1",
            ElementKind::Quadrupole,
            vec![
                ElementItem::assign("L", num(1.0)),
                ElementItem::assign("K1", num(0.3)),
            ],
            at(2),
        ),
    ]
}

#[test]
fn quadrupole_definition() {
    mad_eval::init_tracing();
    let mut ctx = InterpreterContext::new();
    ctx.run(quadrupole_deck()).unwrap();

    let q1 = ctx.elements().lookup("q1").unwrap();
    assert_eq!(q1.kind, ElementKind::Quadrupole);
    assert_eq!(ctx.constant_value("PI2"), Some(&Value::Number(1.5708)));
    assert_eq!(ctx.attribute_value("Q1", "L"), Ok(Some(Value::Number(1.0))));
    assert_eq!(ctx.attribute_value("Q1", "K1"), Ok(Some(Value::Number(0.3))));
    assert!(ctx.diagnostics().is_empty());
}

#[test]
fn repeated_line_flattens() {
    let mut ctx = InterpreterContext::new();
    ctx.run(quadrupole_deck()).unwrap();
    ctx.run(vec![
        Statement::line("L1", LineExpr::refs(["Q1", "Q1"]), at(3)),
        Statement::line("L2", LineExpr::repeat("2", LineExpr::reference("L1")), at(4)),
    ])
    .unwrap();

    let plus = ("Q1".to_string(), Sign::Plus);
    assert_eq!(signed(&ctx, "L2"), vec![plus.clone(), plus.clone(), plus.clone(), plus]);
}

#[test]
fn reflected_line_reverses_and_flips() {
    let mut ctx = InterpreterContext::new();
    ctx.run(quadrupole_deck()).unwrap();
    ctx.run(vec![
        Statement::element("D1", ElementKind::Drift, vec![], at(3)),
        Statement::line("L1", LineExpr::refs(["Q1", "D1"]), at(4)),
        Statement::line("L3", LineExpr::reference("L1").reflect(), at(5)),
        Statement::line("L4", LineExpr::reference("L3").reflect(), at(6)),
    ])
    .unwrap();

    assert_eq!(
        signed(&ctx, "L3"),
        vec![("D1".to_string(), Sign::Minus), ("Q1".to_string(), Sign::Minus)]
    );
    assert_eq!(signed(&ctx, "L4"), signed(&ctx, "L1"));
}

#[test]
fn undefined_name_warns_and_continues() {
    let mut ctx = InterpreterContext::new();
    let expr = Expr::binary(BinaryOp::Mul, num(2.0), Expr::ident("UNDEFCONST"));
    ctx.run(vec![
        Statement::variable("K", expr, at(1)),
        Statement::variable("AFTER", num(1.0), at(2)),
    ])
    .unwrap();

    assert_eq!(codes(&ctx), vec![ErrorCode::E2002]);
    assert!(ctx.variables().lookup("AFTER").is_some());
    assert_eq!(ctx.variable_value("K"), Ok(Some(Value::Number(0.0))));
    assert!(!ctx.diagnostics().has_fatal());
}

#[test]
fn string_constant_in_attribute_aborts() {
    let mut ctx = InterpreterContext::new();
    let result = ctx.run(vec![
        Statement::constant("STRA", Expr::string("foo"), at(1)),
        Statement::element(
            "Q1",
            ElementKind::Quadrupole,
            vec![ElementItem::assign(
                "K1",
                Expr::binary(BinaryOp::Add, num(1.0), Expr::ident("STRA")),
            )],
            at(2),
        ),
    ]);

    let err = result.unwrap_err();
    assert!(err.to_string().contains("STRA"));
    assert!(matches!(err, FatalError::StringInAlgebra { .. }));
    let fatal = ctx.diagnostics().iter().find(|d| d.is_fatal()).unwrap();
    assert!(fatal.message.contains("STRA"));
    assert_eq!(fatal.pos, at(2));
}

#[test]
fn constant_built_from_a_variable_is_zero() {
    let mut ctx = InterpreterContext::new();
    ctx.run(vec![
        Statement::variable("V", num(3.0), at(1)),
        Statement::constant("C", Expr::binary(BinaryOp::Mul, Expr::ident("V"), num(2.0)), at(2)),
    ])
    .unwrap();

    assert_eq!(ctx.constant_value("C"), Some(&Value::Number(0.0)));
    assert_eq!(codes(&ctx), vec![ErrorCode::E2001]);
    let warning = ctx.diagnostics().iter().next().unwrap();
    assert_eq!(warning.pos, at(2));
}

#[test]
fn constant_built_from_constants_is_folded() {
    let mut ctx = InterpreterContext::new();
    ctx.run(vec![
        Statement::constant("A", num(2.0), at(1)),
        Statement::constant("B", Expr::binary(BinaryOp::Mul, Expr::ident("A"), num(3.0)), at(2)),
        Statement::constant("A", num(5.0), at(3)),
    ])
    .unwrap();

    assert_eq!(ctx.constant_value("B"), Some(&Value::Number(6.0)));
    assert_eq!(ctx.constant_value("A"), Some(&Value::Number(5.0)));
    assert!(!ctx.diagnostics().has_fatal());
}

#[test]
fn constant_redefined_as_string_aborts_later_reads() {
    let mut ctx = InterpreterContext::new();
    ctx.run(vec![
        Statement::constant("A", num(1.0), at(1)),
        Statement::element(
            "Q",
            ElementKind::Quadrupole,
            vec![ElementItem::assign("K1", Expr::ident("A"))],
            at(2),
        ),
        Statement::constant("A", Expr::string("s"), at(3)),
    ])
    .unwrap();
    assert!(!ctx.diagnostics().has_fatal());

    let err = ctx.attribute_value("Q", "K1").unwrap_err();
    assert!(matches!(err, FatalError::StringInAlgebra { ref symbol, .. } if symbol == "A"));
    assert!(ctx.diagnostics().has_fatal());
}

#[test]
fn oversized_repetition_stops_the_run() {
    let mut ctx = InterpreterContext::new();
    ctx.run(quadrupole_deck()).unwrap();
    let result = ctx.run(vec![
        Statement::line("HUGE", LineExpr::repeat("1e19", LineExpr::reference("Q1")), at(3)),
        Statement::variable("AFTER", num(1.0), at(4)),
    ]);

    assert!(matches!(result, Err(FatalError::LineTooLong { .. })));
    assert!(ctx.lines().lookup("HUGE").is_none());
    assert!(ctx.variables().lookup("AFTER").is_none());
    let fatal = ctx.diagnostics().iter().find(|d| d.is_fatal()).unwrap();
    assert_eq!(fatal.code, ErrorCode::E4002);
    assert_eq!(fatal.pos, at(3));
}

#[test]
fn repetition_within_configured_limit() {
    let config = InterpreterConfig::default().with_max_line_entries(3);
    let mut ctx = InterpreterContext::with_config(config);
    ctx.run(quadrupole_deck()).unwrap();
    ctx.run(vec![Statement::line("L3", LineExpr::repeat("3", LineExpr::reference("Q1")), at(3))])
        .unwrap();
    assert_eq!(signed(&ctx, "L3").len(), 3);

    let err = ctx
        .run(vec![Statement::line("L4", LineExpr::repeat("4", LineExpr::reference("Q1")), at(4))])
        .unwrap_err();
    assert_eq!(err, FatalError::LineTooLong { limit: 3, pos: at(4) });
    assert_eq!(ctx.diagnostics().fatal_count(), 1);
}

#[test]
fn bare_tilt_on_sbend_is_half_pi() {
    let mut ctx = InterpreterContext::new();
    ctx.run(vec![Statement::element(
        "SB1",
        ElementKind::Sbend,
        vec![ElementItem::assign("L", num(2.0)), ElementItem::flag("TILT")],
        at(1),
    )])
    .unwrap();

    assert_eq!(
        ctx.attribute_value("SB1", "TILT"),
        Ok(Some(Value::Number(1.570_796_326_794_896_6)))
    );
}

#[test]
fn names_are_case_insensitive() {
    let mut ctx = InterpreterContext::new();
    ctx.run(vec![
        Statement::variable("kqf", num(0.1), at(1)),
        Statement::element(
            "qf",
            ElementKind::Quadrupole,
            vec![ElementItem::assign("k1", Expr::ident("KQF"))],
            at(2),
        ),
        Statement::line("cell", LineExpr::refs(["QF", "Qf"]), at(3)),
    ])
    .unwrap();

    assert_eq!(ctx.attribute_value("QF", "K1"), Ok(Some(Value::Number(0.1))));
    assert_eq!(signed(&ctx, "CELL").len(), 2);
    assert!(ctx.diagnostics().is_empty());
}

#[test]
fn lattice_follows_knob_changes() {
    let mut ctx = InterpreterContext::new();
    let half = Expr::binary(BinaryOp::Div, Expr::ident("LQ"), num(2.0));
    ctx.run(vec![
        Statement::variable("LQ", num(0.8), at(1)),
        Statement::element("QH", ElementKind::Quadrupole, vec![ElementItem::assign("L", half)], at(2)),
        Statement::variable(
            "TOTAL",
            Expr::binary(BinaryOp::Mul, num(2.0), Expr::length_of("QH")),
            at(3),
        ),
        Statement::immediate("FROZEN", Expr::ident("TOTAL"), at(4)),
        Statement::variable("LQ", num(1.2), at(5)),
    ])
    .unwrap();

    assert_eq!(ctx.element_length("QH"), Ok(Some(Value::Number(0.6))));
    assert_eq!(ctx.variable_value("TOTAL"), Ok(Some(Value::Number(1.2))));
    assert_eq!(ctx.variable_value("FROZEN"), Ok(Some(Value::Number(0.8))));
}

#[test]
fn commented_block_and_trailing_text() {
    let mut ctx = InterpreterContext::new();
    ctx.run(vec![
        Statement::new(StmtKind::BeginComment, at(1)),
        Statement::element("GHOST", ElementKind::Marker, vec![], at(2)),
        Statement::new(StmtKind::EndComment, at(3)),
        Statement::line("L1", LineExpr::refs(["GHOST"]), at(4)),
        Statement::new(
            StmtKind::Comment {
                text: "last words".to_string(),
                at_eof: true,
            },
            at(5),
        ),
    ])
    .unwrap();

    assert!(ctx.elements().is_empty());
    let entry = &ctx.lines().lookup("L1").unwrap().entries[0];
    assert_eq!(ctx.resolve_entry(entry), EntryTarget::Undefined);
    assert_eq!(codes(&ctx), vec![ErrorCode::E4001]);
    assert_eq!(ctx.comments().trailing().count(), 1);
}

#[derive(Clone, Default)]
struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn diagnostics_are_printed_with_file_lines() {
    let buffer = SharedBuffer::default();
    let mut ctx = InterpreterContext::new()
        .with_emitter(Box::new(TerminalEmitter::new(buffer.clone(), false)));
    let file = ctx.sources_mut().enter_file("ring.mad");

    ctx.run(vec![Statement::variable(
        "K",
        Expr::ident("MISSING"),
        SourcePos::in_file(file, 12, 4),
    )])
    .unwrap();
    ctx.finish();

    let output = String::from_utf8(buffer.0.borrow().clone()).unwrap();
    assert!(output.contains("ring.mad:4"), "{output}");
    assert!(output.contains("MISSING"), "{output}");
    assert!(output.contains("1 warning"), "{output}");
}

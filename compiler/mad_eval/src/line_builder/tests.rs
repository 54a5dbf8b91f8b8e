#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use mad_ir::{Element, ElementKind, ExprArena, Sign};
use pretty_assertions::assert_eq;

fn names(builder: &LineBuilder) -> Vec<String> {
    builder.entries().iter().map(ToString::to_string).collect()
}

fn tables() -> SymbolTables {
    let mut exprs = ExprArena::new();
    let mut tables = SymbolTables::new();
    for name in ["qf", "qd", "d"] {
        let element = Element::new(Name::new(name), ElementKind::Drift, SourcePos::buffer(1));
        tables.elements.insert(element, &mut exprs).unwrap();
    }
    let cell = Line {
        name: Name::new("cell"),
        entries: vec![LineEntry::plus("qf"), LineEntry::plus("d"), LineEntry::minus("qd")],
        pos: SourcePos::buffer(2),
    };
    tables.lines.insert(cell, &mut exprs).unwrap();
    tables
}

#[test]
fn test_reference_resolution() {
    let tables = tables();
    let (element, found) = LineBuilder::reference(Name::new("QF"), &tables);
    assert!(found);
    assert_eq!(names(&element), vec!["+QF"]);

    let (spliced, found) = LineBuilder::reference(Name::new("cell"), &tables);
    assert!(found);
    assert_eq!(names(&spliced), vec!["+QF", "+D", "-QD"]);

    let (forward, found) = LineBuilder::reference(Name::new("later"), &tables);
    assert!(!found);
    assert_eq!(names(&forward), vec!["+LATER"]);
}

#[test]
fn test_concat_preserves_order() {
    let a = LineBuilder::from_entries(vec![LineEntry::plus("a"), LineEntry::plus("b")]);
    let b = LineBuilder::from_entries(vec![LineEntry::minus("c")]);
    assert_eq!(names(&a.concat(b)), vec!["+A", "+B", "-C"]);
}

#[test]
fn test_repeat() {
    let body = LineBuilder::from_entries(vec![LineEntry::plus("a"), LineEntry::minus("b")]);
    let repeated = LineBuilder::repeat("3", body.clone(), 0).unwrap();
    assert_eq!(repeated.len(), 6);
    assert_eq!(names(&repeated), vec!["+A", "-B", "+A", "-B", "+A", "-B"]);
    assert!(LineBuilder::repeat("0", body, 0).unwrap().is_empty());
}

#[test]
fn test_repeat_respects_limit() {
    let body = LineBuilder::from_entries(vec![LineEntry::plus("a"), LineEntry::plus("b")]);
    assert_eq!(LineBuilder::repeat("5", body.clone(), 10).unwrap().len(), 10);
    assert_eq!(
        LineBuilder::repeat("6", body.clone(), 10),
        Err(LineOverflow { limit: 10 })
    );
}

#[test]
fn test_huge_repeat_count_overflows_instead_of_allocating() {
    let body = LineBuilder::from_entries(vec![LineEntry::plus("q1")]);
    for count in ["1e19", "1e300"] {
        let err = LineBuilder::repeat(count, body.clone(), 0).unwrap_err();
        assert!(err.limit < usize::MAX);
    }
    // An empty body stays empty however often it repeats.
    assert!(LineBuilder::repeat("1e300", LineBuilder::new(), 0)
        .unwrap()
        .is_empty());
}

#[test]
fn test_reflect_reverses_and_flips() {
    let body = LineBuilder::from_entries(vec![
        LineEntry::plus("a"),
        LineEntry::minus("b"),
        LineEntry::plus("c"),
    ]);
    let reflected = body.clone().reflect();
    assert_eq!(names(&reflected), vec!["-C", "+B", "-A"]);
    assert_eq!(reflected.reflect(), body);
}

#[test]
fn test_repeat_count_follows_atof() {
    assert_eq!(repeat_count("4"), 4);
    assert_eq!(repeat_count(" 2.9"), 2);
    assert_eq!(repeat_count("3abc"), 3);
    assert_eq!(repeat_count("1e1"), 10);
    assert_eq!(repeat_count("2e"), 2);
    assert_eq!(repeat_count("+5"), 5);
    assert_eq!(repeat_count(".5"), 0);
    assert_eq!(repeat_count("-2"), 0);
    assert_eq!(repeat_count("abc"), 0);
    assert_eq!(repeat_count(""), 0);
}

#[test]
fn test_finish() {
    let line = LineBuilder::from_entries(vec![LineEntry::new(Name::new("x"), Sign::Minus)])
        .finish(Name::new("l1"), SourcePos::buffer(7));
    assert_eq!(line.name.as_str(), "L1");
    assert_eq!(line.entries[0].sign, Sign::Minus);
    assert_eq!(line.pos.line, 7);
}

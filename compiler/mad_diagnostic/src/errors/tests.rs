use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_constructor_messages() {
    let name = Name::new("q1");
    let pos = SourcePos::buffer(9);
    assert_eq!(constant_redefined(&name, pos).message, "constant Q1 is redefined");
    assert_eq!(undefined_variable(&name, pos).message, "Q1 is not yet defined");
    assert_eq!(
        undefined_line_member(&name, pos).message,
        "beam element/line Q1 not yet defined"
    );
    assert_eq!(
        unknown_attribute(ElementKind::Drift, "K1", pos).message,
        "DRIFT has no attribute K1, ignored"
    );
    assert_eq!(unmatched_end_comment(pos).code, ErrorCode::E5001);
}

#[test]
fn test_fatal_constructors() {
    let pos = SourcePos::buffer(2);
    let diag = string_in_algebra("LABEL", pos);
    assert!(diag.is_fatal());
    assert_eq!(diag.code, ErrorCode::E2004);
    assert_eq!(
        diag.message,
        "string constant LABEL used in an algebraic expression"
    );

    let diag = line_too_long(1000, pos);
    assert!(diag.is_fatal());
    assert_eq!(diag.code, ErrorCode::E4002);
    assert_eq!(diag.message, "repeated line would exceed 1000 entries");

    let diag = internal("stale arena handle 3v1", pos);
    assert!(diag.is_fatal());
    assert_eq!(diag.message, "internal error: stale arena handle 3v1");
}

#[test]
fn test_recursion_limit_is_recoverable() {
    let diag = recursion_limit(64, SourcePos::buffer(5));
    assert!(diag.is_warning());
    assert!(diag.message.contains("64"));
}

//! Tests for `return` statements

use bantam_compiler_diagnostics::DiagnosticCode;
use bantam_compiler_semantic::Type;
use bantam_compiler_syntax::{Expr, ExprKind, Method, Stmt};

use crate::*;

fn method_returning(return_type: Option<&str>, value: Option<Expr>) -> bantam_compiler_syntax::Program {
    let method = match return_type {
        Some(ty) => Method::new(ty, "f", 2),
        None => Method::untyped("f", 2),
    };
    main_class(vec![method
        .with_body(vec![Stmt::return_stmt(3, value)])
        .into()])
}

#[test]
fn test_return_type_mismatch() {
    let program = method_returning(Some("boolean"), Some(Expr::int(3, 5)));
    let diagnostics = assert_semantic_err!(program, DiagnosticCode::InvalidReturnType);
    assert!(diagnostics.all()[0]
        .message
        .contains("does not equal the declared return type"));

    let analysis = run_analysis(&program);
    let five = type_of_first(&analysis, &program, |e| matches!(e.kind, ExprKind::ConstInt(5)));
    assert_eq!(five, Some(Type::Int));
}

#[test]
fn test_matching_return() {
    assert_semantic_ok!(method_returning(Some("int"), Some(Expr::int(3, 5))));
    assert_semantic_ok!(method_returning(Some("String"), Some(Expr::string(3, "s"))));
    assert_semantic_ok!(method_returning(Some("void"), None));
}

#[test]
fn test_return_requires_exact_type() {
    let program = method_returning(Some("Object"), Some(Expr::string(3, "s")));
    assert_semantic_err!(program, DiagnosticCode::InvalidReturnType);
}

#[test]
fn test_void_method_returning_value() {
    let program = method_returning(Some("void"), Some(Expr::int(3, 1)));
    assert_semantic_err!(program, DiagnosticCode::InvalidReturnType);
}

#[test]
fn test_bare_return_in_int_method() {
    let program = method_returning(Some("int"), None);
    assert_semantic_err!(program, DiagnosticCode::InvalidReturnType);
}

#[test]
fn test_method_without_declared_return_type() {
    assert_semantic_ok!(method_returning(None, None));

    assert_semantic_ok!(method_returning(None, Some(Expr::int(3, 1))));
    assert_semantic_ok!(method_returning(None, Some(Expr::string(3, "s"))));
}

#[test]
fn test_return_of_unresolved_value() {
    let program = method_returning(Some("int"), Some(Expr::var(3, "nothing")));
    assert_semantic_err!(program, DiagnosticCode::UndeclaredVariable);
}

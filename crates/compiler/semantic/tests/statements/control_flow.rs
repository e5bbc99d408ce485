//! Tests for conditionals, loops and `break`

use bantam_compiler_diagnostics::DiagnosticCode;
use bantam_compiler_syntax::{BinaryOp, Expr, Stmt, UnaryOp, VarRef};

use crate::*;

fn int_x(line: u32) -> Stmt {
    Stmt::typed_decl(line, "int", "x", Some(Expr::int(line, 1)))
}

#[test]
fn test_while_predicate_must_be_boolean() {
    let program = in_method(vec![
        int_x(3),
        Stmt::while_loop(4, Expr::var(4, "x"), Stmt::block(4, vec![])),
    ]);
    let diagnostics = assert_semantic_err!(program, DiagnosticCode::TypeMismatch);
    assert_eq!(
        diagnostics.all()[0].message,
        "The type of the predicate is int which is not boolean"
    );
    assert_eq!(diagnostics.all()[0].line, 4);
}

#[test]
fn test_if_predicate_must_be_boolean() {
    let program = in_method(vec![Stmt::if_then(
        3,
        Expr::string(3, "yes"),
        Stmt::block(3, vec![]),
        None,
    )]);
    assert_semantic_err!(program, DiagnosticCode::TypeMismatch);
}

#[test]
fn test_untyped_predicate_is_not_reported_twice() {
    let program = in_method(vec![Stmt::while_loop(
        3,
        Expr::var(3, "missing"),
        Stmt::block(3, vec![]),
    )]);
    assert_semantic_err!(program, DiagnosticCode::UndeclaredVariable);
}

#[test]
fn test_branches_have_their_own_scope() {
    let program = in_method(vec![
        Stmt::if_then(
            3,
            Expr::boolean(3, true),
            Stmt::typed_decl(4, "int", "x", Some(Expr::int(4, 1))),
            Some(Stmt::typed_decl(5, "boolean", "x", Some(Expr::boolean(5, false)))),
        ),
        Stmt::typed_decl(6, "String", "x", Some(Expr::string(6, "after"))),
    ]);
    assert_semantic_ok!(program);
}

#[test]
fn test_for_loop() {
    let program = in_method(vec![
        Stmt::typed_decl(3, "int", "i", Some(Expr::int(3, 0))),
        Stmt::for_loop(
            4,
            Some(Expr::assign(4, VarRef::plain("i"), Expr::int(4, 0))),
            Some(Expr::binary(4, BinaryOp::Lt, Expr::var(4, "i"), Expr::int(4, 10))),
            Some(Expr::unary(4, UnaryOp::PostIncr, Expr::var(4, "i"))),
            Stmt::block(4, vec![Stmt::break_stmt(5)]),
        ),
        Stmt::for_loop(7, None, None, None, Stmt::block(7, vec![Stmt::break_stmt(8)])),
    ]);
    assert_semantic_ok!(program);

    let program = in_method(vec![Stmt::for_loop(
        3,
        None,
        Some(Expr::int(3, 1)),
        None,
        Stmt::block(3, vec![]),
    )]);
    assert_semantic_err!(program, DiagnosticCode::TypeMismatch);
}

#[test]
fn test_break_placement() {
    let program = in_method(vec![Stmt::break_stmt(3)]);
    let diagnostics = assert_semantic_err!(program, DiagnosticCode::InvalidBreak);
    assert_eq!(diagnostics.all()[0].line, 3);

    let program = in_method(vec![Stmt::while_loop(
        3,
        Expr::boolean(3, true),
        Stmt::block(
            3,
            vec![Stmt::if_then(4, Expr::boolean(4, false), Stmt::break_stmt(5), None)],
        ),
    )]);
    assert_semantic_ok!(program);

    let program = in_method(vec![
        Stmt::while_loop(3, Expr::boolean(3, true), Stmt::break_stmt(3)),
        Stmt::break_stmt(4),
    ]);
    assert_semantic_err!(program, DiagnosticCode::InvalidBreak);
}

#[test]
fn test_loop_body_locals_do_not_escape() {
    let program = in_method(vec![
        Stmt::while_loop(
            3,
            Expr::boolean(3, true),
            Stmt::block(3, vec![int_x(4), Stmt::break_stmt(5)]),
        ),
        Stmt::typed_decl(6, "int", "y", Some(Expr::var(6, "x"))),
    ]);
    assert_semantic_err!(program, DiagnosticCode::UndeclaredVariable);
}

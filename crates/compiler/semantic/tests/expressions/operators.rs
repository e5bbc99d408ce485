//! Tests for operators and constants

use bantam_compiler_diagnostics::DiagnosticCode;
use bantam_compiler_semantic::Type;
use bantam_compiler_syntax::{BinaryOp, Expr, ExprKind, Field, Stmt, UnaryOp};

use crate::*;

fn bool_decl(line: u32, init: Expr) -> Stmt {
    Stmt::typed_decl(line, "boolean", "b", Some(init))
}

#[test]
fn test_field_initializer_arithmetic() {
    let program = main_class(vec![Field::new("int", "x", 1)
        .with_init(Expr::binary(1, BinaryOp::Plus, Expr::int(1, 1), Expr::int(1, 2)))
        .into()]);
    let analysis = assert_semantic_ok!(program);
    let sum = type_of_first(&analysis, &program, |e| matches!(e.kind, ExprKind::Binary { .. }));
    assert_eq!(sum, Some(Type::Int));
}

#[test]
fn test_arithmetic_on_boolean_keeps_declared_type() {
    let program = in_method(vec![
        bool_decl(
            3,
            Expr::binary(3, BinaryOp::Plus, Expr::int(3, 3), Expr::boolean(3, true)),
        ),
        Stmt::typed_decl(4, "boolean", "c", Some(Expr::var(4, "b"))),
    ]);
    let diagnostics = assert_semantic_err!(
        program,
        DiagnosticCode::TypeMismatch,
        DiagnosticCode::TypeMismatch,
    );
    assert!(diagnostics.all()[0].message.contains("operand of +"));
    assert!(diagnostics.all()[1].message.contains("initializer of b"));

    let analysis = run_analysis(&program);
    let sum = type_of_first(&analysis, &program, |e| matches!(e.kind, ExprKind::Binary { .. }));
    assert_eq!(sum, Some(Type::Int));
}

#[test]
fn test_every_arithmetic_operator() {
    for op in [
        BinaryOp::Plus,
        BinaryOp::Minus,
        BinaryOp::Times,
        BinaryOp::Divide,
        BinaryOp::Modulus,
    ] {
        let program = in_method(vec![Stmt::typed_decl(
            3,
            "int",
            "x",
            Some(Expr::binary(3, op, Expr::int(3, 7), Expr::int(3, 2))),
        )]);
        assert_semantic_ok!(program);
    }
}

#[test]
fn test_relational_operators() {
    for op in [BinaryOp::Lt, BinaryOp::Leq, BinaryOp::Gt, BinaryOp::Geq] {
        let program = in_method(vec![bool_decl(
            3,
            Expr::binary(3, op, Expr::int(3, 1), Expr::int(3, 2)),
        )]);
        assert_semantic_ok!(program);
    }

    let program = in_method(vec![bool_decl(
        3,
        Expr::binary(3, BinaryOp::Lt, Expr::boolean(3, true), Expr::int(3, 2)),
    )]);
    assert_semantic_err!(program, DiagnosticCode::TypeMismatch);
}

#[test]
fn test_equality_requires_related_types() {
    let program = in_method(vec![bool_decl(
        3,
        Expr::binary(3, BinaryOp::Eq, Expr::int(3, 1), Expr::boolean(3, true)),
    )]);
    assert_semantic_err!(program, DiagnosticCode::TypeMismatch);

    let program = in_method(vec![
        Stmt::typed_decl(3, "Object", "o", Some(Expr::new_object(3, "Object"))),
        Stmt::typed_decl(4, "String", "s", Some(Expr::string(4, "x"))),
        bool_decl(
            5,
            Expr::binary(5, BinaryOp::Ne, Expr::var(5, "o"), Expr::var(5, "s")),
        ),
    ]);
    assert_semantic_ok!(program);
}

#[test]
fn test_logical_operators() {
    let program = in_method(vec![bool_decl(
        3,
        Expr::binary(3, BinaryOp::Or, Expr::boolean(3, false), Expr::boolean(3, true)),
    )]);
    assert_semantic_ok!(program);

    let program = in_method(vec![bool_decl(
        3,
        Expr::binary(3, BinaryOp::And, Expr::boolean(3, true), Expr::int(3, 1)),
    )]);
    assert_semantic_err!(program, DiagnosticCode::TypeMismatch);
}

#[test]
fn test_unary_operators() {
    let program = in_method(vec![
        Stmt::typed_decl(3, "int", "x", Some(Expr::unary(3, UnaryOp::Neg, Expr::int(3, 4)))),
        bool_decl(4, Expr::unary(4, UnaryOp::Not, Expr::boolean(4, false))),
        Stmt::expr(5, Expr::unary(5, UnaryOp::PostIncr, Expr::var(5, "x"))),
        Stmt::expr(6, Expr::unary(6, UnaryOp::PreDecr, Expr::var(6, "x"))),
    ]);
    assert_semantic_ok!(program);
}

#[test]
fn test_unary_mismatch_keeps_result_type() {
    let program = in_method(vec![
        Stmt::typed_decl(3, "int", "x", Some(Expr::unary(3, UnaryOp::Neg, Expr::boolean(3, true)))),
        bool_decl(4, Expr::unary(4, UnaryOp::Not, Expr::int(4, 1))),
    ]);
    assert_semantic_err!(
        program,
        DiagnosticCode::TypeMismatch,
        DiagnosticCode::TypeMismatch,
    );
}

#[test]
fn test_increment_of_constant() {
    let program = in_method(vec![Stmt::expr(
        3,
        Expr::unary(3, UnaryOp::PreIncr, Expr::int(3, 5)),
    )]);
    assert_semantic_err!(program, DiagnosticCode::InvalidAssignment);
}

#[test]
fn test_constants() {
    let program = in_method(vec![
        Stmt::var(3, "i", Expr::int(3, 1)),
        Stmt::var(4, "b", Expr::boolean(4, true)),
        Stmt::var(5, "s", Expr::string(5, "text")),
    ]);
    let analysis = assert_semantic_ok!(program);
    assert_eq!(
        type_of_first(&analysis, &program, |e| e.line == 5),
        Some(Type::string())
    );
}

//! Tests for array creation, element access and element assignment

use bantam_compiler_diagnostics::DiagnosticCode;
use bantam_compiler_semantic::Type;
use bantam_compiler_syntax::{ClassDecl, Expr, ExprKind, Method, Stmt, VarRef};

use crate::*;

fn int_array(line: u32, size: i32) -> Stmt {
    Stmt::typed_decl(
        line,
        "int[]",
        "a",
        Some(Expr::new_array(line, "int", Expr::int(line, size))),
    )
}

#[test]
fn test_array_roundtrip() {
    let program = in_method(vec![
        int_array(3, 10),
        Stmt::typed_decl(
            4,
            "int",
            "v",
            Some(Expr::array_element(4, VarRef::plain("a"), Expr::int(4, 0))),
        ),
        Stmt::expr(
            5,
            Expr::array_assign(5, VarRef::plain("a"), Expr::int(5, 1), Expr::var(5, "v")),
        ),
    ]);
    let analysis = assert_semantic_ok!(program);
    let created = type_of_first(&analysis, &program, |e| {
        matches!(e.kind, ExprKind::NewArray { .. })
    });
    assert_eq!(created, Some(Type::array_of(Type::Int)));
}

#[test]
fn test_array_size_must_be_int() {
    let program = in_method(vec![Stmt::typed_decl(
        3,
        "int[]",
        "a",
        Some(Expr::new_array(3, "int", Expr::boolean(3, true))),
    )]);
    assert_semantic_err!(program, DiagnosticCode::TypeMismatch);
}

#[test]
fn test_array_of_unknown_type() {
    let program = in_method(vec![Stmt::typed_decl(
        3,
        "Ghost[]",
        "a",
        Some(Expr::new_array(3, "Ghost", Expr::int(3, 3))),
    )]);
    assert_semantic_err!(
        program,
        DiagnosticCode::UndefinedType,
        DiagnosticCode::UndefinedType,
    );

    let analysis = run_analysis(&program);
    let created = type_of_first(&analysis, &program, |e| {
        matches!(e.kind, ExprKind::NewArray { .. })
    });
    assert_eq!(created, Some(Type::array_of(Type::object())));
}

#[test]
fn test_indexing_a_non_array() {
    let program = in_method(vec![
        Stmt::typed_decl(3, "int", "x", Some(Expr::int(3, 1))),
        Stmt::typed_decl(
            4,
            "int",
            "y",
            Some(Expr::array_element(4, VarRef::plain("x"), Expr::int(4, 0))),
        ),
    ]);
    assert_semantic_err!(program, DiagnosticCode::InvalidIndexAccess);
}

#[test]
fn test_index_must_be_int() {
    let program = in_method(vec![
        int_array(3, 2),
        Stmt::typed_decl(
            4,
            "int",
            "v",
            Some(Expr::array_element(4, VarRef::plain("a"), Expr::boolean(4, true))),
        ),
    ]);
    assert_semantic_err!(program, DiagnosticCode::InvalidIndexAccess);
}

#[test]
fn test_array_element_assignment_mismatch() {
    let program = in_method(vec![
        int_array(3, 2),
        Stmt::expr(
            4,
            Expr::array_assign(4, VarRef::plain("a"), Expr::int(4, 0), Expr::boolean(4, true)),
        ),
    ]);
    assert_semantic_err!(program, DiagnosticCode::InvalidAssignment);
}

#[test]
fn test_arrays_are_covariant_objects() {
    let program = classes(vec![
        ClassDecl::new("A", 1),
        ClassDecl::new("B", 2).extends("A").with_member(
            Method::new("void", "f", 3).with_body(vec![
                Stmt::typed_decl(4, "A[]", "as", Some(Expr::new_array(4, "B", Expr::int(4, 2)))),
                Stmt::typed_decl(5, "Object", "o", Some(Expr::new_array(5, "int", Expr::int(5, 3)))),
                Stmt::typed_decl(
                    6,
                    "String",
                    "s",
                    Some(Expr::call(6, Some(Expr::var(6, "as")), "toString", vec![])),
                ),
            ]),
        ),
    ]);
    assert_semantic_ok!(program);
}

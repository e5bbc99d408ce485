//! # Member Table Tests
//!
//! Field and method tables: duplicates, reserved names, declared types, field
//! initializers and override compatibility.

use bantam_compiler_diagnostics::DiagnosticCode;
use bantam_compiler_semantic::Type;
use bantam_compiler_syntax::{BinaryOp, ClassDecl, Expr, Field, Formal, Method, Stmt};

use crate::*;

#[test]
fn test_duplicate_field() {
    let program = main_class(vec![
        Field::new("int", "x", 2).into(),
        Field::new("boolean", "x", 3).into(),
    ]);
    let diagnostics = assert_semantic_err!(program, DiagnosticCode::DuplicateDefinition);
    assert_eq!(diagnostics.all()[0].line, 3);

    let analysis = run_analysis(&program);
    let main = analysis.hierarchy().lookup("Main").unwrap();
    assert_eq!(analysis.members().of(main).field("x").unwrap().ty, Type::Int);
}

#[test]
fn test_duplicate_method() {
    let program = main_class(vec![
        Method::new("int", "f", 2)
            .with_body(vec![Stmt::return_stmt(2, Some(Expr::int(2, 1)))])
            .into(),
        Method::new("boolean", "f", 3)
            .with_body(vec![Stmt::return_stmt(3, Some(Expr::boolean(3, true)))])
            .into(),
    ]);
    assert_semantic_err!(program, DiagnosticCode::DuplicateDefinition);
}

#[test]
fn test_reserved_member_names() {
    let program = main_class(vec![
        Field::new("int", "this", 2).into(),
        Method::new("void", "super", 3).into(),
    ]);
    assert_semantic_err!(
        program,
        DiagnosticCode::ReservedIdentifier,
        DiagnosticCode::ReservedIdentifier,
    );
}

#[test]
fn test_member_types_must_exist() {
    let program = main_class(vec![
        Field::new("Ghost", "g", 2).into(),
        Method::new("Phantom", "f", 3).into(),
        Method::new("void", "h", 4)
            .with_formal(Formal::new("Spectre", "s", 4))
            .into(),
    ]);
    let diagnostics = assert_semantic_err!(
        program,
        DiagnosticCode::UndefinedType,
        DiagnosticCode::UndefinedType,
        DiagnosticCode::UndefinedType,
    );
    let lines: Vec<u32> = diagnostics.iter().map(|d| d.line).collect();
    assert_eq!(lines, vec![2, 3, 4]);
}

#[test]
fn test_field_initializers() {
    let program = main_class(vec![
        Field::new("int", "x", 2).with_init(Expr::int(2, 1)).into(),
        Field::new("int", "y", 3)
            .with_init(Expr::binary(3, BinaryOp::Times, Expr::var(3, "x"), Expr::int(3, 2)))
            .into(),
        Field::new("Object", "o", 4).with_init(Expr::string(4, "s")).into(),
    ]);
    assert_semantic_ok!(program);

    let program = main_class(vec![Field::new("int", "x", 2)
        .with_init(Expr::boolean(2, true))
        .into()]);
    assert_semantic_err!(program, DiagnosticCode::TypeMismatch);
}

#[test]
fn test_override_with_different_return_type() {
    let program = classes(vec![
        ClassDecl::new("A", 1).with_member(
            Method::new("int", "f", 2).with_body(vec![Stmt::return_stmt(2, Some(Expr::int(2, 1)))]),
        ),
        ClassDecl::new("B", 4).extends("A").with_member(
            Method::new("boolean", "f", 5)
                .with_body(vec![Stmt::return_stmt(5, Some(Expr::boolean(5, true)))]),
        ),
    ]);
    let diagnostics = assert_semantic_err!(program, DiagnosticCode::InvalidOverride);
    assert!(diagnostics.all()[0].message.contains("inherited from A"));
}

#[test]
fn test_override_of_builtin_method() {
    let program = main_class(vec![Method::new("int", "toString", 2)
        .with_body(vec![Stmt::return_stmt(3, Some(Expr::int(3, 1)))])
        .into()]);
    assert_semantic_err!(program, DiagnosticCode::InvalidOverride);

    let program = main_class(vec![Method::new("String", "toString", 2)
        .with_body(vec![Stmt::return_stmt(3, Some(Expr::string(3, "Main")))])
        .into()]);
    assert_semantic_ok!(program);
}

#[test]
fn test_methods_inherited_through_chain() {
    let program = classes(vec![
        ClassDecl::new("A", 1).with_member(Method::new("int", "f", 2).with_body(vec![
            Stmt::return_stmt(2, Some(Expr::int(2, 1))),
        ])),
        ClassDecl::new("B", 3).extends("A"),
        ClassDecl::new("C", 4).extends("B"),
    ]);
    let analysis = assert_semantic_ok!(program);
    let c = analysis.hierarchy().lookup("C").unwrap();
    let a = analysis.hierarchy().lookup("A").unwrap();
    let f = analysis.members().of(c).method("f").unwrap();
    assert_eq!(f.owner, a);
    assert_eq!(f.result_type(), Type::Int);
    assert!(analysis.members().of(c).method("equals").is_some());
}

//! Tests for the subclass and subtype relations

use bantam_compiler_semantic::Type;
use bantam_compiler_syntax::ClassDecl;

use crate::*;

fn abc_program() -> bantam_compiler_syntax::Program {
    classes(vec![
        ClassDecl::new("A", 1),
        ClassDecl::new("B", 2).extends("A"),
        ClassDecl::new("C", 3).extends("B"),
        ClassDecl::new("D", 4).extends("A"),
    ])
}

#[test]
fn test_subclass_is_reflexive_and_transitive() {
    let analysis = run_analysis(&abc_program());
    let hierarchy = analysis.hierarchy();

    for name in ["A", "B", "C", "D", "Object", "String"] {
        assert!(hierarchy.is_subclass(name, name), "{name} <: {name}");
        assert!(hierarchy.is_subclass(name, "Object"), "{name} <: Object");
    }
    assert!(hierarchy.is_subclass("C", "B"));
    assert!(hierarchy.is_subclass("B", "A"));
    assert!(hierarchy.is_subclass("C", "A"));
    assert!(!hierarchy.is_subclass("A", "C"));
    assert!(!hierarchy.is_subclass("C", "D"));
    assert!(!hierarchy.is_subclass("Ghost", "Object"));
}

#[test]
fn test_subtype_relation() {
    let analysis = run_analysis(&abc_program());
    let hierarchy = analysis.hierarchy();

    assert!(hierarchy.is_subtype(&Type::Int, &Type::Int));
    assert!(!hierarchy.is_subtype(&Type::Int, &Type::Boolean));
    assert!(!hierarchy.is_subtype(&Type::Boolean, &Type::object()));
    assert!(hierarchy.is_subtype(&Type::class("C"), &Type::class("A")));
    assert!(!hierarchy.is_subtype(&Type::class("A"), &Type::class("C")));
    assert!(hierarchy.is_subtype(
        &Type::array_of(Type::class("C")),
        &Type::array_of(Type::class("A"))
    ));
    assert!(hierarchy.is_subtype(&Type::array_of(Type::Int), &Type::object()));
    assert!(!hierarchy.is_subtype(&Type::object(), &Type::array_of(Type::Int)));

    assert!(hierarchy.are_related(&Type::class("A"), &Type::class("C")));
    assert!(!hierarchy.are_related(&Type::class("B"), &Type::class("D")));
}

#[test]
fn test_type_exists() {
    let analysis = run_analysis(&abc_program());
    let hierarchy = analysis.hierarchy();

    assert!(hierarchy.type_exists(&Type::Int));
    assert!(hierarchy.type_exists(&Type::class("TextIO")));
    assert!(hierarchy.type_exists(&Type::array_of(Type::class("D"))));
    assert!(!hierarchy.type_exists(&Type::array_of(Type::array_of(Type::Int))));
    assert!(!hierarchy.type_exists(&Type::class("Ghost")));
}

//! Built-in classes and reserved identifiers.

use bantam_compiler_syntax::{ClassDecl, Formal, Method};

/// File name attached to built-in class declarations.
pub const BUILTIN_FILE: &str = "<builtin>";

pub const OBJECT: &str = "Object";
pub const STRING: &str = "String";
pub const TEXT_IO: &str = "TextIO";
pub const SYS: &str = "Sys";

/// Names that cannot be used for fields, methods, formals or locals.
pub const RESERVED_IDENTIFIERS: [&str; 6] = ["null", "this", "super", "void", "int", "boolean"];

pub fn is_reserved_identifier(name: &str) -> bool {
    RESERVED_IDENTIFIERS.contains(&name)
}

fn method(return_type: &str, name: &str, params: &[&str]) -> Method {
    params
        .iter()
        .enumerate()
        .fold(Method::new(return_type, name, 0), |method, (i, ty)| {
            method.with_formal(Formal::new(*ty, format!("arg{i}"), 0))
        })
}

fn builtin_class(name: &str, parent: Option<&str>, methods: Vec<Method>) -> ClassDecl {
    let mut class = ClassDecl::new(name, 0).in_file(BUILTIN_FILE);
    class.parent = parent.map(Into::into);
    methods
        .into_iter()
        .fold(class, |class, method| class.with_member(method))
}

/// Declarations of the built-in classes, `Object` first.
pub fn builtin_classes() -> Vec<ClassDecl> {
    vec![
        builtin_class(
            OBJECT,
            None,
            vec![
                method(OBJECT, "clone", &[]),
                method("boolean", "equals", &[OBJECT]),
                method(STRING, "toString", &[]),
            ],
        ),
        builtin_class(
            STRING,
            Some(OBJECT),
            vec![
                method("int", "length", &[]),
                method("boolean", "equals", &[OBJECT]),
                method(STRING, "toString", &[]),
                method(STRING, "substring", &["int", "int"]),
                method(STRING, "concat", &[STRING]),
            ],
        ),
        builtin_class(
            TEXT_IO,
            Some(OBJECT),
            vec![
                method("void", "readStdin", &[]),
                method("void", "readFile", &[STRING]),
                method("void", "writeStdout", &[]),
                method("void", "writeStderr", &[]),
                method("void", "writeFile", &[STRING]),
                method(STRING, "getString", &[]),
                method("int", "getInt", &[]),
                method(TEXT_IO, "putString", &[STRING]),
                method(TEXT_IO, "putInt", &["int"]),
            ],
        ),
        builtin_class(
            SYS,
            Some(OBJECT),
            vec![
                method("void", "exit", &["int"]),
                method("int", "time", &[]),
                method("int", "random", &[]),
            ],
        ),
    ]
}

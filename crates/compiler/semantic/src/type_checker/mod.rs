//! # Type Checker
//!
//! Checks the field initializers and method bodies of one class. Every expression is
//! typed bottom-up: children first, then the node's own rule. A violated rule adds one
//! diagnostic and the node still gets a fallback type where one is meaningful, so that
//! checking continues with as few follow-up errors as possible.
//!
//! Expressions whose type cannot be determined (e.g. references to unknown variables)
//! stay untyped; rules reading an untyped operand skip their own check for it.
//!
//! ## Scopes
//!
//! - depth 0: fields of the class, own and inherited, all visible from the start
//! - depth 1: formals and top-level locals of the method being checked
//! - depth 2 and below: one scope per nested block and per branch or loop body

mod expr;
mod stmt;

use bantam_compiler_diagnostics::{Diagnostic, DiagnosticCode, DiagnosticCollection};
use bantam_compiler_syntax::{ClassDecl, Member, Method, Name};
use tracing::{debug, warn};

use crate::builtins::is_reserved_identifier;
use crate::class_hierarchy::{ClassHierarchy, ClassId};
use crate::members::MemberTables;
use crate::symbol_table::{SymbolFlags, SymbolTable};
use crate::types::{ExprTypes, Type};

pub(crate) struct TypeChecker<'a> {
    hierarchy: &'a ClassHierarchy,
    members: &'a MemberTables,
    class: ClassId,
    file: &'a str,
    symbols: SymbolTable,
    expr_types: &'a mut ExprTypes,
    diagnostics: &'a mut DiagnosticCollection,
    /// Method whose body is being checked, with its declared return type
    current_method: Option<(Name, Option<Type>)>,
    loop_depth: usize,
}

impl<'a> TypeChecker<'a> {
    pub(crate) fn new(
        hierarchy: &'a ClassHierarchy,
        members: &'a MemberTables,
        class: ClassId,
        expr_types: &'a mut ExprTypes,
        diagnostics: &'a mut DiagnosticCollection,
    ) -> Self {
        Self {
            hierarchy,
            members,
            class,
            file: hierarchy.node(class).decl.filename.as_str(),
            symbols: SymbolTable::new(),
            expr_types,
            diagnostics,
            current_method: None,
            loop_depth: 0,
        }
    }

    pub(crate) fn check_class(mut self, decl: &ClassDecl) {
        debug!("type checking class {}", decl.name);

        self.symbols.enter_scope();
        let members = self.members;
        for field in members.of(self.class).fields() {
            self.declare(field.name.clone(), field.ty.clone(), SymbolFlags::FIELD);
        }

        for member in &decl.members {
            match member {
                Member::Field(field) => {
                    let Some(init) = &field.init else {
                        continue;
                    };
                    let declared = Type::from_type_expr(&field.ty);
                    if let Some(actual) = self.check_expr(init) {
                        if self.hierarchy.type_exists(&declared)
                            && !self.hierarchy.is_subtype(&actual, &declared)
                        {
                            self.report(
                                DiagnosticCode::TypeMismatch,
                                field.line,
                                format!(
                                    "The initializer of field {} has type {actual}, which is not a subtype of {declared}",
                                    field.name
                                ),
                            );
                        }
                    }
                }
                Member::Method(method) => self.check_method(method),
            }
        }

        self.exit_scope();
    }

    fn check_method(&mut self, method: &Method) {
        let return_type = method.return_type.as_ref().map(Type::from_type_expr);
        self.current_method = Some((method.name.clone(), return_type));

        self.symbols.enter_scope();
        for formal in &method.formals {
            if is_reserved_identifier(&formal.name) {
                self.diagnostics.add(Diagnostic::reserved_identifier(
                    &formal.name,
                    self.file,
                    formal.line,
                ));
                continue;
            }
            let ty = Type::from_type_expr(&formal.ty);
            if !self.hierarchy.type_exists(&ty) {
                self.diagnostics.add(Diagnostic::undefined_type(
                    &ty.to_string(),
                    self.file,
                    formal.line,
                ));
            }
            if self.symbols.lookup_local(&formal.name).is_some() {
                self.diagnostics.add(Diagnostic::duplicate_definition(
                    "parameter",
                    &formal.name,
                    self.file,
                    formal.line,
                ));
                continue;
            }
            self.declare(formal.name.clone(), ty, SymbolFlags::PARAMETER);
        }

        for stmt in &method.body {
            self.check_stmt(stmt);
        }

        self.exit_scope();
        self.current_method = None;
    }

    fn declare(&mut self, name: Name, ty: Type, flags: SymbolFlags) {
        if let Err(err) = self.symbols.add(name, ty, flags) {
            warn!("cannot declare {flags} in class {}: {err}", self.class_name());
        }
    }

    fn exit_scope(&mut self) {
        if let Err(err) = self.symbols.exit_scope() {
            warn!("unbalanced scopes in class {}: {err}", self.class_name());
        }
    }

    fn in_new_scope(&mut self, check: impl FnOnce(&mut Self)) {
        self.symbols.enter_scope();
        check(self);
        self.exit_scope();
    }

    fn report(&mut self, code: DiagnosticCode, line: u32, message: impl Into<String>) {
        self.diagnostics
            .add(Diagnostic::semantic(code, self.file, line, message));
    }

    fn class_name(&self) -> &'a Name {
        self.hierarchy.node(self.class).name()
    }

    fn class_type(&self) -> Type {
        Type::Class(self.class_name().clone())
    }

    /// Type of `super`: the parent of the class being checked.
    fn super_type(&self) -> Type {
        self.hierarchy
            .parent(self.class)
            .map_or_else(Type::object, |parent| {
                Type::Class(self.hierarchy.node(parent).name().clone())
            })
    }
}

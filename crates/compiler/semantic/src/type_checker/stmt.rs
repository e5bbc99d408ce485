use bantam_compiler_diagnostics::{Diagnostic, DiagnosticCode};
use bantam_compiler_syntax::{Expr, Name, Stmt, StmtKind, TypeExpr};

use super::TypeChecker;
use crate::builtins::is_reserved_identifier;
use crate::symbol_table::SymbolFlags;
use crate::types::Type;

impl TypeChecker<'_> {
    pub(super) fn check_stmt(&mut self, stmt: &Stmt) {
        match &stmt.kind {
            StmtKind::Decl { name, ty, init } => {
                self.check_decl(stmt.line, name, ty.as_ref(), init.as_ref());
            }
            StmtKind::Expr(expr) => {
                self.check_expr(expr);
            }
            StmtKind::If {
                pred,
                then_stmt,
                else_stmt,
            } => {
                self.check_predicate(pred);
                self.in_new_scope(|checker| checker.check_stmt(then_stmt));
                if let Some(else_stmt) = else_stmt {
                    self.in_new_scope(|checker| checker.check_stmt(else_stmt));
                }
            }
            StmtKind::While { pred, body } => {
                self.check_predicate(pred);
                self.check_loop_body(body);
            }
            StmtKind::For {
                init,
                pred,
                update,
                body,
            } => {
                if let Some(init) = init {
                    self.check_expr(init);
                }
                if let Some(pred) = pred {
                    self.check_predicate(pred);
                }
                if let Some(update) = update {
                    self.check_expr(update);
                }
                self.check_loop_body(body);
            }
            StmtKind::Break => {
                if self.loop_depth == 0 {
                    self.report(
                        DiagnosticCode::InvalidBreak,
                        stmt.line,
                        "A break statement may only appear inside a while or for loop",
                    );
                }
            }
            StmtKind::Block(stmts) => self.in_new_scope(|checker| {
                for stmt in stmts {
                    checker.check_stmt(stmt);
                }
            }),
            StmtKind::Return(value) => self.check_return(stmt.line, value.as_ref()),
        }
    }

    fn check_decl(&mut self, line: u32, name: &Name, ty: Option<&TypeExpr>, init: Option<&Expr>) {
        let init_type = init.and_then(|init| self.check_expr(init));

        let redeclared = self.symbols.lookup_local(name).is_some();
        if redeclared {
            self.diagnostics.add(Diagnostic::duplicate_definition(
                "variable", name, self.file, line,
            ));
        }
        let reserved = is_reserved_identifier(name);
        if reserved {
            self.diagnostics
                .add(Diagnostic::reserved_identifier(name, self.file, line));
        }
        // Neither a redeclared nor a reserved name is bound.
        if redeclared || reserved {
            if init.is_none() {
                self.missing_initializer(line, name);
            }
            return;
        }

        let declared = ty.map(Type::from_type_expr);
        let mut declared_exists = true;
        if let Some(declared) = &declared {
            declared_exists = self.hierarchy.type_exists(declared);
            if !declared_exists {
                self.diagnostics.add(Diagnostic::undefined_type(
                    &declared.to_string(),
                    self.file,
                    line,
                ));
            }
        }

        if init.is_none() {
            self.missing_initializer(line, name);
        }

        let bound = match (declared, init_type) {
            (Some(declared), Some(actual)) => {
                if declared_exists && !self.hierarchy.is_subtype(&actual, &declared) {
                    self.report(
                        DiagnosticCode::TypeMismatch,
                        line,
                        format!(
                            "The initializer of {name} has type {actual}, which is not a subtype of {declared}"
                        ),
                    );
                }
                Some(declared)
            }
            (Some(declared), None) => Some(declared),
            (None, actual) => actual,
        };

        if let Some(ty) = bound {
            self.declare(name.clone(), ty, SymbolFlags::LOCAL);
        }
    }

    fn missing_initializer(&mut self, line: u32, name: &Name) {
        self.report(
            DiagnosticCode::MissingInitializer,
            line,
            format!("The variable {name} has not been initialized"),
        );
    }

    fn check_predicate(&mut self, pred: &Expr) {
        if let Some(ty) = self.check_expr(pred) {
            if ty != Type::Boolean {
                self.report(
                    DiagnosticCode::TypeMismatch,
                    pred.line,
                    format!("The type of the predicate is {ty} which is not boolean"),
                );
            }
        }
    }

    fn check_loop_body(&mut self, body: &Stmt) {
        self.loop_depth += 1;
        self.in_new_scope(|checker| checker.check_stmt(body));
        self.loop_depth -= 1;
    }

    fn check_return(&mut self, line: u32, value: Option<&Expr>) {
        let actual = match value {
            Some(value) => self.check_expr(value),
            None => Some(Type::Void),
        };
        // Without a declared return type any returned value is accepted.
        let Some((method, Some(declared))) = self.current_method.clone() else {
            return;
        };
        let Some(actual) = actual else {
            return;
        };

        if actual != declared {
            self.report(
                DiagnosticCode::InvalidReturnType,
                line,
                format!(
                    "The returned type {actual} of the method {method} does not equal the declared return type {declared}"
                ),
            );
        }
    }
}

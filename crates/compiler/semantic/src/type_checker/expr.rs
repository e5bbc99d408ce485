use bantam_compiler_diagnostics::{Diagnostic, DiagnosticCode};
use bantam_compiler_syntax::{
    BinaryOp, Expr, ExprKind, Name, OperatorFamily, Qualifier, TypeExpr, UnaryOp, VarRef,
};

use super::TypeChecker;
use crate::types::Type;

impl TypeChecker<'_> {
    /// Type `expr` and record the result in the expression type table.
    pub(super) fn check_expr(&mut self, expr: &Expr) -> Option<Type> {
        let ty = self.infer_expr(expr);
        if let Some(ty) = &ty {
            self.expr_types.record(expr.id, ty.clone());
        }
        ty
    }

    fn infer_expr(&mut self, expr: &Expr) -> Option<Type> {
        let line = expr.line;
        match &expr.kind {
            ExprKind::ConstInt(_) => Some(Type::Int),
            ExprKind::ConstBoolean(_) => Some(Type::Boolean),
            ExprKind::ConstString(_) => Some(Type::string()),
            ExprKind::Binary { op, left, right } => {
                let left = self.check_expr(left);
                let right = self.check_expr(right);
                Some(self.check_binary(line, *op, left, right))
            }
            ExprKind::Unary { op, operand } => {
                let operand_type = self.check_expr(operand);
                Some(self.check_unary(line, *op, operand, operand_type))
            }
            ExprKind::Var(var) => self.resolve_var(line, var),
            ExprKind::ArrayElement { target, index } => {
                let target_type = self.resolve_var(line, target);
                self.check_index(index);
                self.element_type(line, target, target_type)
            }
            ExprKind::Assign { target, value } => {
                let target_type = self.resolve_var(line, target);
                let value_type = self.check_expr(value);
                self.check_assignable(line, target, target_type.as_ref(), value_type.as_ref());
                value_type
            }
            ExprKind::ArrayAssign {
                target,
                index,
                value,
            } => {
                let target_type = self.resolve_var(line, target);
                self.check_index(index);
                let value_type = self.check_expr(value);
                let element = self.element_type(line, target, target_type);
                self.check_assignable(line, target, element.as_ref(), value_type.as_ref());
                value_type
            }
            ExprKind::New { class } => {
                if self.hierarchy.lookup(class).is_some() {
                    Some(Type::Class(class.clone()))
                } else {
                    self.diagnostics
                        .add(Diagnostic::undefined_type(class, self.file, line));
                    Some(Type::object())
                }
            }
            ExprKind::NewArray { element, size } => {
                if let Some(size_type) = self.check_expr(size) {
                    if size_type != Type::Int {
                        self.report(
                            DiagnosticCode::TypeMismatch,
                            line,
                            format!("The size of an array must be int, found {size_type}"),
                        );
                    }
                }
                let element = Type::from_name(element);
                if self.hierarchy.type_exists(&element) {
                    Some(Type::array_of(element))
                } else {
                    self.diagnostics.add(Diagnostic::undefined_type(
                        &element.to_string(),
                        self.file,
                        line,
                    ));
                    Some(Type::array_of(Type::object()))
                }
            }
            ExprKind::InstanceOf { expr, target } => {
                let expr_type = self.check_expr(expr);
                self.check_conversion(line, "instanceof", expr_type.as_ref(), target);
                Some(Type::Boolean)
            }
            ExprKind::Cast { target, expr } => {
                let expr_type = self.check_expr(expr);
                if self.check_conversion(line, "cast", expr_type.as_ref(), target) {
                    Some(Type::from_type_expr(target))
                } else {
                    Some(Type::object())
                }
            }
            ExprKind::Dispatch {
                receiver,
                method,
                args,
            } => {
                let receiver_type = match receiver {
                    Some(receiver) => self.check_expr(receiver),
                    None => Some(self.class_type()),
                };
                let arg_types: Vec<Option<Type>> =
                    args.iter().map(|arg| self.check_expr(arg)).collect();
                self.check_dispatch(line, receiver_type?, method, &arg_types)
            }
        }
    }

    fn check_binary(
        &mut self,
        line: u32,
        op: BinaryOp,
        left: Option<Type>,
        right: Option<Type>,
    ) -> Type {
        match op.family() {
            OperatorFamily::Arithmetic => {
                self.expect_operand(line, op, "left", left.as_ref(), &Type::Int);
                self.expect_operand(line, op, "right", right.as_ref(), &Type::Int);
                Type::Int
            }
            OperatorFamily::Relational => {
                self.expect_operand(line, op, "left", left.as_ref(), &Type::Int);
                self.expect_operand(line, op, "right", right.as_ref(), &Type::Int);
                Type::Boolean
            }
            OperatorFamily::Logical => {
                self.expect_operand(line, op, "left", left.as_ref(), &Type::Boolean);
                self.expect_operand(line, op, "right", right.as_ref(), &Type::Boolean);
                Type::Boolean
            }
            OperatorFamily::Equality => {
                if let (Some(left), Some(right)) = (&left, &right) {
                    if !self.hierarchy.are_related(left, right) {
                        self.report(
                            DiagnosticCode::TypeMismatch,
                            line,
                            format!(
                                "The operands of {op} have incompatible types {left} and {right}"
                            ),
                        );
                    }
                }
                Type::Boolean
            }
        }
    }

    fn expect_operand(
        &mut self,
        line: u32,
        op: BinaryOp,
        side: &str,
        actual: Option<&Type>,
        expected: &Type,
    ) {
        if let Some(actual) = actual {
            if actual != expected {
                self.report(
                    DiagnosticCode::TypeMismatch,
                    line,
                    format!("The {side} operand of {op} must be {expected}, found {actual}"),
                );
            }
        }
    }

    fn check_unary(
        &mut self,
        line: u32,
        op: UnaryOp,
        operand: &Expr,
        operand_type: Option<Type>,
    ) -> Type {
        let expected = match op {
            UnaryOp::Not => Type::Boolean,
            UnaryOp::Neg
            | UnaryOp::PreIncr
            | UnaryOp::PostIncr
            | UnaryOp::PreDecr
            | UnaryOp::PostDecr => Type::Int,
        };
        if let Some(actual) = &operand_type {
            if *actual != expected {
                self.report(
                    DiagnosticCode::TypeMismatch,
                    line,
                    format!("The operand of {op} must be {expected}, found {actual}"),
                );
            }
        }
        let updates_operand = !matches!(op, UnaryOp::Not | UnaryOp::Neg);
        if updates_operand
            && !matches!(
                operand.kind,
                ExprKind::Var(_) | ExprKind::ArrayElement { .. }
            )
        {
            self.report(
                DiagnosticCode::InvalidAssignment,
                line,
                format!("The operand of {op} must be a variable or an array element"),
            );
        }
        expected
    }

    /// Resolve a variable reference; unresolved references are reported once and left untyped.
    fn resolve_var(&mut self, line: u32, var: &VarRef) -> Option<Type> {
        let resolved = match var.qualifier {
            None => match var.name.as_str() {
                "this" => Some(self.class_type()),
                "super" => Some(self.super_type()),
                name => self.symbols.lookup(name).map(|symbol| symbol.ty.clone()),
            },
            Some(Qualifier::This) => self
                .members
                .of(self.class)
                .field(&var.name)
                .map(|field| field.ty.clone()),
            Some(Qualifier::Super) => self.hierarchy.parent(self.class).and_then(|parent| {
                self.members
                    .of(parent)
                    .field(&var.name)
                    .map(|field| field.ty.clone())
            }),
        };
        if resolved.is_none() {
            self.diagnostics.add(Diagnostic::undeclared_variable(
                &var.to_string(),
                self.file,
                line,
            ));
        }
        resolved
    }

    fn check_index(&mut self, index: &Expr) {
        if let Some(index_type) = self.check_expr(index) {
            if index_type != Type::Int {
                self.report(
                    DiagnosticCode::InvalidIndexAccess,
                    index.line,
                    format!("An array index must be int, found {index_type}"),
                );
            }
        }
    }

    fn element_type(&mut self, line: u32, target: &VarRef, target_type: Option<Type>) -> Option<Type> {
        match target_type? {
            Type::Array(element) => Some(*element),
            other => {
                self.report(
                    DiagnosticCode::InvalidIndexAccess,
                    line,
                    format!("{target} has type {other}, which is not an array"),
                );
                None
            }
        }
    }

    fn check_assignable(
        &mut self,
        line: u32,
        target: &VarRef,
        target_type: Option<&Type>,
        value_type: Option<&Type>,
    ) {
        let (Some(target_type), Some(value_type)) = (target_type, value_type) else {
            return;
        };
        if !self.hierarchy.is_subtype(value_type, target_type) {
            self.report(
                DiagnosticCode::InvalidAssignment,
                line,
                format!("Cannot assign a value of type {value_type} to {target} of type {target_type}"),
            );
        }
    }

    /// Check the target type of a cast or `instanceof`. Returns whether the target exists.
    fn check_conversion(
        &mut self,
        line: u32,
        what: &str,
        expr_type: Option<&Type>,
        target: &TypeExpr,
    ) -> bool {
        let target_type = Type::from_type_expr(target);
        if !self.hierarchy.type_exists(&target_type) {
            self.diagnostics
                .add(Diagnostic::undefined_type(&target.to_string(), self.file, line));
            return false;
        }
        if let Some(expr_type) = expr_type {
            if !self.hierarchy.are_related(expr_type, &target_type) {
                self.report(
                    DiagnosticCode::InvalidCast,
                    line,
                    format!("Invalid {what}: {expr_type} and {target_type} are not related by inheritance"),
                );
            }
        }
        true
    }

    fn check_dispatch(
        &mut self,
        line: u32,
        receiver: Type,
        method: &Name,
        arg_types: &[Option<Type>],
    ) -> Option<Type> {
        let hierarchy = self.hierarchy;
        let class = match &receiver {
            Type::Class(name) => hierarchy.lookup(name)?,
            Type::Array(_) => hierarchy.root(),
            Type::Int | Type::Boolean | Type::Void => {
                self.report(
                    DiagnosticCode::InvalidMethodCall,
                    line,
                    format!("Cannot call method {method} on a value of type {receiver}"),
                );
                return None;
            }
        };

        let members = self.members;
        let Some(signature) = members.of(class).method(method) else {
            self.report(
                DiagnosticCode::InvalidMethodCall,
                line,
                format!(
                    "The method {method} does not exist in class {}",
                    hierarchy.node(class).name()
                ),
            );
            return None;
        };

        if arg_types.len() != signature.params.len() {
            self.report(
                DiagnosticCode::InvalidMethodCall,
                line,
                format!(
                    "The method {method} expects {} arguments but was given {}",
                    signature.params.len(),
                    arg_types.len()
                ),
            );
        } else {
            for (position, (arg, param)) in arg_types.iter().zip(&signature.params).enumerate() {
                let Some(arg) = arg else {
                    continue;
                };
                if !hierarchy.is_subtype(arg, param) {
                    self.report(
                        DiagnosticCode::TypeMismatch,
                        line,
                        format!(
                            "Argument {} of method {method} has type {arg}, which is not a subtype of {param}",
                            position + 1
                        ),
                    );
                }
            }
        }

        Some(signature.result_type())
    }
}

//! # Program Tree Visitor
//!
//! Read-only traversal of a [`Program`]. Each `visit_*` method defaults to the matching
//! `walk_*` function, so implementors override only the nodes they care about and call
//! the walk function to keep descending.
//!
//! ```rust,ignore
//! struct CountCalls(usize);
//!
//! impl<'ast> Visitor<'ast> for CountCalls {
//!     fn visit_expr(&mut self, expr: &'ast Expr) {
//!         if matches!(expr.kind, ExprKind::Dispatch { .. }) {
//!             self.0 += 1;
//!         }
//!         walk_expr(self, expr);
//!     }
//! }
//! ```

use crate::ast::{ClassDecl, Expr, ExprKind, Field, Member, Method, Program, Stmt, StmtKind};

pub trait Visitor<'ast> {
    fn visit_program(&mut self, program: &'ast Program) {
        for class in program.classes() {
            self.visit_class(class);
        }
    }

    fn visit_class(&mut self, class: &'ast ClassDecl) {
        walk_class(self, class);
    }

    fn visit_field(&mut self, field: &'ast Field) {
        if let Some(init) = &field.init {
            self.visit_expr(init);
        }
    }

    fn visit_method(&mut self, method: &'ast Method) {
        for stmt in &method.body {
            self.visit_stmt(stmt);
        }
    }

    fn visit_stmt(&mut self, stmt: &'ast Stmt) {
        walk_stmt(self, stmt);
    }

    fn visit_expr(&mut self, expr: &'ast Expr) {
        walk_expr(self, expr);
    }
}

pub fn walk_class<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, class: &'ast ClassDecl) {
    for member in &class.members {
        match member {
            Member::Field(field) => visitor.visit_field(field),
            Member::Method(method) => visitor.visit_method(method),
        }
    }
}

pub fn walk_stmt<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, stmt: &'ast Stmt) {
    match &stmt.kind {
        StmtKind::Decl { init, .. } => {
            if let Some(init) = init {
                visitor.visit_expr(init);
            }
        }
        StmtKind::Expr(expr) => visitor.visit_expr(expr),
        StmtKind::If {
            pred,
            then_stmt,
            else_stmt,
        } => {
            visitor.visit_expr(pred);
            visitor.visit_stmt(then_stmt);
            if let Some(else_stmt) = else_stmt {
                visitor.visit_stmt(else_stmt);
            }
        }
        StmtKind::While { pred, body } => {
            visitor.visit_expr(pred);
            visitor.visit_stmt(body);
        }
        StmtKind::For {
            init,
            pred,
            update,
            body,
        } => {
            for expr in [init, pred, update].into_iter().flatten() {
                visitor.visit_expr(expr);
            }
            visitor.visit_stmt(body);
        }
        StmtKind::Break => {}
        StmtKind::Block(stmts) => {
            for stmt in stmts {
                visitor.visit_stmt(stmt);
            }
        }
        StmtKind::Return(value) => {
            if let Some(value) = value {
                visitor.visit_expr(value);
            }
        }
    }
}

pub fn walk_expr<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, expr: &'ast Expr) {
    match &expr.kind {
        ExprKind::Dispatch { receiver, args, .. } => {
            if let Some(receiver) = receiver {
                visitor.visit_expr(receiver);
            }
            for arg in args {
                visitor.visit_expr(arg);
            }
        }
        ExprKind::NewArray { size, .. } => visitor.visit_expr(size),
        ExprKind::InstanceOf { expr, .. } | ExprKind::Cast { expr, .. } => visitor.visit_expr(expr),
        ExprKind::Assign { value, .. } => visitor.visit_expr(value),
        ExprKind::ArrayAssign { index, value, .. } => {
            visitor.visit_expr(index);
            visitor.visit_expr(value);
        }
        ExprKind::Binary { left, right, .. } => {
            visitor.visit_expr(left);
            visitor.visit_expr(right);
        }
        ExprKind::Unary { operand, .. } => visitor.visit_expr(operand),
        ExprKind::ArrayElement { index, .. } => visitor.visit_expr(index),
        ExprKind::New { .. }
        | ExprKind::Var(_)
        | ExprKind::ConstInt(_)
        | ExprKind::ConstBoolean(_)
        | ExprKind::ConstString(_) => {}
    }
}

/// Collects every expression of a program in traversal order.
#[derive(Debug, Default)]
pub struct ExprCollector<'ast> {
    pub exprs: Vec<&'ast Expr>,
}

impl<'ast> ExprCollector<'ast> {
    pub fn collect(program: &'ast Program) -> Vec<&'ast Expr> {
        let mut collector = Self::default();
        collector.visit_program(program);
        collector.exprs
    }
}

impl<'ast> Visitor<'ast> for ExprCollector<'ast> {
    fn visit_expr(&mut self, expr: &'ast Expr) {
        self.exprs.push(expr);
        walk_expr(self, expr);
    }
}

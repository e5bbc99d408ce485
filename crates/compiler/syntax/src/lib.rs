//! # Bantam Java Syntax Tree
//!
//! This crate defines the program tree handed to semantic analysis by the parser.
//! Parsing itself lives upstream; this crate only fixes the shape of its output so that
//! every later phase agrees on it.
//!
//! ## Conventions
//!
//! - Every node carries the source line it was parsed from.
//! - Every expression carries an [`ExprId`], assigned densely by [`Program::new`], which
//!   later phases use as the key of their side tables (e.g. resolved expression types).
//! - Node kinds are closed enums so that each phase can match them exhaustively.
//! - The tree is `serde`-serializable; JSON is the interchange format between the parser
//!   and the checker binary. Expression ids are not serialized, they are re-assigned on load.

pub mod ast;
pub mod visitor;

pub use ast::{
    BinaryOp, ClassDecl, Expr, ExprId, ExprKind, Field, Formal, Member, Method, Name,
    OperatorFamily, Program, Qualifier, Stmt, StmtKind, TypeExpr, UnaryOp, VarRef,
};
pub use visitor::{ExprCollector, Visitor};

//! # Bantam Semantic Analysis
//!
//! Semantic analysis of Bantam Java programs: class hierarchy construction, member
//! tables, scoped name resolution and static type checking.
//!
//! ## Architecture
//!
//! - [`ClassHierarchy`]: arena of classes linked into a tree rooted at `Object`
//! - [`MemberTables`]: per-class fields and methods, own and inherited
//! - [`SymbolTable`]: nested scopes used while checking method bodies
//! - [`SemanticAnalyzer`]: runs the phases above and the type checker in order
//!
//! Analysis reports problems as diagnostics and keeps going; the caller decides what a
//! non-empty diagnostic list means.
//!
//! ## Main Query
//!
//! The primary entry point is [`analyze_program`], which analyzes a [`ProgramSource`]
//! and is cached by Salsa until the program changes.

pub mod analyzer;
pub mod builtins;
pub mod class_hierarchy;
pub mod db;
pub mod members;
pub mod symbol_table;
mod type_checker;
pub mod types;

pub use analyzer::{AnalysisError, SemanticAnalysis, SemanticAnalyzer};
pub use class_hierarchy::{ClassHierarchy, ClassId, ClassTreeNode};
pub use db::{analyze_program, ProgramSource, SemanticDatabaseImpl, SemanticDb};
pub use members::{ClassMembers, FieldInfo, MemberTables, MethodSignature};
pub use symbol_table::{Symbol, SymbolFlags, SymbolTable, SymbolTableError};
pub use types::{ExprTypes, Type};

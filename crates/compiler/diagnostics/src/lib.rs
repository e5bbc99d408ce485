//! # Bantam Compiler Diagnostics
//!
//! Shared diagnostic records for every compiler phase. Lexical, parse and semantic
//! problems use the same record shape; they differ only in their [`DiagnosticKind`].

pub mod diagnostics;
pub mod reporting;

pub use diagnostics::{Diagnostic, DiagnosticCode, DiagnosticCollection, DiagnosticKind};
pub use reporting::{build_diagnostic_message, render_summary};

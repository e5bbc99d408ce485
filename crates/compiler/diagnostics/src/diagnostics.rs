//! # Diagnostic Records
//!
//! This module provides the diagnostic record reported by the compiler phases and the
//! append-only collection they accumulate into.

use std::fmt;

/// A diagnostic message from one of the compiler phases
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub code: DiagnosticCode,
    pub message: String,
    /// Source file the diagnostic applies to
    pub file_path: String,
    /// 1-based source line
    pub line: u32,
}

/// The compiler phase that produced a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticKind {
    Lexical,
    Parse,
    Semantic,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lexical => write!(f, "lexical"),
            Self::Parse => write!(f, "parse"),
            Self::Semantic => write!(f, "semantic"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCode {
    // Lexical and parse errors (0-999)
    LexicalError,
    SyntaxError,

    // Scope-related errors (1000-1999)
    UndeclaredVariable,
    DuplicateDefinition,
    ReservedIdentifier,
    MissingInitializer,

    // Type-related errors (2000-2999)
    TypeMismatch,
    InvalidIndexAccess,
    InvalidMethodCall,
    InvalidAssignment,
    InvalidReturnType,
    UndefinedType,
    InvalidCast,

    // Flow-related errors (3000-3999)
    InvalidBreak,

    // Class hierarchy errors (4000-4999)
    DuplicateClass,
    UndefinedParentClass,
    InheritanceCycle,
    InvalidOverride,
}

impl From<DiagnosticCode> for u32 {
    fn from(code: DiagnosticCode) -> Self {
        match code {
            DiagnosticCode::LexicalError => 1,
            DiagnosticCode::SyntaxError => 2,
            DiagnosticCode::UndeclaredVariable => 1001,
            DiagnosticCode::DuplicateDefinition => 1003,
            DiagnosticCode::ReservedIdentifier => 1005,
            DiagnosticCode::MissingInitializer => 1006,
            DiagnosticCode::TypeMismatch => 2001,
            DiagnosticCode::InvalidIndexAccess => 2003,
            DiagnosticCode::InvalidMethodCall => 2005,
            DiagnosticCode::InvalidAssignment => 2006,
            DiagnosticCode::InvalidReturnType => 2007,
            DiagnosticCode::UndefinedType => 2009,
            DiagnosticCode::InvalidCast => 2010,
            DiagnosticCode::InvalidBreak => 3003,
            DiagnosticCode::DuplicateClass => 4001,
            DiagnosticCode::UndefinedParentClass => 4002,
            DiagnosticCode::InheritanceCycle => 4003,
            DiagnosticCode::InvalidOverride => 4004,
        }
    }
}

impl Diagnostic {
    pub fn new(
        kind: DiagnosticKind,
        code: DiagnosticCode,
        file_path: impl Into<String>,
        line: u32,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            code,
            message: message.into(),
            file_path: file_path.into(),
            line,
        }
    }

    /// Create a semantic-analysis diagnostic
    pub fn semantic(
        code: DiagnosticCode,
        file_path: impl Into<String>,
        line: u32,
        message: impl Into<String>,
    ) -> Self {
        Self::new(DiagnosticKind::Semantic, code, file_path, line, message)
    }

    /// Convenience method for syntax errors
    pub fn syntax_error(file_path: impl Into<String>, line: u32, message: impl Into<String>) -> Self {
        Self::new(
            DiagnosticKind::Parse,
            DiagnosticCode::SyntaxError,
            file_path,
            line,
            message,
        )
    }

    /// Convenience method for undeclared variable error
    pub fn undeclared_variable(name: &str, file_path: impl Into<String>, line: u32) -> Self {
        Self::semantic(
            DiagnosticCode::UndeclaredVariable,
            file_path,
            line,
            format!("The variable {name} does not exist in this scope"),
        )
    }

    /// Convenience method for duplicate definition error
    pub fn duplicate_definition(
        what: &str,
        name: &str,
        file_path: impl Into<String>,
        line: u32,
    ) -> Self {
        Self::semantic(
            DiagnosticCode::DuplicateDefinition,
            file_path,
            line,
            format!("The {what} {name} has already been defined in this scope"),
        )
    }

    /// Convenience method for reserved identifier error
    pub fn reserved_identifier(name: &str, file_path: impl Into<String>, line: u32) -> Self {
        Self::semantic(
            DiagnosticCode::ReservedIdentifier,
            file_path,
            line,
            format!("{name} is a reserved word in Bantam Java and can't be used as an identifier"),
        )
    }

    /// Convenience method for undefined type error
    pub fn undefined_type(type_name: &str, file_path: impl Into<String>, line: u32) -> Self {
        Self::semantic(
            DiagnosticCode::UndefinedType,
            file_path,
            line,
            format!("The type {type_name} does not exist"),
        )
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}: {} error: {}",
            self.file_path, self.line, self.kind, self.message
        )
    }
}

/// Ordered, append-only collection of diagnostics.
///
/// Diagnostics are kept in discovery order; nothing is removed or rewritten once added.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DiagnosticCollection {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a diagnostic to the collection
    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Get all diagnostics, in discovery order
    pub fn all(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Get the diagnostics produced by one phase
    pub fn of_kind(&self, kind: DiagnosticKind) -> Vec<&Diagnostic> {
        self.diagnostics.iter().filter(|d| d.kind == kind).collect()
    }

    /// Get the diagnostics carrying a given code
    pub fn with_code(&self, code: DiagnosticCode) -> Vec<&Diagnostic> {
        self.diagnostics.iter().filter(|d| d.code == code).collect()
    }

    /// Every diagnostic is an error, so any entry means the phase failed
    pub const fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    /// Get the total number of diagnostics
    pub const fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// Check if the collection is empty
    pub const fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Get summary statistics
    pub fn summary(&self) -> String {
        match self.diagnostics.len() {
            0 => "No issues found".to_string(),
            1 => "1 error".to_string(),
            n => format!("{n} errors"),
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.diagnostics.iter()
    }
}

impl From<Vec<Diagnostic>> for DiagnosticCollection {
    fn from(diagnostics: Vec<Diagnostic>) -> Self {
        Self { diagnostics }
    }
}

impl IntoIterator for DiagnosticCollection {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.diagnostics.into_iter()
    }
}

impl<'a> IntoIterator for &'a DiagnosticCollection {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.diagnostics.iter()
    }
}

//! Bantam Java semantic checker front end
//!
//! Loads a program tree produced by the parser, runs semantic analysis over it and
//! renders the resulting diagnostics.

pub mod error;
pub mod worker;

use std::fs;
use std::path::Path;

use bantam_compiler_diagnostics::{build_diagnostic_message, render_summary, Diagnostic};
use bantam_compiler_semantic::{
    analyze_program, AnalysisError, ProgramSource, SemanticAnalysis, SemanticDatabaseImpl,
};
use bantam_compiler_syntax::Program;
use salsa::Setter;
use tracing::debug;

pub use error::{CompilerError, Result};
pub use worker::SemanticCheckWorker;

/// Loads a JSON-serialized program tree from `path`.
///
/// Expression ids are assigned while the tree is deserialized.
pub fn load_program(path: impl AsRef<Path>) -> Result<Program> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| CompilerError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let program: Program =
        serde_json::from_str(&content).map_err(|source| CompilerError::Json {
            path: path.to_path_buf(),
            source,
        })?;
    debug!(
        "Loaded {} classes and {} expressions from {}",
        program.classes().len(),
        program.expr_count(),
        path.display()
    );
    Ok(program)
}

/// Checks a single program with a fresh database.
pub fn check_program(program: Program, file_name: &str) -> CheckReport {
    CheckSession::default().check(program, file_name)
}

/// A database reused across successive checks.
///
/// Checking the same program twice returns the memoized analysis; checking a new
/// program replaces the input and re-runs the analysis.
#[derive(Default)]
pub struct CheckSession {
    db: SemanticDatabaseImpl,
    source: Option<ProgramSource>,
}

impl CheckSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn check(&mut self, program: Program, file_name: &str) -> CheckReport {
        let source = match self.source {
            Some(source) => {
                if source.program(&self.db) != &program {
                    source.set_program(&mut self.db).to(program);
                }
                source
            }
            None => {
                let source = ProgramSource::new(&self.db, program);
                self.source = Some(source);
                source
            }
        };
        let outcome = analyze_program(&self.db, source).clone();
        CheckReport::new(file_name, outcome)
    }
}

/// Outcome of checking one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckReport {
    file_name: String,
    outcome: std::result::Result<SemanticAnalysis, AnalysisError>,
}

impl CheckReport {
    pub fn new(
        file_name: impl Into<String>,
        outcome: std::result::Result<SemanticAnalysis, AnalysisError>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            outcome,
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub const fn outcome(&self) -> &std::result::Result<SemanticAnalysis, AnalysisError> {
        &self.outcome
    }

    pub fn analysis(&self) -> Option<&SemanticAnalysis> {
        self.outcome.as_ref().ok()
    }

    /// Diagnostics in the order they were reported; empty when analysis stopped early.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        match &self.outcome {
            Ok(analysis) => analysis.diagnostics().all(),
            Err(_) => &[],
        }
    }

    /// True when analysis ran to completion without a single diagnostic.
    pub fn succeeded(&self) -> bool {
        self.analysis().is_some_and(SemanticAnalysis::is_ok)
    }

    /// Renders the end-of-run summary.
    pub fn render(&self) -> String {
        match &self.outcome {
            Ok(analysis) => render_summary(analysis.diagnostics(), &self.file_name),
            Err(err) => format!("Semantic analysis failed\n{err}\n"),
        }
    }

    /// Renders every diagnostic as a report against the source text it was parsed from.
    pub fn render_with_source(&self, source: &str, with_color: bool) -> Vec<String> {
        self.diagnostics()
            .iter()
            .map(|diagnostic| build_diagnostic_message(source, diagnostic, with_color))
            .collect()
    }
}

//! Salsa database exposing semantic analysis as a memoized query.

use bantam_compiler_syntax::Program;

use crate::analyzer::{AnalysisError, SemanticAnalysis, SemanticAnalyzer};

/// Database trait for semantic analysis
#[salsa::db]
pub trait SemanticDb: salsa::Database {}

/// Concrete database implementation for semantic analysis
#[salsa::db]
#[derive(Clone, Default)]
pub struct SemanticDatabaseImpl {
    storage: salsa::Storage<Self>,
}

#[salsa::db]
impl salsa::Database for SemanticDatabaseImpl {}

#[salsa::db]
impl SemanticDb for SemanticDatabaseImpl {}

/// The program tree handed over by the parser.
#[salsa::input(debug)]
pub struct ProgramSource {
    #[returns(ref)]
    pub program: Program,
}

/// Returns the semantic analysis of `source`.
///
/// The result is memoized until the program of `source` is replaced.
#[salsa::tracked(returns(ref), no_eq)]
pub fn analyze_program(
    db: &dyn SemanticDb,
    source: ProgramSource,
) -> Result<SemanticAnalysis, AnalysisError> {
    let _span = tracing::trace_span!("analyze_program", ?source).entered();
    SemanticAnalyzer::new(source.program(db)).analyze()
}

//! # Semantic Analyzer
//!
//! Sequences the analysis of one program:
//!
//! 1. build the class hierarchy
//! 2. fill the member tables of every class, parents first
//! 3. type check every user class in declaration order
//!
//! Semantic errors never stop the run; they are accumulated in the analysis'
//! diagnostics. Only a program without any class ends the run early.

use bantam_compiler_diagnostics::DiagnosticCollection;
use bantam_compiler_syntax::{Expr, ExprCollector, ExprId, Program};
use thiserror::Error;
use tracing::debug;

use crate::class_hierarchy::ClassHierarchy;
use crate::members::MemberTables;
use crate::type_checker::TypeChecker;
use crate::types::{ExprTypes, Type};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    #[error("semantic analysis incomplete: the program declares no classes")]
    EmptyProgram,
}

/// Everything semantic analysis learned about a program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SemanticAnalysis {
    hierarchy: ClassHierarchy,
    members: MemberTables,
    expr_types: ExprTypes,
    diagnostics: DiagnosticCollection,
}

impl SemanticAnalysis {
    pub const fn hierarchy(&self) -> &ClassHierarchy {
        &self.hierarchy
    }

    pub const fn members(&self) -> &MemberTables {
        &self.members
    }

    pub const fn expr_types(&self) -> &ExprTypes {
        &self.expr_types
    }

    pub const fn diagnostics(&self) -> &DiagnosticCollection {
        &self.diagnostics
    }

    /// Resolved type of an expression, if it could be determined.
    pub fn type_of(&self, expr: ExprId) -> Option<&Type> {
        self.expr_types.get(expr)
    }

    pub const fn is_ok(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Expressions of `program` that were left untyped.
    pub fn unresolved_expressions<'p>(&self, program: &'p Program) -> Vec<&'p Expr> {
        ExprCollector::collect(program)
            .into_iter()
            .filter(|expr| self.type_of(expr.id).is_none())
            .collect()
    }
}

pub struct SemanticAnalyzer<'a> {
    program: &'a Program,
}

impl<'a> SemanticAnalyzer<'a> {
    pub const fn new(program: &'a Program) -> Self {
        Self { program }
    }

    pub fn analyze(self) -> Result<SemanticAnalysis, AnalysisError> {
        if self.program.is_empty() {
            return Err(AnalysisError::EmptyProgram);
        }

        let mut diagnostics = DiagnosticCollection::new();

        let hierarchy = {
            let _span = tracing::trace_span!("class_hierarchy").entered();
            ClassHierarchy::build(self.program, &mut diagnostics)
        };

        let members = {
            let _span = tracing::trace_span!("member_tables").entered();
            MemberTables::build(&hierarchy, &mut diagnostics)
        };

        let mut expr_types = ExprTypes::with_capacity(self.program.expr_count());
        {
            let _span = tracing::trace_span!("type_check").entered();
            for class in hierarchy.user_classes() {
                let decl = &hierarchy.node(class).decl;
                TypeChecker::new(&hierarchy, &members, class, &mut expr_types, &mut diagnostics)
                    .check_class(decl);
            }
        }

        debug!(
            "semantic analysis finished: {} classes, {} of {} expressions typed, {}",
            hierarchy.len(),
            expr_types.resolved_count(),
            self.program.expr_count(),
            diagnostics.summary()
        );

        Ok(SemanticAnalysis {
            hierarchy,
            members,
            expr_types,
            diagnostics,
        })
    }
}

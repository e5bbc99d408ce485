use std::path::PathBuf;

use thiserror::Error;

/// Result type for front-end operations
pub type Result<T> = std::result::Result<T, CompilerError>;

/// Errors raised before or around semantic analysis.
///
/// Semantic problems in the program itself are never reported here: they are
/// diagnostics inside the [`CheckReport`](crate::CheckReport).
#[derive(Debug, Error)]
pub enum CompilerError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not a valid program tree: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to start the semantic check thread: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("the semantic check thread exited without a report")]
    WorkerDisconnected,
}

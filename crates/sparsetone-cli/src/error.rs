//! Error types for the sparsetone CLI.

use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;

/// Result type alias for CLI operations
pub(crate) type Result<T> = std::result::Result<T, CliError>;

/// CLI error types
#[derive(Error, Debug)]
pub(crate) enum CliError {
    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// Input file parsed but its contents are unusable
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Malformed JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Solver or dictionary error
    #[error("Solver error: {0}")]
    Solver(String),
}

impl CliError {
    /// Get exit code for this error
    pub(crate) fn exit_code(&self) -> ExitCode {
        match self {
            Self::Solver(_) => ExitCode::from(1),
            Self::FileNotFound(_) => ExitCode::from(3),
            Self::Json(_) => ExitCode::from(4),
            Self::InvalidInput(_) => ExitCode::from(5),
            Self::Io(_) => ExitCode::from(7),
        }
    }
}

impl From<sparsetone::SparseToneError> for CliError {
    fn from(e: sparsetone::SparseToneError) -> Self {
        match e {
            sparsetone::SparseToneError::Io(io) => Self::Io(io),
            sparsetone::SparseToneError::Serialization(msg) => Self::InvalidInput(msg),
            other => Self::Solver(other.to_string()),
        }
    }
}

//! Error types for sparsetone operations.
//!
//! Only genuine failures are errors. Solver outcomes such as "did not converge"
//! or "constraint infeasible" are reported through the result types instead.

use thiserror::Error;

/// Main error type for sparsetone operations.
///
/// # Examples
///
/// ```
/// use sparsetone::error::SparseToneError;
///
/// let err = SparseToneError::DimensionMismatch {
///     expected: "block_length=10".to_string(),
///     actual: "12".to_string(),
/// };
/// assert!(err.to_string().contains("dimension mismatch"));
/// ```
#[derive(Debug, Error)]
pub enum SparseToneError {
    /// Matrix/vector dimensions don't match for the operation.
    #[error("Matrix dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimensions description
        expected: String,
        /// Actual dimensions found
        actual: String,
    },

    /// Dictionary has no usable Lipschitz constant (all-zero or non-finite).
    #[error("Degenerate dictionary: Lipschitz constant = {lipschitz}, expected a finite value > 0")]
    DegenerateDictionary {
        /// Estimated spectral norm of AᵀA
        lipschitz: f64,
    },

    /// Length is not a whole number of coefficient groups.
    #[error("Invalid group size: length {len} is not divisible into groups of {group_size}")]
    InvalidGroupSize {
        /// Vector length or column count
        len: usize,
        /// Requested group size
        group_size: usize,
    },

    /// Invalid hyperparameter value provided.
    #[error("Invalid hyperparameter: {param} = {value}, expected {constraint}")]
    InvalidHyperparameter {
        /// Parameter name
        param: String,
        /// Provided value
        value: String,
        /// Constraint description
        constraint: String,
    },

    /// Regularization search hit its hard step cap.
    #[error("Regularization search exhausted during {phase} after {steps} steps (gamma = {gamma})")]
    SearchExhausted {
        /// Search phase ("bracket" or "bisection")
        phase: &'static str,
        /// Steps taken before giving up
        steps: usize,
        /// Last gamma evaluated
        gamma: f64,
    },

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O error (file not found, permission denied, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SparseToneError {
    /// Create a dimension mismatch error with descriptive context
    #[must_use]
    pub fn dimension_mismatch(context: &str, expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch {
            expected: format!("{context}={expected}"),
            actual: format!("{actual}"),
        }
    }

    /// Create an invalid hyperparameter error
    #[must_use]
    pub fn invalid_hyperparameter(param: &str, value: f64, constraint: &str) -> Self {
        Self::InvalidHyperparameter {
            param: param.to_string(),
            value: value.to_string(),
            constraint: constraint.to_string(),
        }
    }
}

impl From<serde_json::Error> for SparseToneError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Convenience type alias for Results.
pub type Result<T> = std::result::Result<T, SparseToneError>;

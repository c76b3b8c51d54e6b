//! Dictionary matrices for block-wise sparse decomposition.
//!
//! A [`Dictionary`] pairs a dense `block_length × n_coefficients` matrix with
//! its coefficient group size and the Lipschitz constant λ_max(AᵀA). The
//! constant is computed once at construction and shared by every solve.
//!
//! [`Dictionary::tonal`] builds the cosine/sine dictionary for a set of
//! frequencies; [`Dictionary::piano`] uses the 88 equal-tempered piano keys.

mod tonal;

pub use tonal::{piano_frequencies, tonal_matrix, A0_HZ, PIANO_KEYS};

use crate::error::Result;
use crate::optim::lipschitz_constant;
use crate::optim::prox::check_groups;
use crate::primitives::Matrix;

/// Immutable dictionary shared read-only across solver calls.
///
/// # Example
///
/// ```
/// use sparsetone::dictionary::Dictionary;
///
/// let dict = Dictionary::tonal(&[100.0, 200.0], 1000.0, 10).expect("valid parameters");
/// assert_eq!(dict.block_length(), 10);
/// assert_eq!(dict.n_atoms(), 2);
/// assert!((dict.lipschitz() - 5.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct Dictionary {
    matrix: Matrix<f64>,
    group_size: usize,
    lipschitz: f64,
}

impl Dictionary {
    /// Wraps a matrix whose columns form contiguous groups of `group_size`.
    ///
    /// # Errors
    ///
    /// * [`SparseToneError::InvalidGroupSize`](crate::error::SparseToneError::InvalidGroupSize)
    ///   if `group_size` is zero or does not divide the column count
    /// * [`SparseToneError::DegenerateDictionary`](crate::error::SparseToneError::DegenerateDictionary)
    ///   if the matrix is all zero or has a NaN or infinite entry
    pub fn new(matrix: Matrix<f64>, group_size: usize) -> Result<Self> {
        check_groups(matrix.n_cols(), group_size)?;
        let lipschitz = lipschitz_constant(&matrix)?;
        tracing::debug!(
            rows = matrix.n_rows(),
            cols = matrix.n_cols(),
            group_size,
            lipschitz,
            "dictionary ready"
        );
        Ok(Self {
            matrix,
            group_size,
            lipschitz,
        })
    }

    /// Cosine/sine dictionary, one pair of columns per frequency (group size 2).
    ///
    /// # Errors
    ///
    /// Invalid frequencies, sample rate or block length; see [`tonal_matrix`].
    pub fn tonal(frequencies: &[f64], sample_rate: f64, block_length: usize) -> Result<Self> {
        Self::new(tonal_matrix(frequencies, sample_rate, block_length)?, 2)
    }

    /// Tonal dictionary over the 88 piano key fundamentals.
    ///
    /// # Errors
    ///
    /// Invalid sample rate or block length.
    pub fn piano(sample_rate: f64, block_length: usize) -> Result<Self> {
        Self::tonal(&piano_frequencies(), sample_rate, block_length)
    }

    #[must_use]
    pub fn matrix(&self) -> &Matrix<f64> {
        &self.matrix
    }

    #[must_use]
    pub fn group_size(&self) -> usize {
        self.group_size
    }

    /// λ_max(AᵀA).
    #[must_use]
    pub fn lipschitz(&self) -> f64 {
        self.lipschitz
    }

    /// Rows of the matrix, i.e. the required signal block length.
    #[must_use]
    pub fn block_length(&self) -> usize {
        self.matrix.n_rows()
    }

    /// Columns of the matrix, i.e. the coefficient vector length.
    #[must_use]
    pub fn n_coefficients(&self) -> usize {
        self.matrix.n_cols()
    }

    /// Number of coefficient groups (atoms).
    #[must_use]
    pub fn n_atoms(&self) -> usize {
        self.matrix.n_cols() / self.group_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SparseToneError;

    #[test]
    fn test_new_caches_lipschitz() {
        let dict = Dictionary::new(Matrix::eye(4), 2).expect("identity");
        assert!((dict.lipschitz() - 1.0).abs() < 1e-12);
        assert_eq!(dict.n_atoms(), 2);
        assert_eq!(dict.n_coefficients(), 4);
        assert_eq!(dict.block_length(), 4);
    }

    #[test]
    fn test_new_rejects_ragged_groups() {
        let err = Dictionary::new(Matrix::eye(3), 2).expect_err("3 columns, pairs");
        assert!(matches!(err, SparseToneError::InvalidGroupSize { .. }));
    }

    #[test]
    fn test_new_rejects_zero_matrix() {
        let err = Dictionary::new(Matrix::zeros(5, 4), 2).expect_err("all zero");
        assert!(matches!(err, SparseToneError::DegenerateDictionary { .. }));
    }

    #[test]
    fn test_new_rejects_nan_entry() {
        let a = Matrix::from_vec(2, 2, vec![f64::NAN, 0.0, 0.0, 1.0]).expect("2x2");
        let err = Dictionary::new(a, 2).expect_err("NaN entry");
        assert!(matches!(err, SparseToneError::DegenerateDictionary { .. }));
    }

    #[test]
    fn test_piano_shape() {
        let dict = Dictionary::piano(8000.0, 64).expect("valid parameters");
        assert_eq!(dict.matrix().shape(), (64, 176));
        assert_eq!(dict.n_atoms(), PIANO_KEYS);
        assert_eq!(dict.group_size(), 2);
        assert!(dict.lipschitz() > 0.0);
    }
}

//! Per-atom activity across blocks.
//!
//! Each group of coefficients is one atom (for the tonal dictionary, the
//! cosine/sine pair of a single frequency). Its magnitude ‖x_g‖₂ is the
//! amplitude of that atom in the block. Collecting magnitudes block by block
//! gives an atoms × blocks map, a sparse spectrogram.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SparseToneError};
use crate::optim::prox::{check_groups, group_norms};
use crate::primitives::{Matrix, Vector};

/// Group magnitudes ‖x_g‖₂ of one coefficient vector.
///
/// # Errors
///
/// Returns an error if `group_size` is zero or does not divide `x.len()`.
pub fn atom_magnitudes(x: &Vector<f64>, group_size: usize) -> Result<Vector<f64>> {
    Ok(Vector::from_vec(group_norms(x, group_size)?))
}

/// Atom magnitudes over a sequence of blocks.
///
/// Row `i` is atom `i`, column `b` is block `b`. A block with no solution
/// (an infeasible residual target) contributes an all-zero column.
///
/// # Example
///
/// ```
/// use sparsetone::primitives::Vector;
/// use sparsetone::spectrogram::ActivityMap;
///
/// let x0 = Vector::from_slice(&[3.0, 4.0, 0.0, 0.0]);
/// let x1 = Vector::from_slice(&[0.0, 0.0, 0.0, 2.0]);
/// let map = ActivityMap::from_coefficients(&[Some(&x0), None, Some(&x1)], 2)
///     .expect("groups of two");
///
/// assert_eq!(map.n_atoms(), 2);
/// assert_eq!(map.n_blocks(), 3);
/// assert_eq!(map.magnitude(0, 0), 5.0);
/// let expected: Vec<Vec<usize>> = vec![vec![0], vec![], vec![1]];
/// assert_eq!(map.active(1.0), expected);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityMap {
    magnitudes: Matrix<f64>,
}

impl ActivityMap {
    /// Builds the map from per-block coefficients.
    ///
    /// # Errors
    ///
    /// Invalid group size, or coefficient vectors of differing lengths.
    pub fn from_coefficients(
        coefficients: &[Option<&Vector<f64>>],
        group_size: usize,
    ) -> Result<Self> {
        let n_coeffs = coefficients.iter().flatten().map(|x| x.len()).next();
        let Some(n_coeffs) = n_coeffs else {
            // Nothing solved: the atom count is unknown
            return Ok(Self {
                magnitudes: Matrix::zeros(0, coefficients.len()),
            });
        };
        check_groups(n_coeffs, group_size)?;

        let n_atoms = n_coeffs / group_size;
        let mut magnitudes = Matrix::zeros(n_atoms, coefficients.len());
        for (block, x) in coefficients.iter().enumerate() {
            let Some(x) = x else { continue };
            if x.len() != n_coeffs {
                return Err(SparseToneError::dimension_mismatch(
                    "coefficient length",
                    n_coeffs,
                    x.len(),
                ));
            }
            for (atom, m) in group_norms(x, group_size)?.into_iter().enumerate() {
                magnitudes.set(atom, block, m);
            }
        }
        Ok(Self { magnitudes })
    }

    #[must_use]
    pub fn n_atoms(&self) -> usize {
        self.magnitudes.n_rows()
    }

    #[must_use]
    pub fn n_blocks(&self) -> usize {
        self.magnitudes.n_cols()
    }

    /// Magnitude of `atom` in `block`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range.
    #[must_use]
    pub fn magnitude(&self, atom: usize, block: usize) -> f64 {
        self.magnitudes.get(atom, block)
    }

    /// The full atoms × blocks matrix.
    #[must_use]
    pub fn magnitudes(&self) -> &Matrix<f64> {
        &self.magnitudes
    }

    /// Largest magnitude anywhere in the map (0 when empty).
    #[must_use]
    pub fn max_magnitude(&self) -> f64 {
        self.magnitudes
            .as_slice()
            .iter()
            .copied()
            .fold(0.0, f64::max)
    }

    /// Indices of atoms whose magnitude exceeds `threshold`, per block.
    #[must_use]
    pub fn active(&self, threshold: f64) -> Vec<Vec<usize>> {
        (0..self.n_blocks())
            .map(|block| {
                (0..self.n_atoms())
                    .filter(|&atom| self.magnitude(atom, block) > threshold)
                    .collect()
            })
            .collect()
    }

    /// Copy of the map with magnitudes at or below `threshold` set to zero.
    #[must_use]
    pub fn thresholded(&self, threshold: f64) -> Matrix<f64> {
        let mut out = self.magnitudes.clone();
        for atom in 0..self.n_atoms() {
            for block in 0..self.n_blocks() {
                if out.get(atom, block) <= threshold {
                    out.set(atom, block, 0.0);
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_atom_magnitudes() {
        let x = Vector::from_slice(&[3.0, 4.0, 0.0, 0.0, -1.0, 0.0]);
        let m = atom_magnitudes(&x, 2).expect("pairs");
        assert_eq!(m.as_slice(), &[5.0, 0.0, 1.0]);
    }

    #[test]
    fn test_atom_magnitudes_bad_group() {
        let err = atom_magnitudes(&Vector::zeros(5), 2).expect_err("5 not divisible by 2");
        assert!(matches!(err, SparseToneError::InvalidGroupSize { .. }));
    }

    #[test]
    fn test_missing_block_is_zero_column() {
        let x = Vector::from_slice(&[1.0, 0.0, 0.0, 1.0]);
        let map = ActivityMap::from_coefficients(&[None, Some(&x)], 2).expect("valid");
        assert_eq!(map.magnitude(0, 0), 0.0);
        assert_eq!(map.magnitude(1, 0), 0.0);
        assert_eq!(map.magnitude(0, 1), 1.0);
        assert_eq!(map.magnitude(1, 1), 1.0);
    }

    #[test]
    fn test_all_missing() {
        let map = ActivityMap::from_coefficients(&[None, None], 2).expect("valid");
        assert_eq!(map.n_atoms(), 0);
        assert_eq!(map.n_blocks(), 2);
        assert_eq!(map.max_magnitude(), 0.0);
        assert_eq!(map.active(0.0), vec![Vec::<usize>::new(), Vec::new()]);
    }

    #[test]
    fn test_length_mismatch() {
        let a = Vector::zeros(4);
        let b = Vector::zeros(6);
        let err = ActivityMap::from_coefficients(&[Some(&a), Some(&b)], 2)
            .expect_err("lengths differ");
        assert!(matches!(err, SparseToneError::DimensionMismatch { .. }));
    }

    #[test]
    fn test_thresholded_and_max() {
        let x = Vector::from_slice(&[0.0, 0.5, 2.0, 0.0]);
        let map = ActivityMap::from_coefficients(&[Some(&x)], 2).expect("valid");
        assert_eq!(map.max_magnitude(), 2.0);
        let t = map.thresholded(0.5);
        assert_eq!(t.get(0, 0), 0.0);
        assert_eq!(t.get(1, 0), 2.0);
    }
}

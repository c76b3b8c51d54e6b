//! Proximal operator of the group-lasso penalty.
//!
//! A proximal operator for function g is defined as:
//! ```text
//! prox_g(v) = argmin_x { g(x) + ½‖x - v‖² }
//! ```
//!
//! For g(x) = τ Σ_g ‖x_g‖₂ over contiguous groups of size d, the minimiser
//! shrinks each group toward zero by τ along its own direction, and zeroes
//! any group whose norm does not exceed τ.

use crate::error::{Result, SparseToneError};
use crate::primitives::Vector;

/// Group soft-thresholding: `prox_{τ Σ‖·‖₂}(v)` over groups of `group_size`.
///
/// Each group `v_g` is scaled by `max(1 − τ/‖v_g‖, 0)`. A group with zero norm
/// stays zero.
///
/// # Arguments
///
/// * `v` - Input vector, length divisible by `group_size`
/// * `threshold` - Shrinkage τ ≥ 0 (for APGD, γ/L)
/// * `group_size` - Group size d > 0
///
/// # Errors
///
/// [`SparseToneError::InvalidGroupSize`] if `group_size == 0` or does not
/// divide `v.len()`; [`SparseToneError::InvalidHyperparameter`] if `threshold`
/// is negative or NaN.
///
/// # Example
///
/// ```
/// use sparsetone::optim::prox::group_soft_threshold;
/// use sparsetone::primitives::Vector;
///
/// // Two groups: [3, 4] has norm 5, [0.3, 0.4] has norm 0.5
/// let v = Vector::from_slice(&[3.0, 4.0, 0.3, 0.4]);
/// let result = group_soft_threshold(&v, 1.0, 2).expect("4 splits into pairs");
///
/// assert!((result[0] - 2.4).abs() < 1e-12); // 3 * (1 - 1/5)
/// assert!((result[1] - 3.2).abs() < 1e-12); // 4 * (1 - 1/5)
/// assert_eq!(result[2], 0.0);
/// assert_eq!(result[3], 0.0);
/// ```
pub fn group_soft_threshold(
    v: &Vector<f64>,
    threshold: f64,
    group_size: usize,
) -> Result<Vector<f64>> {
    check_groups(v.len(), group_size)?;
    if threshold.is_nan() || threshold < 0.0 {
        return Err(SparseToneError::invalid_hyperparameter(
            "threshold",
            threshold,
            ">= 0",
        ));
    }
    let mut out = v.clone();
    shrink_groups(out.as_mut_slice(), threshold, group_size);
    Ok(out)
}

/// Euclidean norm of each contiguous group.
///
/// # Errors
///
/// [`SparseToneError::InvalidGroupSize`] if `group_size` is zero or does not
/// divide `v.len()`.
pub fn group_norms(v: &Vector<f64>, group_size: usize) -> Result<Vec<f64>> {
    check_groups(v.len(), group_size)?;
    Ok(v.as_slice()
        .chunks_exact(group_size)
        .map(|g| g.iter().map(|c| c * c).sum::<f64>().sqrt())
        .collect())
}

/// Validates that `len` splits into whole groups of `group_size`.
pub(crate) fn check_groups(len: usize, group_size: usize) -> Result<()> {
    if group_size == 0 || len % group_size != 0 {
        return Err(SparseToneError::InvalidGroupSize { len, group_size });
    }
    Ok(())
}

/// In-place group shrinkage; callers have already validated the arguments.
pub(crate) fn shrink_groups(values: &mut [f64], threshold: f64, group_size: usize) {
    for group in values.chunks_exact_mut(group_size) {
        let norm = group.iter().map(|c| c * c).sum::<f64>().sqrt();
        let scale = if norm > 0.0 {
            (1.0 - threshold / norm).max(0.0)
        } else {
            0.0
        };
        for c in group.iter_mut() {
            *c *= scale;
        }
    }
}

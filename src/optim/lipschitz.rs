//! Lipschitz constant of the least-squares gradient.
//!
//! L = ‖AᵀA‖₂ = λ_max(AᵀA), estimated by power iteration on AᵀA using
//! `matvec`/`tmatvec` so the Gram matrix is never formed.

use crate::error::{Result, SparseToneError};
use crate::primitives::{Matrix, Vector};

/// Upper limit on power iterations.
const MAX_POWER_ITER: usize = 1000;

/// Relative change in the eigenvalue estimate at which iteration stops.
const POWER_TOL: f64 = 1e-12;

/// Spectral norm of AᵀA.
///
/// The estimate is never below the largest squared column norm, which is a
/// lower bound on λ_max(AᵀA).
///
/// # Errors
///
/// [`SparseToneError::DegenerateDictionary`] if `A` has no nonzero entry,
/// contains a NaN or infinite entry, or the estimate is not finite.
///
/// # Example
///
/// ```
/// use sparsetone::optim::lipschitz_constant;
/// use sparsetone::primitives::Matrix;
///
/// let a = Matrix::from_vec(2, 2, vec![2.0, 0.0, 0.0, 1.0]).expect("2x2");
/// let l = lipschitz_constant(&a).expect("nonzero matrix");
/// assert!((l - 4.0).abs() < 1e-9);
/// ```
pub fn lipschitz_constant(a: &Matrix<f64>) -> Result<f64> {
    if a.n_cols() == 0 || a.n_rows() == 0 || a.is_zero() {
        return Err(SparseToneError::DegenerateDictionary { lipschitz: 0.0 });
    }
    if let Some(&bad) = a.as_slice().iter().find(|v| !v.is_finite()) {
        tracing::warn!(entry = bad, "dictionary has a non-finite entry");
        return Err(SparseToneError::DegenerateDictionary { lipschitz: bad });
    }

    let (best_col, column_bound) = max_column_norm_sq(a);
    let n = a.n_cols();

    // Irrational-stride start vector, unlikely to be orthogonal to the top eigenvector.
    let start = Vector::from_vec(
        (0..n)
            .map(|i| 1.0 + (i as f64 * 0.618_033_988_749_895).fract())
            .collect(),
    );
    let lambda = match power_iterate(a, start)? {
        Some(lambda) => lambda,
        None => {
            tracing::debug!(best_col, "start vector in null space, restarting from heaviest column");
            let mut e = Vector::zeros(n);
            e[best_col] = 1.0;
            power_iterate(a, e)?.unwrap_or(column_bound)
        }
    };

    // f64::max ignores NaN
    if !lambda.is_finite() {
        return Err(SparseToneError::DegenerateDictionary { lipschitz: lambda });
    }
    let lipschitz = lambda.max(column_bound);
    if !lipschitz.is_finite() || lipschitz <= 0.0 {
        return Err(SparseToneError::DegenerateDictionary { lipschitz });
    }
    Ok(lipschitz)
}

/// Runs power iteration on AᵀA from `v`; `None` if the iterate collapses to zero.
fn power_iterate(a: &Matrix<f64>, v: Vector<f64>) -> Result<Option<f64>> {
    let mut v = v.mul_scalar(1.0 / v.norm());
    let mut lambda = 0.0;
    for iter in 0..MAX_POWER_ITER {
        let w = a.tmatvec(&a.matvec(&v)?)?;
        let norm = w.norm();
        if norm == 0.0 {
            return Ok(None);
        }
        let converged = (norm - lambda).abs() <= POWER_TOL * norm;
        lambda = norm;
        v = w.mul_scalar(1.0 / norm);
        if converged {
            tracing::trace!(iter, lambda, "power iteration converged");
            break;
        }
    }
    Ok(Some(lambda))
}

/// Index and value of the largest squared column norm.
fn max_column_norm_sq(a: &Matrix<f64>) -> (usize, f64) {
    let mut sums = vec![0.0; a.n_cols()];
    for i in 0..a.n_rows() {
        for (s, &v) in sums.iter_mut().zip(a.row_slice(i)) {
            *s += v * v;
        }
    }
    sums.into_iter()
        .enumerate()
        .fold((0, 0.0), |best, (j, s)| if s > best.1 { (j, s) } else { best })
}

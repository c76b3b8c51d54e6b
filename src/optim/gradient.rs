//! Least-squares data-fit term: gradient and residual.
//!
//! The smooth part of the objective is f(x) = ½‖Ax − y‖², so
//! ∇f(x) = Aᵀ(Ax − y) and the Lipschitz constant of ∇f is λ_max(AᵀA).

use crate::error::{Result, SparseToneError};
use crate::primitives::{Matrix, Vector};

/// Computes `Aᵀ(Ax − y)`, the gradient of ½‖Ax − y‖².
///
/// # Errors
///
/// Returns [`SparseToneError::DimensionMismatch`] when `x.len() != A.n_cols()`
/// or `y.len() != A.n_rows()`.
///
/// # Example
///
/// ```
/// use sparsetone::optim::least_squares_gradient;
/// use sparsetone::primitives::{Matrix, Vector};
///
/// let a = Matrix::eye(2);
/// let x = Vector::from_slice(&[1.0, 1.0]);
/// let y = Vector::from_slice(&[0.5, 2.0]);
/// let g = least_squares_gradient(&a, &x, &y).expect("shapes agree");
/// assert_eq!(g.as_slice(), &[0.5, -1.0]);
/// ```
pub fn least_squares_gradient(
    a: &Matrix<f64>,
    x: &Vector<f64>,
    y: &Vector<f64>,
) -> Result<Vector<f64>> {
    let residual = residual_vector(a, x, y)?;
    a.tmatvec(&residual)
}

/// Euclidean norm of the residual, ‖Ax − y‖₂.
///
/// # Errors
///
/// Same shape checks as [`least_squares_gradient`].
pub fn residual_norm(a: &Matrix<f64>, x: &Vector<f64>, y: &Vector<f64>) -> Result<f64> {
    Ok(residual_vector(a, x, y)?.norm())
}

fn residual_vector(a: &Matrix<f64>, x: &Vector<f64>, y: &Vector<f64>) -> Result<Vector<f64>> {
    if y.len() != a.n_rows() {
        return Err(SparseToneError::dimension_mismatch(
            "signal length",
            a.n_rows(),
            y.len(),
        ));
    }
    let ax = a.matvec(x)?;
    Ok(ax.sub(y))
}

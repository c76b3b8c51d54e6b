//! Group-sparse least-squares solvers.
//!
//! # Available Solvers
//!
//! - [`Apgd`] - Accelerated proximal gradient for a fixed regularization weight γ
//! - [`Lscgnm`] - Bracket-and-bisect search over γ to hit a target residual σ
//!
//! # Building Blocks
//!
//! - [`least_squares_gradient`] / [`residual_norm`] - data-fit term ½‖Ax − y‖²
//! - [`prox::group_soft_threshold`] - proximal operator of γ Σ_g ‖x_g‖₂
//! - [`lipschitz_constant`] - λ_max(AᵀA), the inverse step size
//!
//! # Example
//!
//! ```
//! use sparsetone::dictionary::Dictionary;
//! use sparsetone::optim::{Apgd, ConvergenceStatus};
//! use sparsetone::primitives::{Matrix, Vector};
//!
//! let dict = Dictionary::new(Matrix::eye(4), 2).expect("identity dictionary");
//! let y = Vector::from_slice(&[0.0, 0.0, 1.0, 1.0]);
//!
//! let result = Apgd::new(1000, 1e-8)
//!     .solve(&dict, &y, 0.01, &Vector::zeros(4))
//!     .expect("shapes agree");
//!
//! assert_eq!(result.status, ConvergenceStatus::Converged);
//! assert!(result.solution[0].abs() < 1e-12);
//! ```

use serde::{Deserialize, Serialize};

mod apgd;
mod gradient;
mod lipschitz;
mod lscgnm;
pub mod prox;

pub use apgd::{Apgd, ApgdResult};
pub use gradient::{least_squares_gradient, residual_norm};
pub use lipschitz::lipschitz_constant;
pub use lscgnm::{ConstrainedSolution, Lscgnm};

/// Convergence status of an APGD run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConvergenceStatus {
    /// Step norm fell to the tolerance
    Converged,
    /// Reached maximum iteration limit
    MaxIterations,
}

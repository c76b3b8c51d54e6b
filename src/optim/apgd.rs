//! APGD (Accelerated Proximal Gradient Descent) for the group-lasso objective.
//!
//! Minimizes
//! ```text
//! ½‖Ax − y‖² + γ Σ_g ‖x_g‖₂
//! ```
//! with a fixed step 1/L, L = λ_max(AᵀA), and Nesterov extrapolation.

use serde::{Deserialize, Serialize};

use crate::dictionary::Dictionary;
use crate::error::{Result, SparseToneError};
use crate::primitives::{Matrix, Vector};

use super::gradient::least_squares_gradient;
use super::prox::{check_groups, shrink_groups};
use super::ConvergenceStatus;

/// APGD solver settings.
///
/// The solver itself is stateless: momentum `t`, the extrapolation point `z`
/// and the iterate `x` live only for the duration of one [`Apgd::solve`] call.
///
/// # Example
///
/// ```
/// use sparsetone::dictionary::Dictionary;
/// use sparsetone::optim::Apgd;
/// use sparsetone::primitives::{Matrix, Vector};
///
/// let dict = Dictionary::new(Matrix::eye(4), 2).expect("identity dictionary");
/// let y = Vector::from_slice(&[3.0, 4.0, 0.0, 0.0]);
///
/// let apgd = Apgd::new(100, 1e-9);
/// let result = apgd.solve(&dict, &y, 1e-3, &Vector::zeros(4)).expect("shapes agree");
///
/// assert!(result.is_converged());
/// assert!((result.solution[0] - 3.0).abs() < 1e-2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Apgd {
    /// Maximum number of iterations
    pub(crate) max_iter: usize,
    /// Convergence tolerance on ‖xₖ₊₁ − xₖ‖₂
    pub(crate) tol: f64,
}

impl Default for Apgd {
    fn default() -> Self {
        Self {
            max_iter: 10_000,
            tol: 1e-6,
        }
    }
}

impl Apgd {
    /// Creates a new APGD solver.
    ///
    /// # Arguments
    ///
    /// * `max_iter` - Iteration cap
    /// * `tol` - Stop once ‖xₖ₊₁ − xₖ‖₂ ≤ tol
    #[must_use]
    pub fn new(max_iter: usize, tol: f64) -> Self {
        Self { max_iter, tol }
    }

    /// Sets the iteration cap.
    #[must_use]
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Sets the step-norm tolerance.
    #[must_use]
    pub fn with_tol(mut self, tol: f64) -> Self {
        self.tol = tol;
        self
    }

    #[must_use]
    pub fn max_iter(&self) -> usize {
        self.max_iter
    }

    #[must_use]
    pub fn tol(&self) -> f64 {
        self.tol
    }

    /// Solves the group-lasso problem for one signal block against a dictionary.
    ///
    /// Uses the dictionary's cached Lipschitz constant and group size.
    ///
    /// # Errors
    ///
    /// Shape mismatches between the dictionary, `y` and `x0`, or an invalid
    /// `gamma`/`tol`.
    pub fn solve(
        &self,
        dictionary: &Dictionary,
        y: &Vector<f64>,
        gamma: f64,
        x0: &Vector<f64>,
    ) -> Result<ApgdResult> {
        self.solve_with(
            dictionary.matrix(),
            y,
            gamma,
            dictionary.lipschitz(),
            dictionary.group_size(),
            x0,
        )
    }

    /// Solves with an explicit matrix, Lipschitz constant and group size.
    ///
    /// Iteration `k` (1-based):
    /// 1. `x⁺ = prox_{γ/L}(z − ∇f(z)/L)`
    /// 2. `t⁺ = (1 + √(1 + 4t²)) / 2`
    /// 3. `z⁺ = x⁺ + ((t − 1)/t⁺)(x⁺ − x)`
    /// 4. stop with `iterations = k` if ‖x⁺ − x‖₂ ≤ tol
    ///
    /// Without convergence the last iterate is returned with
    /// `iterations = max_iter + 1` and [`ConvergenceStatus::MaxIterations`].
    ///
    /// # Errors
    ///
    /// * [`SparseToneError::DegenerateDictionary`] if `lipschitz` is not a finite positive value
    /// * [`SparseToneError::InvalidHyperparameter`] for negative/NaN `gamma` or `tol`
    /// * [`SparseToneError::InvalidGroupSize`] if `group_size` does not divide `A.n_cols()`
    /// * [`SparseToneError::DimensionMismatch`] for incompatible `A`, `y`, `x0`
    pub fn solve_with(
        &self,
        a: &Matrix<f64>,
        y: &Vector<f64>,
        gamma: f64,
        lipschitz: f64,
        group_size: usize,
        x0: &Vector<f64>,
    ) -> Result<ApgdResult> {
        let start_time = std::time::Instant::now();
        self.validate(a, y, gamma, lipschitz, group_size, x0)?;

        let step = 1.0 / lipschitz;
        let threshold = gamma * step;

        let mut x = x0.clone();
        let mut z = x0.clone();
        let mut t = 1.0_f64;
        let mut last_step = None;

        for iter in 1..=self.max_iter {
            let grad = least_squares_gradient(a, &z, y)?;

            let mut x_next = z.add_scaled(-step, &grad);
            shrink_groups(x_next.as_mut_slice(), threshold, group_size);

            let t_next = (1.0 + (1.0 + 4.0 * t * t).sqrt()) / 2.0;
            let beta = (t - 1.0) / t_next;
            let z_next = x_next.add_scaled(beta, &x_next.sub(&x));

            let step_norm = x_next.distance(&x);
            tracing::trace!(iter, step_norm, t = t_next, "apgd iteration");

            if step_norm <= self.tol {
                tracing::debug!(iter, gamma, step_norm, "apgd converged");
                return Ok(ApgdResult {
                    solution: x_next,
                    iterations: iter,
                    status: ConvergenceStatus::Converged,
                    step_norm: Some(step_norm),
                    elapsed_time: start_time.elapsed(),
                });
            }

            x = x_next;
            z = z_next;
            t = t_next;
            last_step = Some(step_norm);
        }

        tracing::warn!(
            max_iter = self.max_iter,
            gamma,
            "apgd reached iteration cap without converging"
        );
        Ok(ApgdResult {
            solution: x,
            iterations: self.max_iter + 1,
            status: ConvergenceStatus::MaxIterations,
            step_norm: last_step,
            elapsed_time: start_time.elapsed(),
        })
    }

    fn validate(
        &self,
        a: &Matrix<f64>,
        y: &Vector<f64>,
        gamma: f64,
        lipschitz: f64,
        group_size: usize,
        x0: &Vector<f64>,
    ) -> Result<()> {
        if !lipschitz.is_finite() || lipschitz <= 0.0 {
            return Err(SparseToneError::DegenerateDictionary { lipschitz });
        }
        if !gamma.is_finite() || gamma < 0.0 {
            return Err(SparseToneError::invalid_hyperparameter(
                "gamma",
                gamma,
                "finite and >= 0",
            ));
        }
        if self.tol.is_nan() || self.tol < 0.0 {
            return Err(SparseToneError::invalid_hyperparameter(
                "apgd.tol", self.tol, ">= 0",
            ));
        }
        check_groups(a.n_cols(), group_size)?;
        if x0.len() != a.n_cols() {
            return Err(SparseToneError::dimension_mismatch(
                "coefficient length",
                a.n_cols(),
                x0.len(),
            ));
        }
        if y.len() != a.n_rows() {
            return Err(SparseToneError::dimension_mismatch(
                "signal length",
                a.n_rows(),
                y.len(),
            ));
        }
        Ok(())
    }
}

/// Outcome of one APGD run.
///
/// `iterations` doubles as the convergence flag: a value of `max_iter + 1`
/// means the cap was hit (`status == MaxIterations`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApgdResult {
    /// Final coefficient vector
    pub solution: Vector<f64>,
    /// Iteration at which the test passed, or `max_iter + 1`
    pub iterations: usize,
    /// Converged or MaxIterations
    pub status: ConvergenceStatus,
    /// ‖xₖ₊₁ − xₖ‖₂ at the last step; `None` if no step was taken
    pub step_norm: Option<f64>,
    /// Wall-clock time of the run
    pub elapsed_time: std::time::Duration,
}

impl ApgdResult {
    #[must_use]
    pub fn is_converged(&self) -> bool {
        self.status == ConvergenceStatus::Converged
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optim::gradient::residual_norm;

    fn identity_dict(n: usize) -> Dictionary {
        Dictionary::new(Matrix::eye(n), 2).expect("identity dictionary")
    }

    #[test]
    fn test_apgd_new() {
        let apgd = Apgd::new(500, 1e-8);
        assert_eq!(apgd.max_iter(), 500);
        assert!((apgd.tol() - 1e-8).abs() < 1e-20);
    }

    #[test]
    fn test_builder() {
        let apgd = Apgd::default().with_max_iter(7).with_tol(0.5);
        assert_eq!(apgd.max_iter, 7);
        assert!((apgd.tol - 0.5).abs() < 1e-15);
    }

    #[test]
    fn test_identity_recovers_sparse_groups() {
        let dict = identity_dict(6);
        let y = Vector::from_slice(&[0.0, 0.0, 1.5, -2.0, 0.0, 0.0]);
        let apgd = Apgd::new(100, 1e-10);

        let result = apgd
            .solve(&dict, &y, 1e-4, &Vector::zeros(6))
            .expect("shapes agree");

        assert!(result.is_converged());
        assert!(result.iterations <= 5, "took {}", result.iterations);
        assert!(result.solution.distance(&y) < 1e-3);
        assert_eq!(result.solution[0], 0.0);
        assert_eq!(result.solution[5], 0.0);
    }

    #[test]
    fn test_identity_matches_closed_form_prox() {
        // With A = I the minimiser is prox_γ(y).
        let dict = identity_dict(4);
        let y = Vector::from_slice(&[3.0, 4.0, 0.3, 0.4]);
        let result = Apgd::new(100, 1e-12)
            .solve(&dict, &y, 1.0, &Vector::zeros(4))
            .expect("shapes agree");
        let expected = [2.4, 3.2, 0.0, 0.0];
        for (got, want) in result.solution.iter().zip(expected) {
            assert!((got - want).abs() < 1e-9, "got {got}, want {want}");
        }
    }

    #[test]
    fn test_zero_max_iter_returns_x0_with_sentinel() {
        let dict = identity_dict(2);
        let y = Vector::from_slice(&[1.0, 1.0]);
        let x0 = Vector::from_slice(&[0.25, -0.5]);

        let result = Apgd::new(0, 1e-6)
            .solve(&dict, &y, 0.1, &x0)
            .expect("shapes agree");

        assert_eq!(result.iterations, 1);
        assert_eq!(result.status, ConvergenceStatus::MaxIterations);
        assert_eq!(result.solution, x0);
    }

    #[test]
    fn test_cap_reports_max_iter_plus_one() {
        // Ill-conditioned 2x2: tight tolerance cannot be met in 3 steps.
        let a = Matrix::from_vec(2, 2, vec![1.0, 0.99, 0.99, 1.0]).expect("2x2");
        let dict = Dictionary::new(a, 1).expect("valid dictionary");
        let y = Vector::from_slice(&[1.0, -1.0]);

        let result = Apgd::new(3, 1e-14)
            .solve(&dict, &y, 0.0, &Vector::zeros(2))
            .expect("shapes agree");

        assert_eq!(result.iterations, 4);
        assert!(!result.is_converged());
    }

    #[test]
    fn test_large_gamma_gives_zero() {
        let dict = identity_dict(4);
        let y = Vector::from_slice(&[0.1, 0.2, -0.3, 0.1]);
        let result = Apgd::default()
            .solve(&dict, &y, 10.0, &Vector::zeros(4))
            .expect("shapes agree");
        assert!(result.solution.iter().all(|&c| c == 0.0));
        let r = residual_norm(dict.matrix(), &result.solution, &y).expect("shapes agree");
        assert!((r - y.norm()).abs() < 1e-12);
    }

    #[test]
    fn test_deterministic() {
        let a = Matrix::from_vec(3, 4, vec![1.0, 0.5, 0.0, 0.2, 0.0, 1.0, 0.3, 0.0, 0.4, 0.0, 1.0, 0.7])
            .expect("3x4");
        let dict = Dictionary::new(a, 2).expect("valid dictionary");
        let y = Vector::from_slice(&[1.0, -0.5, 0.25]);
        let apgd = Apgd::new(2000, 1e-9);
        let first = apgd.solve(&dict, &y, 0.05, &Vector::zeros(4)).expect("ok");
        let second = apgd.solve(&dict, &y, 0.05, &Vector::zeros(4)).expect("ok");
        assert_eq!(first.solution, second.solution);
        assert_eq!(first.iterations, second.iterations);
    }

    #[test]
    fn test_negative_gamma_rejected() {
        let dict = identity_dict(2);
        let err = Apgd::default()
            .solve(&dict, &Vector::zeros(2), -1.0, &Vector::zeros(2))
            .expect_err("negative gamma");
        assert!(matches!(err, SparseToneError::InvalidHyperparameter { .. }));
    }

    #[test]
    fn test_zero_lipschitz_rejected() {
        let err = Apgd::default()
            .solve_with(
                &Matrix::eye(2),
                &Vector::zeros(2),
                0.1,
                0.0,
                2,
                &Vector::zeros(2),
            )
            .expect_err("L = 0");
        assert!(matches!(err, SparseToneError::DegenerateDictionary { .. }));
    }

    #[test]
    fn test_shape_mismatch_rejected() {
        let dict = identity_dict(4);
        let bad_x0 = Apgd::default().solve(&dict, &Vector::zeros(4), 0.1, &Vector::zeros(2));
        assert!(matches!(
            bad_x0,
            Err(SparseToneError::DimensionMismatch { .. })
        ));
        let bad_y = Apgd::default().solve(&dict, &Vector::zeros(3), 0.1, &Vector::zeros(4));
        assert!(matches!(bad_y, Err(SparseToneError::DimensionMismatch { .. })));
    }
}

//! Residual-targeted group lasso (LSCGNM).
//!
//! Finds the regularization weight γ whose APGD solution has residual
//! ‖Ax − y‖₂ ≈ σ, relying on the residual being non-decreasing in γ:
//!
//! 1. σ ≥ ‖y‖₂: the zero vector already satisfies the bound (γ = +∞).
//! 2. Solve at a negligible γ₀ to get the best achievable residual σ₀;
//!    σ < σ₀ is infeasible (γ = −1).
//! 3. Double γ from `initial_upper` until the residual exceeds σ.
//! 4. Bisect [0, γ_u] until the bracket is no wider than `tol`.
//!
//! Both search loops carry hard caps and fail with
//! [`SparseToneError::SearchExhausted`] instead of spinning forever.

use serde::{Deserialize, Serialize};

use crate::dictionary::Dictionary;
use crate::error::{Result, SparseToneError};
use crate::primitives::Vector;

use super::apgd::{Apgd, ApgdResult};
use super::gradient::residual_norm;

/// Bisection-tuned constrained solver settings.
///
/// # Example
///
/// ```
/// use sparsetone::dictionary::Dictionary;
/// use sparsetone::optim::{ConstrainedSolution, Lscgnm};
/// use sparsetone::primitives::{Matrix, Vector};
///
/// let dict = Dictionary::new(Matrix::eye(2), 2).expect("identity dictionary");
/// let y = Vector::from_slice(&[3.0, 4.0]);
///
/// // Any sigma >= ‖y‖ is met by the zero vector.
/// let result = Lscgnm::default().solve(&dict, &y, 5.0, &Vector::zeros(2)).expect("valid input");
/// assert!(matches!(result, ConstrainedSolution::Trivial { .. }));
/// assert_eq!(result.gamma(), f64::INFINITY);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Lscgnm {
    /// Inner solver used for every γ trial
    pub(crate) apgd: Apgd,
    /// Negligible γ used for the baseline residual σ₀
    pub(crate) gamma0: f64,
    /// Bracket width at which bisection stops
    pub(crate) tol: f64,
    /// First upper-bound candidate for γ
    pub(crate) initial_upper: f64,
    /// Cap on bracket doublings
    pub(crate) max_doublings: usize,
    /// Cap on bisection steps
    pub(crate) max_bisections: usize,
    /// Start each γ trial from the previous trial's solution
    pub(crate) warm_start: bool,
}

impl Default for Lscgnm {
    fn default() -> Self {
        Self {
            apgd: Apgd::default(),
            gamma0: 1e-6,
            tol: 1e-4,
            initial_upper: 1.0,
            max_doublings: 64,
            max_bisections: 200,
            warm_start: false,
        }
    }
}

impl Lscgnm {
    /// Creates a solver with the given inner APGD settings and bracket tolerance.
    #[must_use]
    pub fn new(apgd: Apgd, tol: f64) -> Self {
        Self {
            apgd,
            tol,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_apgd(mut self, apgd: Apgd) -> Self {
        self.apgd = apgd;
        self
    }

    #[must_use]
    pub fn with_tol(mut self, tol: f64) -> Self {
        self.tol = tol;
        self
    }

    #[must_use]
    pub fn with_gamma0(mut self, gamma0: f64) -> Self {
        self.gamma0 = gamma0;
        self
    }

    #[must_use]
    pub fn with_initial_upper(mut self, initial_upper: f64) -> Self {
        self.initial_upper = initial_upper;
        self
    }

    #[must_use]
    pub fn with_max_doublings(mut self, max_doublings: usize) -> Self {
        self.max_doublings = max_doublings;
        self
    }

    #[must_use]
    pub fn with_max_bisections(mut self, max_bisections: usize) -> Self {
        self.max_bisections = max_bisections;
        self
    }

    /// Reuse the previous γ trial's solution as the next starting point.
    ///
    /// Changes iteration counts only; the search path is the same.
    #[must_use]
    pub fn with_warm_start(mut self, warm_start: bool) -> Self {
        self.warm_start = warm_start;
        self
    }

    #[must_use]
    pub fn apgd(&self) -> &Apgd {
        &self.apgd
    }

    #[must_use]
    pub fn tol(&self) -> f64 {
        self.tol
    }

    /// Tunes γ so the APGD solution's residual ‖Ax − y‖₂ lands on `sigma`.
    ///
    /// For a [`ConstrainedSolution::Tuned`] result, `solution` and `residual`
    /// come from the last bisection trial and `gamma` is the midpoint of the
    /// final bracket, so the two differ by at most half the bracket width
    /// (≤ `tol`). When that last trial lowered the upper bound, `residual` can
    /// sit slightly above `sigma`.
    ///
    /// # Arguments
    ///
    /// * `dictionary` - Dictionary with cached Lipschitz constant
    /// * `y` - Signal block
    /// * `sigma` - Target residual
    /// * `x0` - Starting iterate for every APGD trial (or the first, with warm start)
    ///
    /// # Errors
    ///
    /// * [`SparseToneError::InvalidHyperparameter`] for a negative/NaN `sigma` or bad settings
    /// * [`SparseToneError::DimensionMismatch`] for incompatible shapes
    /// * [`SparseToneError::SearchExhausted`] if doubling or bisection hits its cap
    pub fn solve(
        &self,
        dictionary: &Dictionary,
        y: &Vector<f64>,
        sigma: f64,
        x0: &Vector<f64>,
    ) -> Result<ConstrainedSolution> {
        self.validate(dictionary, y, sigma, x0)?;

        let y_norm = y.norm();
        if sigma >= y_norm {
            tracing::debug!(sigma, y_norm, "target met by zero vector");
            return Ok(ConstrainedSolution::Trivial {
                solution: Vector::zeros(dictionary.n_coefficients()),
            });
        }

        let (baseline, sigma0) = self.trial(dictionary, y, self.gamma0, x0)?;
        if sigma < sigma0 {
            tracing::debug!(sigma, sigma0, "target below best achievable residual");
            return Ok(ConstrainedSolution::Infeasible {
                baseline_residual: sigma0,
            });
        }

        let mut start = if self.warm_start {
            baseline.solution
        } else {
            x0.clone()
        };

        // Bracket: find γ_u with residual(γ_u) > σ.
        let mut gamma_u = self.initial_upper;
        let mut doublings = 0;
        loop {
            let (trial, residual) = self.trial(dictionary, y, gamma_u, &start)?;
            tracing::trace!(gamma_u, residual, "bracket trial");
            if residual > sigma {
                break;
            }
            if self.warm_start {
                start = trial.solution;
            }
            doublings += 1;
            if doublings >= self.max_doublings {
                tracing::warn!(gamma_u, doublings, "bracket search exhausted");
                return Err(SparseToneError::SearchExhausted {
                    phase: "bracket",
                    steps: doublings,
                    gamma: gamma_u,
                });
            }
            gamma_u *= 2.0;
        }

        // Bisect [γ_l, γ_u]; γ_l = 0 has residual σ₀ ≤ σ.
        let mut gamma_l = 0.0;
        let mut last: Option<(Vector<f64>, f64)> = None;
        let mut steps = 0;
        while gamma_u - gamma_l > self.tol {
            if steps >= self.max_bisections {
                tracing::warn!(gamma_l, gamma_u, steps, "bisection exhausted");
                return Err(SparseToneError::SearchExhausted {
                    phase: "bisection",
                    steps,
                    gamma: 0.5 * (gamma_l + gamma_u),
                });
            }
            let mid = 0.5 * (gamma_l + gamma_u);
            let (trial, residual) = self.trial(dictionary, y, mid, &start)?;
            tracing::trace!(gamma = mid, residual, "bisection trial");
            if residual < sigma {
                gamma_l = mid;
            } else {
                gamma_u = mid;
            }
            if self.warm_start {
                start = trial.solution.clone();
            }
            last = Some((trial.solution, residual));
            steps += 1;
        }

        let gamma = 0.5 * (gamma_l + gamma_u);
        let (solution, residual) = match last {
            Some(found) => found,
            None => {
                let (trial, residual) = self.trial(dictionary, y, gamma, &start)?;
                (trial.solution, residual)
            }
        };
        tracing::debug!(sigma, gamma, residual, doublings, steps, "lscgnm resolved");

        Ok(ConstrainedSolution::Tuned {
            solution,
            gamma,
            residual,
        })
    }

    /// One APGD solve plus its residual.
    fn trial(
        &self,
        dictionary: &Dictionary,
        y: &Vector<f64>,
        gamma: f64,
        x0: &Vector<f64>,
    ) -> Result<(ApgdResult, f64)> {
        let result = self.apgd.solve(dictionary, y, gamma, x0)?;
        let residual = residual_norm(dictionary.matrix(), &result.solution, y)?;
        Ok((result, residual))
    }

    fn validate(
        &self,
        dictionary: &Dictionary,
        y: &Vector<f64>,
        sigma: f64,
        x0: &Vector<f64>,
    ) -> Result<()> {
        if sigma.is_nan() || sigma < 0.0 {
            return Err(SparseToneError::invalid_hyperparameter("sigma", sigma, ">= 0"));
        }
        if !self.tol.is_finite() || self.tol <= 0.0 {
            return Err(SparseToneError::invalid_hyperparameter(
                "lscgnm.tol",
                self.tol,
                "finite and > 0",
            ));
        }
        if !self.gamma0.is_finite() || self.gamma0 < 0.0 {
            return Err(SparseToneError::invalid_hyperparameter(
                "gamma0",
                self.gamma0,
                "finite and >= 0",
            ));
        }
        if !self.initial_upper.is_finite() || self.initial_upper <= 0.0 {
            return Err(SparseToneError::invalid_hyperparameter(
                "initial_upper",
                self.initial_upper,
                "finite and > 0",
            ));
        }
        if y.len() != dictionary.block_length() {
            return Err(SparseToneError::dimension_mismatch(
                "signal length",
                dictionary.block_length(),
                y.len(),
            ));
        }
        if x0.len() != dictionary.n_coefficients() {
            return Err(SparseToneError::dimension_mismatch(
                "coefficient length",
                dictionary.n_coefficients(),
                x0.len(),
            ));
        }
        Ok(())
    }
}

/// Outcome of a residual-targeted solve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConstrainedSolution {
    /// σ is below the best achievable residual; no γ ≥ 0 meets it.
    Infeasible {
        /// Residual at the negligible γ₀
        baseline_residual: f64,
    },
    /// σ ≥ ‖y‖₂; the zero vector meets it without any finite γ.
    Trivial {
        /// The zero coefficient vector
        solution: Vector<f64>,
    },
    /// Bisection converged on γ.
    Tuned {
        /// Coefficients from the last bisection midpoint
        solution: Vector<f64>,
        /// Midpoint of the final bracket, within `tol / 2` of the γ that produced `solution`
        gamma: f64,
        /// ‖Ax − y‖₂ of `solution`
        residual: f64,
    },
}

impl ConstrainedSolution {
    /// Resolved γ: −1 for infeasible, +∞ for trivial.
    #[must_use]
    pub fn gamma(&self) -> f64 {
        match self {
            Self::Infeasible { .. } => -1.0,
            Self::Trivial { .. } => f64::INFINITY,
            Self::Tuned { gamma, .. } => *gamma,
        }
    }

    /// Coefficient vector, `None` when infeasible.
    #[must_use]
    pub fn solution(&self) -> Option<&Vector<f64>> {
        match self {
            Self::Infeasible { .. } => None,
            Self::Trivial { solution } | Self::Tuned { solution, .. } => Some(solution),
        }
    }

    #[must_use]
    pub fn is_feasible(&self) -> bool {
        !matches!(self, Self::Infeasible { .. })
    }

    /// Splits into `(coefficients, gamma)`.
    #[must_use]
    pub fn into_parts(self) -> (Option<Vector<f64>>, f64) {
        let gamma = self.gamma();
        match self {
            Self::Infeasible { .. } => (None, gamma),
            Self::Trivial { solution } | Self::Tuned { solution, .. } => (Some(solution), gamma),
        }
    }
}

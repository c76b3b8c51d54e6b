//! Block driver: solves a sequence of independent signal blocks.
//!
//! Every block is solved from the zero iterate against the same shared
//! [`Dictionary`]; there is no state carried between blocks, so the
//! optional parallel mode (rayon) gives each worker its own solver state
//! and produces the same results as the sequential loop.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::dictionary::Dictionary;
use crate::error::{Result, SparseToneError};
use crate::optim::{Apgd, ApgdResult, ConstrainedSolution, Lscgnm};
use crate::primitives::Vector;

/// How each block is regularized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolveMode {
    /// Fixed γ, one APGD solve per block.
    Penalized {
        /// Regularization weight
        gamma: f64,
    },
    /// Residual-targeted; one LSCGNM solve per block per σ.
    Constrained {
        /// Target residuals, swept in order
        sigmas: Vec<f64>,
    },
}

impl Default for SolveMode {
    fn default() -> Self {
        Self::Penalized { gamma: 0.1 }
    }
}

/// One σ from a constrained sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SigmaSolution {
    /// Requested residual bound
    pub sigma: f64,
    /// Outcome for that bound
    pub solution: ConstrainedSolution,
}

/// Per-block output.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockSolution {
    /// Fixed-γ result
    Penalized(ApgdResult),
    /// One entry per requested σ
    Constrained(Vec<SigmaSolution>),
}

impl BlockSolution {
    /// Coefficient vectors in output order; `None` marks an infeasible σ.
    #[must_use]
    pub fn coefficients(&self) -> Vec<Option<&Vector<f64>>> {
        match self {
            Self::Penalized(result) => vec![Some(&result.solution)],
            Self::Constrained(sweep) => sweep.iter().map(|s| s.solution.solution()).collect(),
        }
    }
}

/// Runs the configured solver over many blocks.
///
/// # Example
///
/// ```
/// use sparsetone::dictionary::Dictionary;
/// use sparsetone::driver::{BlockDriver, SolveMode};
/// use sparsetone::primitives::Vector;
///
/// let dict = Dictionary::tonal(&[100.0, 200.0], 1000.0, 10).expect("valid parameters");
/// let tone: Vec<f64> = (0..10)
///     .map(|j| (2.0 * std::f64::consts::PI * 100.0 * j as f64 / 1000.0).cos())
///     .collect();
/// let blocks = vec![Vector::from_vec(tone), Vector::zeros(10)];
///
/// let driver = BlockDriver::new(&dict, SolveMode::Penalized { gamma: 1e-3 });
/// let solutions = driver.solve_blocks(&blocks).expect("blocks match dictionary");
/// assert_eq!(solutions.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct BlockDriver<'a> {
    dictionary: &'a Dictionary,
    mode: SolveMode,
    solver: Lscgnm,
    parallel: bool,
}

impl<'a> BlockDriver<'a> {
    #[must_use]
    pub fn new(dictionary: &'a Dictionary, mode: SolveMode) -> Self {
        Self {
            dictionary,
            mode,
            solver: Lscgnm::default(),
            parallel: false,
        }
    }

    /// Sets the APGD settings used in both modes.
    #[must_use]
    pub fn with_apgd(mut self, apgd: Apgd) -> Self {
        self.solver = self.solver.with_apgd(apgd);
        self
    }

    /// Sets the LSCGNM settings (including its inner APGD settings).
    #[must_use]
    pub fn with_lscgnm(mut self, solver: Lscgnm) -> Self {
        self.solver = solver;
        self
    }

    /// Solve blocks on the rayon thread pool.
    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    #[must_use]
    pub fn mode(&self) -> &SolveMode {
        &self.mode
    }

    /// Solves every block, preserving input order.
    ///
    /// # Errors
    ///
    /// The first error from any block (shape mismatch, invalid settings,
    /// exhausted search).
    pub fn solve_blocks(&self, blocks: &[Vector<f64>]) -> Result<Vec<BlockSolution>> {
        tracing::debug!(
            blocks = blocks.len(),
            parallel = self.parallel,
            "solving blocks"
        );
        if self.parallel {
            blocks
                .par_iter()
                .enumerate()
                .map(|(index, block)| self.solve_indexed(index, block))
                .collect()
        } else {
            blocks
                .iter()
                .enumerate()
                .map(|(index, block)| self.solve_indexed(index, block))
                .collect()
        }
    }

    /// Solves a single block from the zero iterate.
    ///
    /// # Errors
    ///
    /// See [`BlockDriver::solve_blocks`].
    pub fn solve_block(&self, block: &Vector<f64>) -> Result<BlockSolution> {
        if block.len() != self.dictionary.block_length() {
            return Err(SparseToneError::dimension_mismatch(
                "block length",
                self.dictionary.block_length(),
                block.len(),
            ));
        }
        let x0 = Vector::zeros(self.dictionary.n_coefficients());

        match &self.mode {
            SolveMode::Penalized { gamma } => {
                let result = self.solver.apgd().solve(self.dictionary, block, *gamma, &x0)?;
                Ok(BlockSolution::Penalized(result))
            }
            SolveMode::Constrained { sigmas } => {
                let sweep = sigmas
                    .iter()
                    .map(|&sigma| {
                        let solution = self.solver.solve(self.dictionary, block, sigma, &x0)?;
                        Ok(SigmaSolution { sigma, solution })
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok(BlockSolution::Constrained(sweep))
            }
        }
    }

    fn solve_indexed(&self, index: usize, block: &Vector<f64>) -> Result<BlockSolution> {
        let solution = self.solve_block(block).map_err(|e| {
            tracing::warn!(block = index, error = %e, "block failed");
            e
        })?;
        tracing::trace!(block = index, "block solved");
        Ok(solution)
    }
}

//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use sparsetone::prelude::*;
//! ```

pub use crate::config::{DictionaryConfig, RunConfig};
pub use crate::dictionary::{piano_frequencies, Dictionary};
pub use crate::driver::{BlockDriver, BlockSolution, SigmaSolution, SolveMode};
pub use crate::error::{Result, SparseToneError};
pub use crate::optim::{Apgd, ApgdResult, ConstrainedSolution, ConvergenceStatus, Lscgnm};
pub use crate::primitives::{Matrix, Vector};
pub use crate::spectrogram::{atom_magnitudes, ActivityMap};

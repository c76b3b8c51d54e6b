//! Sparsetone: block-wise group-sparse decomposition of audio signals.
//!
//! Each signal block `y` is explained as `y ≈ Ax` over a tonal dictionary
//! `A` whose columns come in cosine/sine pairs, one pair per frequency. The
//! coefficients are found by solving the group lasso
//!
//! ```text
//! minimize  ½‖Ax − y‖² + γ Σ_g ‖x_g‖₂
//! ```
//!
//! with APGD, either at a fixed γ or with γ tuned by bisection so that the
//! residual ‖Ax − y‖₂ lands on a target σ (LSCGNM).
//!
//! # Quick Start
//!
//! ```
//! use sparsetone::prelude::*;
//! use std::f64::consts::PI;
//!
//! let dict = Dictionary::tonal(&[100.0, 200.0], 1000.0, 10).expect("valid parameters");
//! let y: Vector<f64> = (0..10)
//!     .map(|j| (2.0 * PI * 100.0 * j as f64 / 1000.0).cos())
//!     .collect::<Vec<_>>()
//!     .into();
//!
//! let result = Apgd::new(10_000, 1e-8)
//!     .solve(&dict, &y, 1e-3, &Vector::zeros(4))
//!     .expect("shapes agree");
//!
//! let magnitudes = atom_magnitudes(&result.solution, 2).expect("pairs");
//! assert!((magnitudes[0] - 1.0).abs() < 1e-3);
//! assert!(magnitudes[1] < 1e-6);
//! ```
//!
//! # Modules
//!
//! - [`primitives`]: Core Vector and Matrix types
//! - [`dictionary`]: Tonal and piano dictionaries with cached Lipschitz constant
//! - [`optim`]: Gradient, group prox, APGD and LSCGNM
//! - [`driver`]: Solves many blocks, sequentially or on the rayon pool
//! - [`spectrogram`]: Per-atom magnitudes and activity maps
//! - [`config`]: JSON run configuration
//! - [`error`]: Error type and `Result` alias

pub mod config;
pub mod dictionary;
pub mod driver;
pub mod error;
pub mod optim;
pub mod prelude;
pub mod primitives;
pub mod spectrogram;

pub use error::{Result, SparseToneError};
pub use primitives::{Matrix, Vector};

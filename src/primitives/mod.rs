//! Core compute primitives (Vector, Matrix).
//!
//! Dense, row-major containers with the handful of `f64` kernels the
//! solvers need (`matvec`, `tmatvec`, norms, scaled adds).

mod matrix;
mod vector;

pub use matrix::Matrix;
pub use vector::Vector;

//! Small numerical building blocks.
//!
//! These are the pieces the g-function solvers are assembled from:
//!
//! - [`solve_tridiagonal`]: Thomas algorithm for banded systems
//! - [`simpson_weights`]: composite Simpson's rule weights
//! - [`sigmoid`]: logistic blending between two correlations
//! - [`LinearTable`]: one-dimensional linear interpolation table

mod interpolation;
mod simpson;
mod smoothing;
mod tridiagonal;

pub use interpolation::{LinearTable, TableError};
pub use simpson::simpson_weights;
pub use smoothing::sigmoid;
pub use tridiagonal::solve_tridiagonal;

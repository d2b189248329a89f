//! # tailrisk-math
//!
//! Numerical utilities for the Tailrisk risk library.
//!
//! This crate provides:
//!
//! - **Statistics**: means, sample variance, moments, empirical quantiles
//!   with linear interpolation
//! - **Distributions**: validated normal pdf/cdf/inverse-cdf wrappers
//! - **Linear Algebra**: Cholesky factorization and quadratic forms on
//!   nalgebra matrices
//!
//! ## Design Philosophy
//!
//! - **Numerical Stability**: degenerate inputs surface as typed errors,
//!   never NaN propagation
//! - **Pure functions**: no hidden state, no global configuration

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_precision_loss)]

pub mod distributions;
pub mod error;
pub mod linear_algebra;
pub mod statistics;

pub use error::{MathError, MathResult};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::distributions::{normal_cdf, normal_inverse_cdf, normal_pdf};
    pub use crate::error::{MathError, MathResult};
    pub use crate::linear_algebra::{cholesky_factor, quadratic_form};
    pub use crate::statistics::{mean, quantile, sample_moments, sample_std, sample_variance};
}

//! Normal distribution helpers.
//!
//! Thin wrappers over `statrs` so callers get validated inputs and
//! `MathError` instead of panics. The inverse CDF is statrs' rational
//! approximation, accurate across the full `(0, 1)` range rather than a
//! two-entry z-score table.

use statrs::distribution::{ContinuousCDF, Normal};

use crate::error::{MathError, MathResult};

const INV_SQRT_2PI: f64 = 0.398_942_280_401_432_7;

fn standard_normal() -> MathResult<Normal> {
    Normal::new(0.0, 1.0)
        .map_err(|err| MathError::invalid_input(format!("standard normal: {err}")))
}

/// Standard normal probability density at `x`.
#[must_use]
pub fn normal_pdf(x: f64) -> f64 {
    INV_SQRT_2PI * (-0.5 * x * x).exp()
}

/// Standard normal cumulative distribution at `x`.
///
/// # Errors
///
/// Propagates a distribution-construction failure (cannot happen for the
/// standard normal, but the error path is kept honest).
pub fn normal_cdf(x: f64) -> MathResult<f64> {
    Ok(standard_normal()?.cdf(x))
}

/// Standard normal inverse CDF (quantile function).
///
/// # Errors
///
/// Returns an error unless `p` lies strictly inside `(0, 1)`.
pub fn normal_inverse_cdf(p: f64) -> MathResult<f64> {
    if p <= 0.0 || p >= 1.0 {
        return Err(MathError::invalid_input(format!(
            "normal quantile probability must be in (0, 1), got {p}"
        )));
    }
    Ok(standard_normal()?.inverse_cdf(p))
}

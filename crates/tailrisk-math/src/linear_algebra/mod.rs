//! Linear algebra utilities.
//!
//! Matrix operations needed by the covariance engine and the Monte Carlo
//! simulator, built on nalgebra.

use nalgebra::{DMatrix, DVector};

use crate::error::{MathError, MathResult};

/// Computes the lower-triangular Cholesky factor `L` with `A = L·Lᵀ`.
///
/// The input must be square and positive definite; a positive
/// semi-definite matrix with a zero eigenvalue (e.g. from duplicated or
/// perfectly collinear assets) fails factorization.
///
/// # Errors
///
/// Returns `NotPositiveDefinite` when factorization fails, or a dimension
/// error for a non-square input.
pub fn cholesky_factor(matrix: &DMatrix<f64>) -> MathResult<DMatrix<f64>> {
    if matrix.nrows() != matrix.ncols() {
        return Err(MathError::DimensionMismatch {
            rows1: matrix.nrows(),
            cols1: matrix.ncols(),
            rows2: matrix.ncols(),
            cols2: matrix.ncols(),
        });
    }

    matrix
        .clone()
        .cholesky()
        .map(|c| c.l())
        .ok_or(MathError::NotPositiveDefinite)
}

/// Evaluates the quadratic form `wᵀ·A·w`.
///
/// # Errors
///
/// Returns a dimension error when `w` does not match `A`.
pub fn quadratic_form(weights: &DVector<f64>, matrix: &DMatrix<f64>) -> MathResult<f64> {
    if matrix.nrows() != matrix.ncols() || matrix.nrows() != weights.len() {
        return Err(MathError::DimensionMismatch {
            rows1: matrix.nrows(),
            cols1: matrix.ncols(),
            rows2: weights.len(),
            cols2: 1,
        });
    }

    Ok((weights.transpose() * matrix * weights)[(0, 0)])
}

//! Covariance and correlation estimation.
//!
//! Two estimators over an aligned return history: the standard unbiased
//! sample covariance, and the RiskMetrics-style EWMA covariance
//! `Σ_t = λ·Σ_{t-1} + (1-λ)·r_t·r_tᵀ` seeded with the sample covariance.
//! Both are validated positive definite before use, so duplicated or
//! perfectly collinear assets are rejected here rather than producing NaN
//! downstream.

use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

use tailrisk_core::ReturnSeries;
use tailrisk_math::linear_algebra::{cholesky_factor, quadratic_form};

use crate::error::{RiskError, RiskResult};

/// Default EWMA decay parameter (RiskMetrics convention).
pub const DEFAULT_EWMA_LAMBDA: f64 = 0.94;

/// Which estimator produced a covariance matrix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum CovarianceEstimator {
    /// Unbiased sample covariance over the full history.
    Sample,
    /// Exponentially weighted moving average covariance.
    Ewma {
        /// Decay parameter λ in (0, 1); larger means longer memory.
        lambda: f64,
    },
}

/// A validated positive-definite covariance matrix over assets.
///
/// Entries are in per-period (daily) units; horizon scaling happens in the
/// VaR methods, not here.
#[derive(Debug, Clone, PartialEq)]
pub struct CovarianceMatrix {
    matrix: DMatrix<f64>,
    estimator: CovarianceEstimator,
}

impl CovarianceMatrix {
    /// Estimates the unbiased sample covariance of a return history.
    ///
    /// # Errors
    ///
    /// Returns `InsufficientData` when fewer than `N + 1` periods are
    /// supplied for `N` assets (the estimate would be rank deficient), and
    /// `NumericalInstability` when the estimate is not positive definite
    /// (e.g. duplicated assets).
    pub fn sample(series: &ReturnSeries) -> RiskResult<Self> {
        let t = series.num_periods();
        let n = series.num_assets();
        if t < n + 1 {
            return Err(RiskError::insufficient_data(n + 1, t));
        }

        let means = series.mean_returns();
        let mut centered = series.matrix().clone();
        for j in 0..n {
            for i in 0..t {
                centered[(i, j)] -= means[j];
            }
        }

        let matrix = (centered.transpose() * &centered) / (t as f64 - 1.0);
        Self::validated(matrix, CovarianceEstimator::Sample)
    }

    /// Estimates the EWMA covariance of a return history.
    ///
    /// The recursion runs chronologically over the full history with the
    /// sample covariance as seed, so the most recent observation carries
    /// weight `1 - λ`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` for λ outside (0, 1), plus the sample
    /// estimator's errors (the seed is a sample covariance).
    pub fn ewma(series: &ReturnSeries, lambda: f64) -> RiskResult<Self> {
        if !(0.0..1.0).contains(&lambda) || lambda == 0.0 {
            return Err(RiskError::invalid_parameter(format!(
                "EWMA decay must be in (0, 1), got {lambda}"
            )));
        }

        let seed = Self::sample(series)?;
        let mut matrix = seed.matrix;

        for t in 0..series.num_periods() {
            let r = series.matrix().row(t).transpose();
            matrix = matrix * lambda + (&r * r.transpose()) * (1.0 - lambda);
        }

        Self::validated(matrix, CovarianceEstimator::Ewma { lambda })
    }

    fn validated(matrix: DMatrix<f64>, estimator: CovarianceEstimator) -> RiskResult<Self> {
        if matrix.diagonal().iter().any(|v| *v < 0.0) {
            return Err(RiskError::numerical_instability(
                "covariance matrix has a negative variance on its diagonal",
            ));
        }
        cholesky_factor(&matrix).map_err(|_| {
            RiskError::numerical_instability(
                "covariance matrix is not positive definite; check for duplicated or perfectly collinear assets",
            )
        })?;

        Ok(Self { matrix, estimator })
    }

    /// The underlying `N x N` matrix, in per-period units.
    #[must_use]
    pub fn matrix(&self) -> &DMatrix<f64> {
        &self.matrix
    }

    /// Which estimator produced this matrix.
    #[must_use]
    pub fn estimator(&self) -> CovarianceEstimator {
        self.estimator
    }

    /// Number of assets covered.
    #[must_use]
    pub fn num_assets(&self) -> usize {
        self.matrix.nrows()
    }

    /// Per-asset volatilities (square roots of the diagonal).
    #[must_use]
    pub fn volatilities(&self) -> Vec<f64> {
        self.matrix.diagonal().iter().map(|v| v.sqrt()).collect()
    }

    /// Portfolio variance `wᵀ·Σ·w` for a weight vector.
    ///
    /// # Errors
    ///
    /// Returns an error when the weight count does not match.
    pub fn portfolio_variance(&self, weights: &[f64]) -> RiskResult<f64> {
        let w = DVector::from_row_slice(weights);
        Ok(quadratic_form(&w, &self.matrix)?)
    }

    /// Derives the correlation matrix.
    ///
    /// The diagonal is exactly 1.0 by construction and off-diagonal
    /// entries are clamped into `[-1, 1]` against rounding.
    ///
    /// # Errors
    ///
    /// Returns `NumericalInstability` when any asset has zero variance.
    pub fn correlation(&self) -> RiskResult<DMatrix<f64>> {
        let vols = self.volatilities();
        if vols.iter().any(|v| *v < f64::EPSILON) {
            return Err(RiskError::numerical_instability(
                "cannot derive correlations for a zero-variance asset",
            ));
        }

        let n = self.num_assets();
        Ok(DMatrix::from_fn(n, n, |i, j| {
            if i == j {
                1.0
            } else {
                (self.matrix[(i, j)] / (vols[i] * vols[j])).clamp(-1.0, 1.0)
            }
        }))
    }
}

//! Error types for portfolio aggregation.

use thiserror::Error;

use tailrisk_core::CoreError;
use tailrisk_math::MathError;

/// Result type for portfolio operations.
pub type PortfolioResult<T> = Result<T, PortfolioError>;

/// Errors that can occur during portfolio aggregation.
#[derive(Error, Debug, Clone)]
pub enum PortfolioError {
    /// Weight vector does not match the return history.
    #[error("weights and assets disagree: {weights} weights for {assets} assets")]
    WeightMismatch {
        /// Number of weights supplied.
        weights: usize,
        /// Number of assets in the history.
        assets: usize,
    },

    /// A weighting scheme was asked for data it was not given.
    #[error("weighting scheme {scheme} requires {missing}")]
    MissingWeightInput {
        /// The scheme that could not be resolved.
        scheme: String,
        /// What was missing.
        missing: String,
    },

    /// Core type construction failed.
    #[error("core error: {0}")]
    Core(#[from] CoreError),

    /// Numerical computation failed.
    #[error("math error: {0}")]
    Math(#[from] MathError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PortfolioError::WeightMismatch {
            weights: 2,
            assets: 3,
        };
        assert!(err.to_string().contains("2 weights for 3 assets"));
    }

    #[test]
    fn test_from_math_error() {
        let err: PortfolioError = MathError::insufficient_data(2, 1).into();
        assert!(err.to_string().contains("insufficient data"));
    }
}

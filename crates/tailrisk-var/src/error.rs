//! Error types for risk calculations.

use thiserror::Error;

use tailrisk_core::CoreError;
use tailrisk_math::MathError;

/// A specialized Result type for risk calculations.
pub type RiskResult<T> = Result<T, RiskError>;

/// Errors that can occur during risk calculations.
///
/// Validation failures are reported at each method's boundary before any
/// work happens; numerical failures inside a simulation batch surface only
/// after the batch-level minimum-valid-sample check.
#[derive(Error, Debug, Clone)]
pub enum RiskError {
    /// An input parameter is outside its valid range.
    #[error("invalid parameter: {reason}")]
    InvalidParameter {
        /// Description of the offending parameter.
        reason: String,
    },

    /// Too few periods for the requested estimator.
    #[error("insufficient data: need at least {required} periods, got {actual}")]
    InsufficientData {
        /// Minimum required periods.
        required: usize,
        /// Actual number of periods.
        actual: usize,
    },

    /// A matrix operation failed in a way that indicates degenerate input,
    /// e.g. a covariance matrix that is not positive semi-definite.
    #[error("numerical instability: {reason}")]
    NumericalInstability {
        /// Description of the failure.
        reason: String,
    },

    /// Simulation parameters produced an empty or degenerate sample set.
    #[error("simulation error: {reason}")]
    Simulation {
        /// Description of the failure.
        reason: String,
    },
}

impl RiskError {
    /// Creates an invalid parameter error.
    #[must_use]
    pub fn invalid_parameter(reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            reason: reason.into(),
        }
    }

    /// Creates an insufficient data error.
    #[must_use]
    pub fn insufficient_data(required: usize, actual: usize) -> Self {
        Self::InsufficientData { required, actual }
    }

    /// Creates a numerical instability error.
    #[must_use]
    pub fn numerical_instability(reason: impl Into<String>) -> Self {
        Self::NumericalInstability {
            reason: reason.into(),
        }
    }

    /// Creates a simulation error.
    #[must_use]
    pub fn simulation(reason: impl Into<String>) -> Self {
        Self::Simulation {
            reason: reason.into(),
        }
    }
}

impl From<CoreError> for RiskError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InsufficientData { required, actual } => {
                Self::InsufficientData { required, actual }
            }
            other => Self::InvalidParameter {
                reason: other.to_string(),
            },
        }
    }
}

impl From<MathError> for RiskError {
    fn from(err: MathError) -> Self {
        match err {
            MathError::InsufficientData { required, actual } => {
                Self::InsufficientData { required, actual }
            }
            MathError::NotPositiveDefinite | MathError::DivisionByZero { .. } => {
                Self::NumericalInstability {
                    reason: err.to_string(),
                }
            }
            other => Self::InvalidParameter {
                reason: other.to_string(),
            },
        }
    }
}

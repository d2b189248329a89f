//! Error types for core data construction.

use thiserror::Error;

/// A specialized Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur while constructing core value objects.
#[derive(Error, Debug, Clone)]
pub enum CoreError {
    /// An input parameter is outside its valid range.
    #[error("invalid parameter: {reason}")]
    InvalidParameter {
        /// Description of the offending parameter.
        reason: String,
    },

    /// Too few observations for the requested construction.
    #[error("insufficient data: need at least {required} observations, got {actual}")]
    InsufficientData {
        /// Minimum required observations.
        required: usize,
        /// Actual number of observations.
        actual: usize,
    },

    /// Two inputs that must agree in length do not.
    #[error("dimension mismatch in {context}: {left} vs {right}")]
    DimensionMismatch {
        /// Length of the first input.
        left: usize,
        /// Length of the second input.
        right: usize,
        /// What was being constructed.
        context: String,
    },

    /// A NaN or infinite value where a finite one is required.
    #[error("non-finite value in {context}")]
    NonFiniteData {
        /// Where the bad value was found.
        context: String,
    },
}

impl CoreError {
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

    /// Creates a dimension mismatch error.
    #[must_use]
    pub fn dimension_mismatch(left: usize, right: usize, context: impl Into<String>) -> Self {
        Self::DimensionMismatch {
            left,
            right,
            context: context.into(),
        }
    }

    /// Creates a non-finite data error.
    #[must_use]
    pub fn non_finite(context: impl Into<String>) -> Self {
        Self::NonFiniteData {
            context: context.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CoreError::invalid_parameter("confidence level must be in (0, 1)");
        assert!(err.to_string().contains("confidence level"));

        let err = CoreError::insufficient_data(2, 1);
        assert!(err.to_string().contains("at least 2"));

        let err = CoreError::dimension_mismatch(3, 4, "portfolio weights");
        assert!(err.to_string().contains("portfolio weights"));
        assert!(err.to_string().contains("3 vs 4"));
    }

    #[test]
    fn test_error_clone() {
        let err = CoreError::non_finite("price matrix");
        let cloned = err.clone();
        assert_eq!(err.to_string(), cloned.to_string());
    }
}

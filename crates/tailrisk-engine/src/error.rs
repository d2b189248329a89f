//! Engine error types.

use thiserror::Error;

use tailrisk_core::CoreError;
use tailrisk_portfolio::PortfolioError;
use tailrisk_var::RiskError;

/// Engine error type.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The request failed boundary validation.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The supplied return history does not match the request.
    #[error("data mismatch: {0}")]
    DataMismatch(String),

    /// The external data provider failed.
    #[error("provider error: {0}")]
    ProviderError(String),

    /// Core type construction failed.
    #[error("core error: {0}")]
    Core(#[from] CoreError),

    /// Portfolio aggregation failed.
    #[error("portfolio error: {0}")]
    Portfolio(#[from] PortfolioError),

    /// Risk calculation failed.
    #[error("risk error: {0}")]
    Risk(#[from] RiskError),
}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

//! # tailrisk-portfolio
//!
//! Portfolio aggregation for the Tailrisk risk library.
//!
//! This crate collapses a multi-asset [`ReturnSeries`] into a single
//! portfolio return series and derives performance statistics from it:
//!
//! - **Aggregation**: weighted portfolio returns, weighting-scheme
//!   resolution (equal, market value, inverse volatility, custom)
//! - **Performance**: annualized return and volatility, Sharpe ratio,
//!   maximum drawdown, skewness, kurtosis
//!
//! All calculations are stateless pure functions over borrowed inputs.
//!
//! [`ReturnSeries`]: tailrisk_core::ReturnSeries

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_precision_loss)]

pub mod aggregation;
pub mod error;
pub mod performance;

pub use aggregation::{portfolio_returns, resolve_weights};
pub use error::{PortfolioError, PortfolioResult};
pub use performance::{
    annualized_volatility, max_drawdown, performance_metrics, sharpe_ratio, total_return,
    PerformanceMetrics,
};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::aggregation::{portfolio_returns, resolve_weights};
    pub use crate::error::{PortfolioError, PortfolioResult};
    pub use crate::performance::{performance_metrics, PerformanceMetrics};
}

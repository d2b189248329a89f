//! # tailrisk-var
//!
//! The Tailrisk risk engine: Value-at-Risk and risk decomposition for
//! multi-asset portfolios.
//!
//! This crate provides:
//!
//! - **Covariance**: sample and EWMA covariance estimation, correlation
//! - **VaR**: historical simulation, parametric (variance-covariance), and
//!   Monte Carlo methods behind one [`VaRMethod`] tag
//! - **Expected Shortfall**: historical and closed-form normal companions
//! - **Component VaR**: Euler allocation of parametric VaR across assets
//! - **Bootstrap**: resampled historical VaR with a confidence interval
//!
//! ## Design Philosophy
//!
//! - **Pure functions**: every estimator is a function of immutable inputs;
//!   covariance matrices and return series are freely shared across
//!   concurrent calls
//! - **Explicit randomness**: simulation methods take a seed parameter,
//!   never a hidden global generator
//! - **Fail fast**: parameters are validated at each method's boundary; a
//!   degenerate simulation batch is an error, never a silent zero
//!
//! ## Feature Flags
//!
//! - `parallel`: fan Monte Carlo draw blocks across rayon workers
//!   (bit-identical results for a fixed seed either way)

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_precision_loss)]

pub mod bootstrap;
pub mod component;
pub mod covariance;
pub mod error;
pub mod var;

pub use bootstrap::{bootstrap_var, BootstrapConfig, BootstrapVaR, DEFAULT_BOOTSTRAP_DRAWS};
pub use component::{component_var, AssetContribution, ComponentVaR};
pub use covariance::{CovarianceEstimator, CovarianceMatrix, DEFAULT_EWMA_LAMBDA};
pub use error::{RiskError, RiskResult};
pub use var::{
    historical_expected_shortfall, historical_var, monte_carlo_var, parametric_expected_shortfall,
    parametric_var, parametric_var_from_moments, MonteCarloConfig, VaRMethod, VaRResult,
    DEFAULT_SIMULATIONS,
};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::bootstrap::{bootstrap_var, BootstrapConfig, BootstrapVaR};
    pub use crate::component::{component_var, AssetContribution, ComponentVaR};
    pub use crate::covariance::{CovarianceEstimator, CovarianceMatrix, DEFAULT_EWMA_LAMBDA};
    pub use crate::error::{RiskError, RiskResult};
    pub use crate::var::{
        historical_var, monte_carlo_var, parametric_var, MonteCarloConfig, VaRMethod, VaRResult,
    };
}

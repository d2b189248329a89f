//! # tailrisk-engine
//!
//! The request/response facade over the Tailrisk risk library.
//!
//! This crate provides:
//! - [`RiskEngine`]: dispatches a [`RiskRequest`] across the selected VaR
//!   methods and assembles a [`RiskReport`]
//! - [`ReturnsProvider`]: the seam where an external market-data
//!   collaborator hands over aligned return histories
//! - [`ReturnsCache`] / [`CachedProvider`]: the explicit TTL cache
//!   collaborator, keyed by (asset set, date range)
//! - [`RiskEngineConfig`]: documented defaults for every per-request knob
//!
//! ## Architecture
//!
//! ```text
//! ReturnsProvider ──> ReturnSeries ──┬──> Covariance ──┬──> Parametric VaR
//!                                    │                 ├──> Monte Carlo VaR
//!                                    │                 └──> Component VaR
//!                                    └──> Portfolio returns ──> Historical VaR,
//!                                         Bootstrap, Performance
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let engine = RiskEngine::new(RiskEngineConfig::default());
//! let request = RiskRequest::new(assets, weights, 1_000_000.0, 0.95, 1)
//!     .with_methods(MethodSelection::All)
//!     .with_full_report();
//! let report = engine.analyze(&request, &series)?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod engine;
pub mod error;
pub mod provider;
pub mod report;
pub mod request;

pub use config::RiskEngineConfig;
pub use engine::RiskEngine;
pub use error::{EngineError, EngineResult};
pub use provider::{CachedProvider, ReturnsCache, ReturnsProvider};
pub use report::{ExpectedShortfallSummary, MatrixView, RiskReport};
pub use request::{CovarianceChoice, MethodSelection, RiskRequest};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::config::RiskEngineConfig;
    pub use crate::engine::RiskEngine;
    pub use crate::error::{EngineError, EngineResult};
    pub use crate::provider::{CachedProvider, ReturnsCache, ReturnsProvider};
    pub use crate::report::RiskReport;
    pub use crate::request::{CovarianceChoice, MethodSelection, RiskRequest};

    // Re-export the request building blocks from the risk engine
    pub use tailrisk_core::Asset;
    pub use tailrisk_var::{BootstrapConfig, MonteCarloConfig, VaRMethod};
}

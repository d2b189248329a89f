//! Engine configuration and documented defaults.

use serde::{Deserialize, Serialize};

use tailrisk_var::{DEFAULT_BOOTSTRAP_DRAWS, DEFAULT_EWMA_LAMBDA, DEFAULT_SIMULATIONS};

/// Engine-level defaults, applied when a request leaves a knob unset.
///
/// Every value here can be overridden per request; the config only decides
/// what "unset" means.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskEngineConfig {
    /// EWMA decay used when a request asks for EWMA covariance without a
    /// lambda (RiskMetrics convention).
    pub ewma_lambda: f64,
    /// Monte Carlo draw count used when a request has no simulation block.
    pub simulations: usize,
    /// Bootstrap resample count used when a request has no draw count.
    pub bootstrap_draws: usize,
    /// Annualized risk-free rate for performance metrics.
    pub risk_free_rate: f64,
    /// Time-to-live for cached return histories, in seconds.
    pub cache_ttl_secs: u64,
}

impl Default for RiskEngineConfig {
    fn default() -> Self {
        Self {
            ewma_lambda: DEFAULT_EWMA_LAMBDA,
            simulations: DEFAULT_SIMULATIONS,
            bootstrap_draws: DEFAULT_BOOTSTRAP_DRAWS,
            risk_free_rate: 0.0,
            cache_ttl_secs: 300,
        }
    }
}

impl RiskEngineConfig {
    /// Overrides the EWMA decay default.
    #[must_use]
    pub fn with_ewma_lambda(mut self, lambda: f64) -> Self {
        self.ewma_lambda = lambda;
        self
    }

    /// Overrides the Monte Carlo draw count default.
    #[must_use]
    pub fn with_simulations(mut self, simulations: usize) -> Self {
        self.simulations = simulations;
        self
    }

    /// Overrides the bootstrap resample count default.
    #[must_use]
    pub fn with_bootstrap_draws(mut self, draws: usize) -> Self {
        self.bootstrap_draws = draws;
        self
    }

    /// Overrides the risk-free rate.
    #[must_use]
    pub fn with_risk_free_rate(mut self, rate: f64) -> Self {
        self.risk_free_rate = rate;
        self
    }

    /// Overrides the cache TTL.
    #[must_use]
    pub fn with_cache_ttl_secs(mut self, secs: u64) -> Self {
        self.cache_ttl_secs = secs;
        self
    }
}

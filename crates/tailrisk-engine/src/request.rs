//! The request side of the engine contract.

use serde::{Deserialize, Serialize};

use tailrisk_core::Asset;
use tailrisk_var::{BootstrapConfig, MonteCarloConfig, VaRMethod};

/// Which VaR methods a request wants run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MethodSelection {
    /// Historical simulation only.
    Historical,
    /// Parametric (variance-covariance) only.
    Parametric,
    /// Monte Carlo only.
    MonteCarlo,
    /// All three methods.
    #[default]
    All,
}

impl MethodSelection {
    /// Expands the selection into concrete method tags, in a fixed order.
    #[must_use]
    pub fn methods(self) -> Vec<VaRMethod> {
        match self {
            Self::Historical => vec![VaRMethod::Historical],
            Self::Parametric => vec![VaRMethod::Parametric],
            Self::MonteCarlo => vec![VaRMethod::MonteCarlo],
            Self::All => vec![
                VaRMethod::Historical,
                VaRMethod::Parametric,
                VaRMethod::MonteCarlo,
            ],
        }
    }
}

/// Which covariance estimator to feed the parametric and Monte Carlo
/// methods.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CovarianceChoice {
    /// Unbiased sample covariance.
    #[default]
    Sample,
    /// EWMA covariance; `lambda: None` uses the engine default (0.94).
    Ewma {
        /// Decay parameter override.
        lambda: Option<f64>,
    },
}

/// A single risk-analysis request.
///
/// Every analysis knob is an explicit per-request field; the engine config
/// only supplies defaults for fields left `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskRequest {
    /// Assets, in the same column order as the supplied return history.
    pub assets: Vec<Asset>,
    /// Portfolio weights, aligned with `assets`, summing to 1.0.
    pub weights: Vec<f64>,
    /// Portfolio value in currency units.
    pub portfolio_value: f64,
    /// VaR confidence level in (0, 1).
    pub confidence_level: f64,
    /// Time horizon in trading days.
    pub time_horizon: u32,
    /// Which methods to run.
    #[serde(default)]
    pub methods: MethodSelection,
    /// Covariance estimator for parametric/Monte Carlo.
    #[serde(default)]
    pub covariance: CovarianceChoice,
    /// Monte Carlo overrides; `None` uses the engine defaults.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monte_carlo: Option<MonteCarloConfig>,
    /// Bootstrap block; `None` skips the bootstrap entirely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bootstrap: Option<BootstrapConfig>,
    /// Include the per-asset component VaR decomposition.
    #[serde(default)]
    pub include_components: bool,
    /// Include portfolio performance metrics.
    #[serde(default)]
    pub include_performance: bool,
    /// Include covariance and correlation matrices for display.
    #[serde(default)]
    pub include_matrices: bool,
    /// Include historical and parametric Expected Shortfall.
    #[serde(default)]
    pub include_expected_shortfall: bool,
}

impl RiskRequest {
    /// Creates a minimal request with everything optional switched off.
    #[must_use]
    pub fn new(
        assets: Vec<Asset>,
        weights: Vec<f64>,
        portfolio_value: f64,
        confidence_level: f64,
        time_horizon: u32,
    ) -> Self {
        Self {
            assets,
            weights,
            portfolio_value,
            confidence_level,
            time_horizon,
            methods: MethodSelection::default(),
            covariance: CovarianceChoice::default(),
            monte_carlo: None,
            bootstrap: None,
            include_components: false,
            include_performance: false,
            include_matrices: false,
            include_expected_shortfall: false,
        }
    }

    /// Selects the methods to run.
    #[must_use]
    pub fn with_methods(mut self, methods: MethodSelection) -> Self {
        self.methods = methods;
        self
    }

    /// Uses EWMA covariance with an optional lambda override.
    #[must_use]
    pub fn with_ewma(mut self, lambda: Option<f64>) -> Self {
        self.covariance = CovarianceChoice::Ewma { lambda };
        self
    }

    /// Sets Monte Carlo parameters.
    #[must_use]
    pub fn with_monte_carlo(mut self, config: MonteCarloConfig) -> Self {
        self.monte_carlo = Some(config);
        self
    }

    /// Requests a bootstrap run.
    #[must_use]
    pub fn with_bootstrap(mut self, config: BootstrapConfig) -> Self {
        self.bootstrap = Some(config);
        self
    }

    /// Switches on every optional section of the report.
    #[must_use]
    pub fn with_full_report(mut self) -> Self {
        self.include_components = true;
        self.include_performance = true;
        self.include_matrices = true;
        self.include_expected_shortfall = true;
        self
    }
}

//! The response side of the engine contract.

use serde::{Deserialize, Serialize};

use tailrisk_core::Asset;
use tailrisk_portfolio::PerformanceMetrics;
use tailrisk_var::{BootstrapVaR, ComponentVaR, VaRMethod, VaRResult};

/// A labelled matrix, shaped for display rather than computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatrixView {
    /// Row/column labels, in order.
    pub assets: Vec<Asset>,
    /// Row-major matrix entries.
    pub rows: Vec<Vec<f64>>,
}

/// Expected Shortfall companions to the VaR estimates, in currency units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpectedShortfallSummary {
    /// Mean historical loss beyond the historical VaR threshold.
    pub historical: f64,
    /// Closed-form normal Expected Shortfall.
    pub parametric: f64,
}

/// Everything a single risk request produced.
///
/// Sections beyond `var_results` appear only when the request asked for
/// them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskReport {
    /// One result per requested VaR method.
    pub var_results: Vec<VaRResult>,
    /// Euler decomposition of parametric VaR.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component_var: Option<ComponentVaR>,
    /// Portfolio performance metrics.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub performance: Option<PerformanceMetrics>,
    /// Expected Shortfall companions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_shortfall: Option<ExpectedShortfallSummary>,
    /// Bootstrap summary, when a bootstrap block was requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bootstrap: Option<BootstrapVaR>,
    /// Covariance matrix used, for display.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub covariance: Option<MatrixView>,
    /// Correlation matrix derived from it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlation: Option<MatrixView>,
}

impl RiskReport {
    /// Finds the result for a specific method, if it was run.
    #[must_use]
    pub fn result_for(&self, method: VaRMethod) -> Option<&VaRResult> {
        self.var_results.iter().find(|r| r.method == method)
    }

    /// The largest VaR estimate across the methods that ran.
    #[must_use]
    pub fn worst_case(&self) -> Option<&VaRResult> {
        self.var_results
            .iter()
            .max_by(|a, b| a.var.cmp(&b.var))
    }
}

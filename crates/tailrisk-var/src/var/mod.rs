//! Value at Risk (VaR) calculations.
//!
//! VaR estimates the loss threshold not expected to be exceeded with a
//! given confidence over a given horizon. Three interchangeable methods
//! are provided as pure functions over a common set of inputs, selected
//! by an explicit [`VaRMethod`] tag:
//!
//! - [`historical_var`]: empirical quantile of observed losses
//! - [`parametric_var`]: closed-form normal (variance-covariance) VaR
//! - [`monte_carlo_var`]: simulated multivariate-normal scenario losses
//!
//! All methods take single-day returns and scale to the requested horizon
//! by the square-root-of-time rule.

mod historical;
mod monte_carlo;
mod parametric;

pub use historical::{historical_expected_shortfall, historical_var};
pub use monte_carlo::{monte_carlo_var, MonteCarloConfig, DEFAULT_SIMULATIONS};
pub use parametric::{parametric_expected_shortfall, parametric_var, parametric_var_from_moments};

pub(crate) use historical::historical_var_amount;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{RiskError, RiskResult};

/// VaR calculation method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VaRMethod {
    /// Historical simulation.
    Historical,
    /// Parametric (variance-covariance).
    Parametric,
    /// Monte Carlo simulation.
    MonteCarlo,
}

impl std::fmt::Display for VaRMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Historical => write!(f, "historical"),
            Self::Parametric => write!(f, "parametric"),
            Self::MonteCarlo => write!(f, "monte_carlo"),
        }
    }
}

/// Value at Risk result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VaRResult {
    /// The VaR value (absolute loss, currency units, always >= 0).
    pub var: Decimal,
    /// Confidence level (e.g., 0.95 for 95%).
    pub confidence_level: f64,
    /// Time horizon in trading days.
    pub horizon_days: u32,
    /// Method used for calculation.
    pub method: VaRMethod,
    /// The loss distribution behind the estimate, when the method has one
    /// (historical losses or simulated scenario losses, horizon-scaled).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distribution: Option<Vec<f64>>,
}

impl VaRResult {
    /// The loss estimate as an `f64`.
    #[must_use]
    pub fn amount(&self) -> f64 {
        self.var.to_f64().unwrap_or(0.0)
    }
}

impl std::fmt::Display for VaRResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "VaR({:.0}%, {}d, {}): {:.2}",
            self.confidence_level * 100.0,
            self.horizon_days,
            self.method,
            self.var
        )
    }
}

/// Converts a non-negative loss amount into the Decimal carried by results.
pub(crate) fn loss_decimal(amount: f64) -> Decimal {
    Decimal::from_f64_retain(amount).unwrap_or(Decimal::ZERO)
}

/// Shared boundary validation for every VaR method.
pub(crate) fn validate_var_inputs(portfolio_value: f64, confidence_level: f64) -> RiskResult<()> {
    if confidence_level <= 0.0 || confidence_level >= 1.0 {
        return Err(RiskError::invalid_parameter(format!(
            "confidence level must be in (0, 1) exclusive, got {confidence_level}"
        )));
    }
    if !portfolio_value.is_finite() || portfolio_value <= 0.0 {
        return Err(RiskError::invalid_parameter(
            "portfolio value must be positive",
        ));
    }
    Ok(())
}

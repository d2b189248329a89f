//! Parametric (variance-covariance) VaR.

use nalgebra::DVector;

use tailrisk_math::distributions::{normal_inverse_cdf, normal_pdf};

use super::{loss_decimal, validate_var_inputs, VaRMethod, VaRResult};
use crate::covariance::CovarianceMatrix;
use crate::error::{RiskError, RiskResult};

/// Calculates parametric VaR for a weighted portfolio.
///
/// Assumes portfolio returns are normal with mean `μ_p = wᵀμ` and variance
/// `σ_p² = wᵀΣw`, both in daily units, and scales to the horizon by the
/// square-root-of-time rule:
///
/// ```text
/// VaR = value · (-μ_p·h + z_α·σ_p·√h)
/// ```
///
/// The normal quantile `z_α` comes from a full inverse-CDF approximation,
/// so any confidence level in (0, 1) is supported.
///
/// # Errors
///
/// Returns `InvalidParameter` for out-of-range scalars or mismatched
/// dimensions.
pub fn parametric_var(
    weights: &[f64],
    mean_returns: &DVector<f64>,
    covariance: &CovarianceMatrix,
    portfolio_value: f64,
    confidence_level: f64,
    horizon_days: u32,
) -> RiskResult<VaRResult> {
    let (mean, std_dev) = portfolio_moments(weights, mean_returns, covariance)?;
    parametric_var_from_moments(
        mean,
        std_dev,
        portfolio_value,
        confidence_level,
        horizon_days,
    )
}

/// Parametric VaR from pre-computed daily portfolio moments.
///
/// Exposed separately so callers with a known `(μ, σ)`, such as stress
/// overrides or closed-form checks, can skip the covariance plumbing.
///
/// # Errors
///
/// Returns `InvalidParameter` for out-of-range scalars.
pub fn parametric_var_from_moments(
    mean: f64,
    std_dev: f64,
    portfolio_value: f64,
    confidence_level: f64,
    horizon_days: u32,
) -> RiskResult<VaRResult> {
    validate_var_inputs(portfolio_value, confidence_level)?;
    validate_moments(mean, std_dev, horizon_days)?;

    let z = normal_inverse_cdf(confidence_level)?;
    let h = f64::from(horizon_days);
    let var = (portfolio_value * (-mean * h + z * std_dev * h.sqrt())).max(0.0);

    Ok(VaRResult {
        var: loss_decimal(var),
        confidence_level,
        horizon_days,
        method: VaRMethod::Parametric,
        distribution: None,
    })
}

/// Closed-form Expected Shortfall under the same normal assumption.
///
/// ```text
/// ES = value · (-μ_p·h + σ_p·√h · φ(z_α) / (1 - α))
/// ```
///
/// # Errors
///
/// Same failure modes as [`parametric_var`].
pub fn parametric_expected_shortfall(
    weights: &[f64],
    mean_returns: &DVector<f64>,
    covariance: &CovarianceMatrix,
    portfolio_value: f64,
    confidence_level: f64,
    horizon_days: u32,
) -> RiskResult<f64> {
    validate_var_inputs(portfolio_value, confidence_level)?;
    let (mean, std_dev) = portfolio_moments(weights, mean_returns, covariance)?;
    validate_moments(mean, std_dev, horizon_days)?;

    let z = normal_inverse_cdf(confidence_level)?;
    let h = f64::from(horizon_days);
    let tail_factor = normal_pdf(z) / (1.0 - confidence_level);
    Ok((portfolio_value * (-mean * h + std_dev * h.sqrt() * tail_factor)).max(0.0))
}

/// Daily portfolio mean and standard deviation from weights and covariance.
pub(crate) fn portfolio_moments(
    weights: &[f64],
    mean_returns: &DVector<f64>,
    covariance: &CovarianceMatrix,
) -> RiskResult<(f64, f64)> {
    if weights.len() != covariance.num_assets() || weights.len() != mean_returns.len() {
        return Err(RiskError::invalid_parameter(format!(
            "weights ({}), means ({}) and covariance ({}) disagree in size",
            weights.len(),
            mean_returns.len(),
            covariance.num_assets()
        )));
    }

    let mean = weights
        .iter()
        .zip(mean_returns.iter())
        .map(|(w, m)| w * m)
        .sum();
    let variance = covariance.portfolio_variance(weights)?;
    Ok((mean, variance.max(0.0).sqrt()))
}

fn validate_moments(mean: f64, std_dev: f64, horizon_days: u32) -> RiskResult<()> {
    if !mean.is_finite() {
        return Err(RiskError::invalid_parameter("portfolio mean is not finite"));
    }
    if !std_dev.is_finite() || std_dev < 0.0 {
        return Err(RiskError::invalid_parameter(
            "portfolio volatility must be finite and non-negative",
        ));
    }
    if horizon_days == 0 {
        return Err(RiskError::invalid_parameter(
            "time horizon must be at least 1 trading day",
        ));
    }
    Ok(())
}

//! Historical simulation VaR.

use tailrisk_math::statistics::quantile;

use super::{loss_decimal, validate_var_inputs, VaRMethod, VaRResult};
use crate::error::{RiskError, RiskResult};

/// Calculates historical simulation VaR from a portfolio return series.
///
/// Input returns are single-day; each is scaled by `sqrt(horizon_days)`
/// before the loss quantile is taken (square-root-of-time rule). The VaR
/// is the `confidence_level` empirical quantile of the loss distribution
/// `-r_p * portfolio_value`, with linear interpolation between order
/// statistics, floored at zero.
///
/// # Arguments
///
/// * `returns` - Daily portfolio returns (as decimals, e.g. -0.01 for -1%)
/// * `portfolio_value` - Current portfolio value in currency units
/// * `confidence_level` - Confidence level (e.g., 0.95 for 95%)
/// * `horizon_days` - Time horizon in trading days
///
/// # Errors
///
/// Returns `InvalidParameter` for out-of-range scalars and
/// `InsufficientData` for fewer than two returns.
pub fn historical_var(
    returns: &[f64],
    portfolio_value: f64,
    confidence_level: f64,
    horizon_days: u32,
) -> RiskResult<VaRResult> {
    let losses = horizon_losses(returns, portfolio_value, confidence_level, horizon_days)?;
    let var = quantile(&losses, confidence_level)?.max(0.0);

    Ok(VaRResult {
        var: loss_decimal(var),
        confidence_level,
        horizon_days,
        method: VaRMethod::Historical,
        distribution: Some(losses),
    })
}

/// Historical Expected Shortfall: the mean loss in the tail at and beyond
/// the historical VaR threshold.
///
/// Always at least as large as the matching historical VaR.
///
/// # Errors
///
/// Same failure modes as [`historical_var`].
pub fn historical_expected_shortfall(
    returns: &[f64],
    portfolio_value: f64,
    confidence_level: f64,
    horizon_days: u32,
) -> RiskResult<f64> {
    let losses = horizon_losses(returns, portfolio_value, confidence_level, horizon_days)?;
    let var = quantile(&losses, confidence_level)?.max(0.0);

    let mut tail_sum = 0.0;
    let mut tail_count = 0usize;
    for &loss in &losses {
        if loss >= var - 1.0e-12 {
            tail_sum += loss;
            tail_count += 1;
        }
    }

    if tail_count == 0 {
        Ok(var)
    } else {
        Ok((tail_sum / tail_count as f64).max(0.0))
    }
}

/// Historical VaR as a bare loss amount, shared with the bootstrap module.
pub(crate) fn historical_var_amount(
    returns: &[f64],
    portfolio_value: f64,
    confidence_level: f64,
    horizon_days: u32,
) -> RiskResult<f64> {
    let losses = horizon_losses(returns, portfolio_value, confidence_level, horizon_days)?;
    Ok(quantile(&losses, confidence_level)?.max(0.0))
}

/// Validates inputs and converts returns into horizon-scaled losses.
fn horizon_losses(
    returns: &[f64],
    portfolio_value: f64,
    confidence_level: f64,
    horizon_days: u32,
) -> RiskResult<Vec<f64>> {
    validate_var_inputs(portfolio_value, confidence_level)?;
    if returns.len() < 2 {
        return Err(RiskError::insufficient_data(2, returns.len()));
    }
    if horizon_days == 0 {
        return Err(RiskError::invalid_parameter(
            "time horizon must be at least 1 trading day",
        ));
    }

    let scale = f64::from(horizon_days).sqrt();
    Ok(returns
        .iter()
        .map(|r| -r * scale * portfolio_value)
        .collect())
}

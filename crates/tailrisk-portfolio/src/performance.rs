//! Portfolio performance metrics.

use serde::{Deserialize, Serialize};

use tailrisk_core::TRADING_DAYS_PER_YEAR;
use tailrisk_math::statistics::{mean, sample_moments, sample_std};

use crate::error::PortfolioResult;

/// Performance summary of a portfolio return series.
///
/// All metrics are pure functions of the daily return series and the
/// risk-free rate; nothing here depends on portfolio value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    /// Cumulative return over the whole history.
    pub total_return: f64,
    /// Mean daily return scaled to a 252-day year.
    pub annualized_return: f64,
    /// Daily volatility scaled by `sqrt(252)`.
    pub annualized_volatility: f64,
    /// Excess annualized return per unit of annualized volatility.
    /// `None` when volatility is zero; the ratio is undefined there and
    /// is never reported as NaN.
    pub sharpe_ratio: Option<f64>,
    /// Largest peak-to-trough decline of the cumulative wealth curve.
    pub max_drawdown: f64,
    /// Sample skewness of daily returns.
    pub skewness: f64,
    /// Sample excess kurtosis of daily returns.
    pub excess_kurtosis: f64,
}

/// Computes the full performance summary for a portfolio return series.
///
/// # Arguments
///
/// * `returns` - Daily portfolio returns
/// * `risk_free_rate` - Annualized risk-free rate (default 0.0 upstream)
///
/// # Errors
///
/// Returns an error for fewer than two observations.
pub fn performance_metrics(
    returns: &[f64],
    risk_free_rate: f64,
) -> PortfolioResult<PerformanceMetrics> {
    let annualized_volatility = annualized_volatility(returns)?;
    let (_, _, skewness, excess_kurtosis) = sample_moments(returns)?;

    Ok(PerformanceMetrics {
        total_return: total_return(returns),
        annualized_return: mean(returns)? * TRADING_DAYS_PER_YEAR,
        annualized_volatility,
        sharpe_ratio: sharpe_ratio(returns, risk_free_rate)?,
        max_drawdown: max_drawdown(returns),
        skewness,
        excess_kurtosis,
    })
}

/// Cumulative return `Π(1 + r_t) - 1`.
#[must_use]
pub fn total_return(returns: &[f64]) -> f64 {
    returns.iter().map(|r| 1.0 + r).product::<f64>() - 1.0
}

/// Daily volatility scaled to an annual figure by `sqrt(252)`.
///
/// # Errors
///
/// Returns an error for fewer than two observations.
pub fn annualized_volatility(returns: &[f64]) -> PortfolioResult<f64> {
    Ok(sample_std(returns)? * TRADING_DAYS_PER_YEAR.sqrt())
}

/// Sharpe ratio `(mean · 252 - rf) / annualized volatility`.
///
/// Returns `Ok(None)` when volatility is exactly zero: a constant return
/// series has no defined Sharpe ratio.
///
/// # Errors
///
/// Returns an error for fewer than two observations.
pub fn sharpe_ratio(returns: &[f64], risk_free_rate: f64) -> PortfolioResult<Option<f64>> {
    let vol = annualized_volatility(returns)?;
    if vol < f64::EPSILON {
        return Ok(None);
    }
    let excess = mean(returns)? * TRADING_DAYS_PER_YEAR - risk_free_rate;
    Ok(Some(excess / vol))
}

/// Maximum drawdown of the cumulative wealth curve.
///
/// Tracks `W_t = Π_{s<=t}(1 + r_s)` and reports the largest relative
/// decline from a running peak, as a non-negative fraction.
#[must_use]
pub fn max_drawdown(returns: &[f64]) -> f64 {
    let mut wealth = 1.0;
    let mut peak = 1.0;
    let mut worst = 0.0f64;

    for r in returns {
        wealth *= 1.0 + r;
        if wealth > peak {
            peak = wealth;
        }
        let drawdown = (peak - wealth) / peak;
        if drawdown > worst {
            worst = drawdown;
        }
    }

    worst
}

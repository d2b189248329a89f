//! Component VaR: Euler allocation of parametric VaR across assets.
//!
//! Marginal contribution of asset `i` is
//! `VaR_total · w_i·(Σw)_i / (wᵀΣw)`. Contributions are additive and sum
//! exactly to the total. The allocation relies on parametric VaR being
//! homogeneous of degree one in the weight vector, so it is exact for the
//! parametric method only; historical and Monte Carlo estimates do not
//! decompose this way and are not offered here.

use nalgebra::DVector;
use serde::{Deserialize, Serialize};

use tailrisk_core::Asset;

use crate::covariance::CovarianceMatrix;
use crate::error::{RiskError, RiskResult};
use crate::var::parametric_var;

/// One asset's share of total portfolio VaR.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetContribution {
    /// The asset.
    pub asset: Asset,
    /// Portfolio weight of the asset.
    pub weight: f64,
    /// Contribution to total VaR, in currency units.
    pub contribution: f64,
    /// Contribution as a percentage of total VaR (0-100).
    pub contribution_pct: f64,
}

/// Euler decomposition of total parametric VaR.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentVaR {
    /// Total parametric VaR being decomposed, in currency units.
    pub total_var: f64,
    /// Confidence level used.
    pub confidence_level: f64,
    /// Time horizon in trading days.
    pub horizon_days: u32,
    /// Contributions by asset, sorted by absolute contribution descending.
    pub by_asset: Vec<AssetContribution>,
}

impl ComponentVaR {
    /// Returns the top N contributors by absolute contribution.
    #[must_use]
    pub fn top_contributors(&self, n: usize) -> Vec<&AssetContribution> {
        self.by_asset.iter().take(n).collect()
    }

    /// Sum of all contributions; equals `total_var` up to rounding.
    #[must_use]
    pub fn contribution_sum(&self) -> f64 {
        self.by_asset.iter().map(|c| c.contribution).sum()
    }
}

/// Decomposes total parametric VaR into per-asset contributions.
///
/// # Arguments
///
/// * `assets` - Asset labels, aligned with `weights`
/// * `weights` - Portfolio weights
/// * `mean_returns` - Daily per-asset mean returns
/// * `covariance` - Daily covariance matrix
/// * `portfolio_value` - Portfolio value in currency units
/// * `confidence_level` - VaR confidence level
/// * `horizon_days` - Time horizon in trading days
///
/// # Errors
///
/// Returns the parametric method's validation errors, plus
/// `NumericalInstability` when the portfolio variance is zero (nothing to
/// allocate against).
pub fn component_var(
    assets: &[Asset],
    weights: &[f64],
    mean_returns: &DVector<f64>,
    covariance: &CovarianceMatrix,
    portfolio_value: f64,
    confidence_level: f64,
    horizon_days: u32,
) -> RiskResult<ComponentVaR> {
    if assets.len() != weights.len() {
        return Err(RiskError::invalid_parameter(format!(
            "assets ({}) and weights ({}) disagree in size",
            assets.len(),
            weights.len()
        )));
    }

    let total = parametric_var(
        weights,
        mean_returns,
        covariance,
        portfolio_value,
        confidence_level,
        horizon_days,
    )?
    .amount();

    let portfolio_variance = covariance.portfolio_variance(weights)?;
    if portfolio_variance < f64::EPSILON * f64::EPSILON {
        return Err(RiskError::numerical_instability(
            "portfolio variance is zero; component VaR is undefined",
        ));
    }

    let w = DVector::from_row_slice(weights);
    let sigma_w = covariance.matrix() * &w;

    let mut by_asset: Vec<AssetContribution> = assets
        .iter()
        .zip(weights)
        .enumerate()
        .map(|(i, (asset, weight))| {
            let contribution = total * weight * sigma_w[i] / portfolio_variance;
            AssetContribution {
                asset: asset.clone(),
                weight: *weight,
                contribution,
                contribution_pct: if total.abs() > f64::EPSILON {
                    contribution / total * 100.0
                } else {
                    0.0
                },
            }
        })
        .collect();

    by_asset.sort_by(|a, b| {
        b.contribution
            .abs()
            .partial_cmp(&a.contribution.abs())
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    Ok(ComponentVaR {
        total_var: total,
        confidence_level,
        horizon_days,
        by_asset,
    })
}

//! Portfolio definition and invariants.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::types::Asset;

/// Tolerance for the weight-sum invariant.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// A portfolio of assets with a weight vector and risk parameters.
///
/// Immutable once constructed. Invariants enforced at construction:
///
/// - `weights.len() == assets.len()`
/// - weights sum to 1.0 within [`WEIGHT_SUM_TOLERANCE`]
/// - weights are non-negative unless built via
///   [`Portfolio::with_short_positions`]
/// - `value > 0`, `time_horizon >= 1`, `confidence_level` in (0, 1)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Portfolio {
    assets: Vec<Asset>,
    weights: Vec<f64>,
    value: f64,
    time_horizon: u32,
    confidence_level: f64,
}

impl Portfolio {
    /// Creates a long-only portfolio.
    ///
    /// # Arguments
    ///
    /// * `assets` - Portfolio constituents
    /// * `weights` - Allocation per asset, summing to 1.0
    /// * `value` - Total portfolio value in currency units
    /// * `time_horizon` - Risk horizon in trading days
    /// * `confidence_level` - VaR confidence level, e.g. 0.95
    ///
    /// # Errors
    ///
    /// Returns an error when any invariant listed on [`Portfolio`] fails.
    pub fn new(
        assets: Vec<Asset>,
        weights: Vec<f64>,
        value: f64,
        time_horizon: u32,
        confidence_level: f64,
    ) -> CoreResult<Self> {
        if weights.iter().any(|w| *w < 0.0) {
            return Err(CoreError::invalid_parameter(
                "negative weight in a long-only portfolio",
            ));
        }
        Self::with_short_positions(assets, weights, value, time_horizon, confidence_level)
    }

    /// Creates a portfolio that may hold short positions.
    ///
    /// Weights may be negative but must still sum to 1.0.
    ///
    /// # Errors
    ///
    /// Returns an error when any invariant other than non-negativity fails.
    pub fn with_short_positions(
        assets: Vec<Asset>,
        weights: Vec<f64>,
        value: f64,
        time_horizon: u32,
        confidence_level: f64,
    ) -> CoreResult<Self> {
        if assets.is_empty() {
            return Err(CoreError::invalid_parameter("asset list is empty"));
        }
        if weights.len() != assets.len() {
            return Err(CoreError::dimension_mismatch(
                weights.len(),
                assets.len(),
                "portfolio weights",
            ));
        }
        if weights.iter().any(|w| !w.is_finite()) {
            return Err(CoreError::non_finite("portfolio weights"));
        }

        let sum: f64 = weights.iter().sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(CoreError::invalid_parameter(format!(
                "weights must sum to 1.0, got {sum:.8}"
            )));
        }

        if !value.is_finite() || value <= 0.0 {
            return Err(CoreError::invalid_parameter(
                "portfolio value must be positive",
            ));
        }
        if time_horizon == 0 {
            return Err(CoreError::invalid_parameter(
                "time horizon must be at least 1 trading day",
            ));
        }
        if confidence_level <= 0.0 || confidence_level >= 1.0 {
            return Err(CoreError::invalid_parameter(
                "confidence level must be in (0, 1) exclusive",
            ));
        }

        Ok(Self {
            assets,
            weights,
            value,
            time_horizon,
            confidence_level,
        })
    }

    /// Creates an equally weighted portfolio.
    ///
    /// # Errors
    ///
    /// Returns an error when the asset list is empty or the scalar
    /// parameters are out of range.
    pub fn equal_weighted(
        assets: Vec<Asset>,
        value: f64,
        time_horizon: u32,
        confidence_level: f64,
    ) -> CoreResult<Self> {
        let n = assets.len();
        if n == 0 {
            return Err(CoreError::invalid_parameter("asset list is empty"));
        }
        let weights = vec![1.0 / n as f64; n];
        Self::new(assets, weights, value, time_horizon, confidence_level)
    }

    /// Returns a copy of this portfolio with a new weight vector.
    ///
    /// All other parameters are preserved; the new weights go through the
    /// same validation as construction.
    ///
    /// # Errors
    ///
    /// Returns an error when the new weights violate the invariants.
    pub fn reweighted(&self, weights: Vec<f64>) -> CoreResult<Self> {
        Self::with_short_positions(
            self.assets.clone(),
            weights,
            self.value,
            self.time_horizon,
            self.confidence_level,
        )
    }

    /// Portfolio constituents.
    #[must_use]
    pub fn assets(&self) -> &[Asset] {
        &self.assets
    }

    /// Allocation weights, aligned with [`Portfolio::assets`].
    #[must_use]
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Total portfolio value in currency units.
    #[must_use]
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Risk horizon in trading days.
    #[must_use]
    pub fn time_horizon(&self) -> u32 {
        self.time_horizon
    }

    /// VaR confidence level.
    #[must_use]
    pub fn confidence_level(&self) -> f64 {
        self.confidence_level
    }

    /// Number of assets.
    #[must_use]
    pub fn num_assets(&self) -> usize {
        self.assets.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assets(n: usize) -> Vec<Asset> {
        (0..n).map(|i| Asset::new(format!("A{i}"))).collect()
    }

    #[test]
    fn test_equal_weighted() {
        let p = Portfolio::equal_weighted(assets(4), 1_000_000.0, 1, 0.95).unwrap();
        assert_eq!(p.num_assets(), 4);
        assert!(p.weights().iter().all(|w| (w - 0.25).abs() < 1e-12));
    }

    #[test]
    fn test_rejects_bad_weight_sum() {
        let result = Portfolio::new(assets(2), vec![0.6, 0.6], 1_000_000.0, 1, 0.95);
        assert!(matches!(result, Err(CoreError::InvalidParameter { .. })));
    }

    #[test]
    fn test_rejects_mismatched_lengths() {
        let result = Portfolio::new(assets(3), vec![0.5, 0.5], 1_000_000.0, 1, 0.95);
        assert!(matches!(result, Err(CoreError::DimensionMismatch { .. })));
    }

    #[test]
    fn test_rejects_negative_weight_long_only() {
        let result = Portfolio::new(assets(2), vec![1.5, -0.5], 1_000_000.0, 1, 0.95);
        assert!(result.is_err());

        // Same weights are fine when shorts are allowed
        let p = Portfolio::with_short_positions(assets(2), vec![1.5, -0.5], 1_000_000.0, 1, 0.95);
        assert!(p.is_ok());
    }

    #[test]
    fn test_rejects_bad_scalars() {
        assert!(Portfolio::equal_weighted(assets(2), 0.0, 1, 0.95).is_err());
        assert!(Portfolio::equal_weighted(assets(2), -5.0, 1, 0.95).is_err());
        assert!(Portfolio::equal_weighted(assets(2), 1_000_000.0, 0, 0.95).is_err());
        assert!(Portfolio::equal_weighted(assets(2), 1_000_000.0, 1, 0.0).is_err());
        assert!(Portfolio::equal_weighted(assets(2), 1_000_000.0, 1, 1.0).is_err());
    }

    #[test]
    fn test_reweighted_preserves_parameters() {
        let p = Portfolio::equal_weighted(assets(2), 500_000.0, 10, 0.99).unwrap();
        let q = p.reweighted(vec![0.7, 0.3]).unwrap();

        assert_eq!(q.value(), 500_000.0);
        assert_eq!(q.time_horizon(), 10);
        assert_eq!(q.confidence_level(), 0.99);
        assert_eq!(q.weights(), &[0.7, 0.3]);
        // Original untouched
        assert_eq!(p.weights(), &[0.5, 0.5]);
    }

    #[test]
    fn test_serde_round_trip() {
        let p = Portfolio::equal_weighted(assets(2), 1_000_000.0, 1, 0.95).unwrap();
        let json = serde_json::to_string(&p).unwrap();
        let parsed: Portfolio = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, p);
    }
}

//! Aligned multi-asset return history.

use chrono::NaiveDate;
use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::types::Asset;

/// How returns are derived from a price series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ReturnMethod {
    /// Log returns: `r_t = ln(P_t / P_{t-1})`.
    #[default]
    Log,
    /// Simple returns: `r_t = P_t / P_{t-1} - 1`.
    Simple,
}

impl std::fmt::Display for ReturnMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Log => write!(f, "log"),
            Self::Simple => write!(f, "simple"),
        }
    }
}

/// An aligned matrix of per-asset, per-period returns.
///
/// Rows are periods (oldest first), columns are assets. All assets share
/// the same gap-free timestamp axis; alignment and forward-filling of the
/// raw price history is the data provider's job, not this type's.
///
/// A `ReturnSeries` is immutable once constructed. Derived quantities
/// (covariance, portfolio returns) borrow it freely.
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnSeries {
    assets: Vec<Asset>,
    dates: Vec<NaiveDate>,
    returns: DMatrix<f64>,
}

impl ReturnSeries {
    /// Creates a return series from an already-computed return matrix.
    ///
    /// # Arguments
    ///
    /// * `assets` - Column labels, one per asset
    /// * `dates` - Row labels, strictly increasing, one per period
    /// * `returns` - `dates.len() x assets.len()` matrix of period returns
    ///
    /// # Errors
    ///
    /// Returns an error when dimensions disagree, dates are not strictly
    /// increasing, or any entry is non-finite.
    pub fn new(
        assets: Vec<Asset>,
        dates: Vec<NaiveDate>,
        returns: DMatrix<f64>,
    ) -> CoreResult<Self> {
        if assets.is_empty() {
            return Err(CoreError::invalid_parameter("asset list is empty"));
        }
        if dates.is_empty() {
            return Err(CoreError::insufficient_data(1, 0));
        }
        if returns.ncols() != assets.len() {
            return Err(CoreError::dimension_mismatch(
                returns.ncols(),
                assets.len(),
                "return series columns",
            ));
        }
        if returns.nrows() != dates.len() {
            return Err(CoreError::dimension_mismatch(
                returns.nrows(),
                dates.len(),
                "return series rows",
            ));
        }
        if dates.windows(2).any(|w| w[0] >= w[1]) {
            return Err(CoreError::invalid_parameter(
                "dates must be strictly increasing",
            ));
        }
        if returns.iter().any(|r| !r.is_finite()) {
            return Err(CoreError::non_finite("return matrix"));
        }

        Ok(Self {
            assets,
            dates,
            returns,
        })
    }

    /// Derives a return series from an aligned price table.
    ///
    /// `prices` has one row per date and one column per asset. The first
    /// price row is consumed by differencing, so the resulting series has
    /// `dates.len() - 1` periods.
    ///
    /// # Errors
    ///
    /// Returns an error when fewer than two price rows are supplied or any
    /// price is non-positive or non-finite.
    pub fn from_prices(
        assets: Vec<Asset>,
        dates: Vec<NaiveDate>,
        prices: &DMatrix<f64>,
        method: ReturnMethod,
    ) -> CoreResult<Self> {
        if prices.nrows() < 2 {
            return Err(CoreError::insufficient_data(2, prices.nrows()));
        }
        if prices.nrows() != dates.len() {
            return Err(CoreError::dimension_mismatch(
                prices.nrows(),
                dates.len(),
                "price table rows",
            ));
        }
        if prices.iter().any(|p| !p.is_finite() || *p <= 0.0) {
            return Err(CoreError::invalid_parameter(
                "prices must be finite and positive",
            ));
        }

        let periods = prices.nrows() - 1;
        let returns = DMatrix::from_fn(periods, prices.ncols(), |t, j| {
            let ratio = prices[(t + 1, j)] / prices[(t, j)];
            match method {
                ReturnMethod::Log => ratio.ln(),
                ReturnMethod::Simple => ratio - 1.0,
            }
        });

        Self::new(assets, dates[1..].to_vec(), returns)
    }

    /// Returns the assets, in column order.
    #[must_use]
    pub fn assets(&self) -> &[Asset] {
        &self.assets
    }

    /// Returns the period dates, oldest first.
    #[must_use]
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Returns the full `periods x assets` return matrix.
    #[must_use]
    pub fn matrix(&self) -> &DMatrix<f64> {
        &self.returns
    }

    /// Number of periods (rows).
    #[must_use]
    pub fn num_periods(&self) -> usize {
        self.returns.nrows()
    }

    /// Number of assets (columns).
    #[must_use]
    pub fn num_assets(&self) -> usize {
        self.returns.ncols()
    }

    /// Returns one asset's return history.
    #[must_use]
    pub fn asset_returns(&self, index: usize) -> Vec<f64> {
        self.returns.column(index).iter().copied().collect()
    }

    /// Per-asset mean returns.
    #[must_use]
    pub fn mean_returns(&self) -> DVector<f64> {
        let t = self.num_periods() as f64;
        DVector::from_iterator(
            self.num_assets(),
            self.returns.column_iter().map(|c| c.sum() / t),
        )
    }

    /// Finds an asset's column index.
    #[must_use]
    pub fn index_of(&self, asset: &Asset) -> Option<usize> {
        self.assets.iter().position(|a| a == asset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn dates(n: usize) -> Vec<NaiveDate> {
        (0..n)
            .map(|i| NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + chrono::Days::new(i as u64))
            .collect()
    }

    #[test]
    fn test_log_returns_from_prices() {
        let assets = vec![Asset::new("A"), Asset::new("B")];
        let prices = DMatrix::from_row_slice(3, 2, &[100.0, 50.0, 110.0, 45.0, 99.0, 54.0]);

        let series =
            ReturnSeries::from_prices(assets, dates(3), &prices, ReturnMethod::Log).unwrap();

        assert_eq!(series.num_periods(), 2);
        assert_eq!(series.num_assets(), 2);
        assert_relative_eq!(series.matrix()[(0, 0)], (110.0f64 / 100.0).ln(), epsilon = 1e-12);
        assert_relative_eq!(series.matrix()[(1, 1)], (54.0f64 / 45.0).ln(), epsilon = 1e-12);
    }

    #[test]
    fn test_simple_returns_from_prices() {
        let assets = vec![Asset::new("A")];
        let prices = DMatrix::from_row_slice(2, 1, &[100.0, 105.0]);

        let series =
            ReturnSeries::from_prices(assets, dates(2), &prices, ReturnMethod::Simple).unwrap();

        assert_relative_eq!(series.matrix()[(0, 0)], 0.05, epsilon = 1e-12);
    }

    #[test]
    fn test_rejects_single_price_row() {
        let assets = vec![Asset::new("A")];
        let prices = DMatrix::from_row_slice(1, 1, &[100.0]);

        let result = ReturnSeries::from_prices(assets, dates(1), &prices, ReturnMethod::Log);
        assert!(matches!(result, Err(CoreError::InsufficientData { .. })));
    }

    #[test]
    fn test_rejects_negative_price() {
        let assets = vec![Asset::new("A")];
        let prices = DMatrix::from_row_slice(2, 1, &[100.0, -3.0]);

        let result = ReturnSeries::from_prices(assets, dates(2), &prices, ReturnMethod::Log);
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_unsorted_dates() {
        let assets = vec![Asset::new("A")];
        let mut ds = dates(3);
        ds.swap(1, 2);
        let returns = DMatrix::from_row_slice(3, 1, &[0.01, -0.02, 0.005]);

        let result = ReturnSeries::new(assets, ds, returns);
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_nan_return() {
        let assets = vec![Asset::new("A")];
        let returns = DMatrix::from_row_slice(2, 1, &[0.01, f64::NAN]);

        let result = ReturnSeries::new(assets, dates(2), returns);
        assert!(matches!(result, Err(CoreError::NonFiniteData { .. })));
    }

    #[test]
    fn test_mean_returns_and_column_access() {
        let assets = vec![Asset::new("A"), Asset::new("B")];
        let returns = DMatrix::from_row_slice(2, 2, &[0.01, 0.02, 0.03, -0.02]);
        let series = ReturnSeries::new(assets, dates(2), returns).unwrap();

        let means = series.mean_returns();
        assert_relative_eq!(means[0], 0.02, epsilon = 1e-12);
        assert_relative_eq!(means[1], 0.0, epsilon = 1e-12);

        assert_eq!(series.asset_returns(1), vec![0.02, -0.02]);
        assert_eq!(series.index_of(&Asset::new("B")), Some(1));
        assert_eq!(series.index_of(&Asset::new("C")), None);
    }
}

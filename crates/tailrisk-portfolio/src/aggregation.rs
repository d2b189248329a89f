//! Collapsing a multi-asset return history into one portfolio series.

use tailrisk_core::{ReturnSeries, WeightingScheme, WEIGHT_SUM_TOLERANCE};
use tailrisk_math::statistics::sample_std;

use crate::error::{PortfolioError, PortfolioResult};

/// Computes the weighted portfolio return series `r_p(t) = Σ_i w_i · r_i(t)`.
///
/// # Arguments
///
/// * `series` - Aligned per-asset return history
/// * `weights` - Allocation per asset, in the series' column order
///
/// # Errors
///
/// Returns an error when the weight count disagrees with the series.
pub fn portfolio_returns(series: &ReturnSeries, weights: &[f64]) -> PortfolioResult<Vec<f64>> {
    if weights.len() != series.num_assets() {
        return Err(PortfolioError::WeightMismatch {
            weights: weights.len(),
            assets: series.num_assets(),
        });
    }

    Ok(series
        .matrix()
        .row_iter()
        .map(|row| row.iter().zip(weights).map(|(r, w)| r * w).sum())
        .collect())
}

/// Resolves a [`WeightingScheme`] into a concrete weight vector.
///
/// `latest_prices` is only consulted by [`WeightingScheme::MarketValue`];
/// pass `None` otherwise.
///
/// # Errors
///
/// Returns an error when the scheme needs data it was not given, when
/// custom weights fail validation, or when an asset's volatility cannot
/// be estimated.
pub fn resolve_weights(
    scheme: &WeightingScheme,
    series: &ReturnSeries,
    latest_prices: Option<&[f64]>,
) -> PortfolioResult<Vec<f64>> {
    let n = series.num_assets();

    match scheme {
        WeightingScheme::Equal => Ok(vec![1.0 / n as f64; n]),

        WeightingScheme::MarketValue => {
            let prices = latest_prices.ok_or_else(|| PortfolioError::MissingWeightInput {
                scheme: scheme.name().to_string(),
                missing: "latest prices".to_string(),
            })?;
            if prices.len() != n {
                return Err(PortfolioError::WeightMismatch {
                    weights: prices.len(),
                    assets: n,
                });
            }
            normalize(prices.to_vec())
        }

        WeightingScheme::InverseVolatility => {
            let mut inverse_vols = Vec::with_capacity(n);
            for j in 0..n {
                let vol = sample_std(&series.asset_returns(j))?;
                if vol < f64::EPSILON {
                    return Err(tailrisk_math::MathError::division_by_zero(format!(
                        "inverse-volatility weight for asset {}",
                        series.assets()[j]
                    ))
                    .into());
                }
                inverse_vols.push(1.0 / vol);
            }
            normalize(inverse_vols)
        }

        WeightingScheme::Custom(weights) => {
            if weights.len() != n {
                return Err(PortfolioError::WeightMismatch {
                    weights: weights.len(),
                    assets: n,
                });
            }
            let sum: f64 = weights.iter().sum();
            if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
                return Err(tailrisk_core::CoreError::invalid_parameter(format!(
                    "custom weights must sum to 1.0, got {sum:.8}"
                ))
                .into());
            }
            Ok(weights.clone())
        }
    }
}

fn normalize(raw: Vec<f64>) -> PortfolioResult<Vec<f64>> {
    let total: f64 = raw.iter().sum();
    if total < f64::EPSILON {
        return Err(tailrisk_math::MathError::division_by_zero("weight normalization").into());
    }
    Ok(raw.into_iter().map(|v| v / total).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;
    use nalgebra::DMatrix;
    use tailrisk_core::Asset;

    fn two_asset_series() -> ReturnSeries {
        let assets = vec![Asset::new("A"), Asset::new("B")];
        let dates: Vec<NaiveDate> = (0..4)
            .map(|i| NaiveDate::from_ymd_opt(2024, 3, 1).unwrap() + chrono::Days::new(i))
            .collect();
        let returns = DMatrix::from_row_slice(
            4,
            2,
            &[0.01, 0.02, -0.01, 0.01, 0.02, -0.03, 0.00, 0.01],
        );
        ReturnSeries::new(assets, dates, returns).unwrap()
    }

    #[test]
    fn test_portfolio_returns_weighted_sum() {
        let series = two_asset_series();
        let rp = portfolio_returns(&series, &[0.5, 0.5]).unwrap();

        assert_eq!(rp.len(), 4);
        assert_relative_eq!(rp[0], 0.015, epsilon = 1e-12);
        assert_relative_eq!(rp[2], -0.005, epsilon = 1e-12);
    }

    #[test]
    fn test_portfolio_returns_rejects_mismatch() {
        let series = two_asset_series();
        assert!(portfolio_returns(&series, &[1.0]).is_err());
    }

    #[test]
    fn test_equal_weights() {
        let series = two_asset_series();
        let w = resolve_weights(&WeightingScheme::Equal, &series, None).unwrap();
        assert_eq!(w, vec![0.5, 0.5]);
    }

    #[test]
    fn test_market_value_weights() {
        let series = two_asset_series();
        let w =
            resolve_weights(&WeightingScheme::MarketValue, &series, Some(&[300.0, 100.0])).unwrap();
        assert_relative_eq!(w[0], 0.75, epsilon = 1e-12);
        assert_relative_eq!(w[1], 0.25, epsilon = 1e-12);
    }

    #[test]
    fn test_market_value_requires_prices() {
        let series = two_asset_series();
        let result = resolve_weights(&WeightingScheme::MarketValue, &series, None);
        assert!(matches!(
            result,
            Err(PortfolioError::MissingWeightInput { .. })
        ));
    }

    #[test]
    fn test_inverse_volatility_weights() {
        let series = two_asset_series();
        let w = resolve_weights(&WeightingScheme::InverseVolatility, &series, None).unwrap();

        assert_relative_eq!(w.iter().sum::<f64>(), 1.0, epsilon = 1e-12);
        // Asset A has the calmer history, so it gets the larger weight
        assert!(w[0] > w[1]);
    }

    #[test]
    fn test_custom_weights_validated() {
        let series = two_asset_series();
        let w = resolve_weights(&WeightingScheme::Custom(vec![0.3, 0.7]), &series, None).unwrap();
        assert_eq!(w, vec![0.3, 0.7]);

        assert!(resolve_weights(&WeightingScheme::Custom(vec![0.3, 0.3]), &series, None).is_err());
        assert!(resolve_weights(&WeightingScheme::Custom(vec![1.0]), &series, None).is_err());
    }
}

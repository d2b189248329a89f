//! Monte Carlo simulation VaR.

use nalgebra::DVector;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, StandardNormal};
use serde::{Deserialize, Serialize};

use tailrisk_math::linear_algebra::cholesky_factor;
use tailrisk_math::statistics::quantile;

use super::{loss_decimal, validate_var_inputs, VaRMethod, VaRResult};
use crate::covariance::CovarianceMatrix;
use crate::error::{RiskError, RiskResult};

/// Default number of Monte Carlo draws.
pub const DEFAULT_SIMULATIONS: usize = 10_000;

/// Draws are generated in fixed-size blocks, each with its own generator
/// derived from the base seed, so the result is identical whether blocks
/// run sequentially or across rayon workers.
const SIMULATION_CHUNK: usize = 1024;

/// Monte Carlo simulation parameters.
///
/// Both knobs are explicit inputs: there is no hidden global generator,
/// and two runs with the same seed and inputs are bit-identical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonteCarloConfig {
    /// Number of scenario draws.
    pub simulations: usize,
    /// Seed for reproducible runs; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for MonteCarloConfig {
    fn default() -> Self {
        Self {
            simulations: DEFAULT_SIMULATIONS,
            seed: None,
        }
    }
}

impl MonteCarloConfig {
    /// Config with an explicit seed and the default draw count.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            simulations: DEFAULT_SIMULATIONS,
            seed: Some(seed),
        }
    }

    /// Overrides the number of draws.
    #[must_use]
    pub fn with_simulations(mut self, simulations: usize) -> Self {
        self.simulations = simulations;
        self
    }
}

/// Calculates Monte Carlo VaR for a weighted portfolio.
///
/// Draws `simulations` independent multivariate-normal scenarios with the
/// given daily mean vector and covariance, scaled to the horizon
/// (`μ·h`, `Σ·h` via the Cholesky factor times `√h`), then takes the same
/// empirical loss quantile as the historical method.
///
/// Scenario draws that come out non-finite are discarded; if more than
/// half the requested draws are lost the whole batch fails with
/// `NumericalInstability` rather than quietly reporting a thin estimate.
///
/// # Errors
///
/// Returns `InvalidParameter` for out-of-range scalars or mismatched
/// dimensions, `Simulation` for a zero draw count, and
/// `NumericalInstability` for a covariance that cannot be factorized or a
/// batch dominated by degenerate draws.
pub fn monte_carlo_var(
    weights: &[f64],
    mean_returns: &DVector<f64>,
    covariance: &CovarianceMatrix,
    portfolio_value: f64,
    confidence_level: f64,
    horizon_days: u32,
    config: MonteCarloConfig,
) -> RiskResult<VaRResult> {
    validate_var_inputs(portfolio_value, confidence_level)?;
    if weights.len() != covariance.num_assets() || weights.len() != mean_returns.len() {
        return Err(RiskError::invalid_parameter(format!(
            "weights ({}), means ({}) and covariance ({}) disagree in size",
            weights.len(),
            mean_returns.len(),
            covariance.num_assets()
        )));
    }
    if horizon_days == 0 {
        return Err(RiskError::invalid_parameter(
            "time horizon must be at least 1 trading day",
        ));
    }
    if config.simulations == 0 {
        return Err(RiskError::simulation("simulation count must be at least 1"));
    }

    let n = weights.len();
    let h = f64::from(horizon_days);
    let factor = cholesky_factor(covariance.matrix())? * h.sqrt();
    let horizon_mean = mean_returns * h;
    let w = DVector::from_row_slice(weights);

    let base_seed = config.seed.unwrap_or_else(rand::random::<u64>);
    let simulations = config.simulations;
    let chunks = simulations.div_ceil(SIMULATION_CHUNK);

    let simulate_chunk = |chunk: usize| -> Vec<f64> {
        let start = chunk * SIMULATION_CHUNK;
        let count = SIMULATION_CHUNK.min(simulations - start);
        let mut rng = StdRng::seed_from_u64(base_seed.wrapping_add(chunk as u64));

        let mut losses = Vec::with_capacity(count);
        for _ in 0..count {
            let shocks: DVector<f64> = DVector::from_fn(n, |_, _| StandardNormal.sample(&mut rng));
            let scenario = &horizon_mean + &factor * shocks;
            let portfolio_return = w.dot(&scenario);
            losses.push(-portfolio_value * portfolio_return);
        }
        losses
    };

    #[cfg(feature = "parallel")]
    let raw: Vec<f64> = {
        use rayon::prelude::*;
        (0..chunks)
            .into_par_iter()
            .map(simulate_chunk)
            .collect::<Vec<_>>()
            .into_iter()
            .flatten()
            .collect()
    };

    #[cfg(not(feature = "parallel"))]
    let raw: Vec<f64> = (0..chunks).flat_map(simulate_chunk).collect();

    let losses: Vec<f64> = raw.into_iter().filter(|l| l.is_finite()).collect();
    if losses.len() * 2 < simulations {
        return Err(RiskError::numerical_instability(format!(
            "{} of {} Monte Carlo draws were degenerate",
            simulations - losses.len(),
            simulations
        )));
    }

    let var = quantile(&losses, confidence_level)?.max(0.0);

    Ok(VaRResult {
        var: loss_decimal(var),
        confidence_level,
        horizon_days,
        method: VaRMethod::MonteCarlo,
        distribution: Some(losses),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;
    use nalgebra::DMatrix;
    use tailrisk_core::{Asset, ReturnSeries};

    use crate::var::parametric_var;

    fn test_series() -> ReturnSeries {
        let dates: Vec<NaiveDate> = (0..8)
            .map(|i| NaiveDate::from_ymd_opt(2024, 2, 1).unwrap() + chrono::Days::new(i))
            .collect();
        let returns = DMatrix::from_row_slice(
            8,
            2,
            &[
                0.012, -0.004, -0.008, 0.009, 0.005, -0.011, -0.002, 0.006, 0.010, -0.007, -0.006,
                0.003, 0.004, -0.002, -0.009, 0.008,
            ],
        );
        ReturnSeries::new(vec![Asset::new("A"), Asset::new("B")], dates, returns).unwrap()
    }

    #[test]
    fn test_same_seed_bit_identical() {
        let series = test_series();
        let cov = CovarianceMatrix::sample(&series).unwrap();
        let means = series.mean_returns();
        let config = MonteCarloConfig::seeded(7).with_simulations(5_000);

        let a = monte_carlo_var(&[0.5, 0.5], &means, &cov, 1_000_000.0, 0.95, 1, config).unwrap();
        let b = monte_carlo_var(&[0.5, 0.5], &means, &cov, 1_000_000.0, 0.95, 1, config).unwrap();

        assert_eq!(a.var, b.var);
        assert_eq!(a.distribution, b.distribution);
    }

    #[test]
    fn test_different_seeds_differ() {
        let series = test_series();
        let cov = CovarianceMatrix::sample(&series).unwrap();
        let means = series.mean_returns();

        let a = monte_carlo_var(
            &[0.5, 0.5],
            &means,
            &cov,
            1_000_000.0,
            0.95,
            1,
            MonteCarloConfig::seeded(1).with_simulations(2_000),
        )
        .unwrap();
        let b = monte_carlo_var(
            &[0.5, 0.5],
            &means,
            &cov,
            1_000_000.0,
            0.95,
            1,
            MonteCarloConfig::seeded(2).with_simulations(2_000),
        )
        .unwrap();

        assert_ne!(a.var, b.var);
    }

    #[test]
    fn test_unseeded_run_succeeds() {
        let series = test_series();
        let cov = CovarianceMatrix::sample(&series).unwrap();
        let means = series.mean_returns();

        let result = monte_carlo_var(
            &[0.5, 0.5],
            &means,
            &cov,
            1_000_000.0,
            0.95,
            1,
            MonteCarloConfig::default().with_simulations(1_000),
        );
        assert!(result.is_ok());
        assert!(result.unwrap().amount() >= 0.0);
    }

    #[test]
    fn test_converges_to_parametric() {
        let series = test_series();
        let cov = CovarianceMatrix::sample(&series).unwrap();
        let means = series.mean_returns();
        let weights = [0.5, 0.5];

        let parametric =
            parametric_var(&weights, &means, &cov, 1_000_000.0, 0.95, 1).unwrap();
        let mc = monte_carlo_var(
            &weights,
            &means,
            &cov,
            1_000_000.0,
            0.95,
            1,
            MonteCarloConfig::seeded(42).with_simulations(100_000),
        )
        .unwrap();

        // Both methods see the same normal distribution; at 100k draws the
        // empirical quantile sits within 2% of the closed form.
        assert_relative_eq!(
            mc.amount(),
            parametric.amount(),
            max_relative = 0.02
        );
    }

    #[test]
    fn test_zero_simulations_rejected() {
        let series = test_series();
        let cov = CovarianceMatrix::sample(&series).unwrap();
        let means = series.mean_returns();

        let result = monte_carlo_var(
            &[0.5, 0.5],
            &means,
            &cov,
            1_000_000.0,
            0.95,
            1,
            MonteCarloConfig::default().with_simulations(0),
        );
        assert!(matches!(result, Err(RiskError::Simulation { .. })));
    }

    #[test]
    fn test_distribution_length_matches_draws() {
        let series = test_series();
        let cov = CovarianceMatrix::sample(&series).unwrap();
        let means = series.mean_returns();

        let result = monte_carlo_var(
            &[0.5, 0.5],
            &means,
            &cov,
            1_000_000.0,
            0.95,
            1,
            MonteCarloConfig::seeded(3).with_simulations(2_500),
        )
        .unwrap();
        assert_eq!(result.distribution.unwrap().len(), 2_500);
    }
}

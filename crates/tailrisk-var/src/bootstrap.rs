//! Bootstrap-enhanced historical VaR.
//!
//! Resamples the portfolio return series with replacement, recomputes
//! historical VaR on each resample, and summarizes the sampling
//! distribution of the estimator as a mean, standard error, and
//! confidence interval.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use tailrisk_math::statistics::{mean, sample_std};

use crate::error::{RiskError, RiskResult};
use crate::var::{historical_var_amount, loss_decimal, validate_var_inputs};

/// Default number of bootstrap resamples.
pub const DEFAULT_BOOTSTRAP_DRAWS: usize = 1000;

/// z-score for the reported 95% confidence interval.
const CI_Z: f64 = 1.96;

/// Bootstrap resampling parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BootstrapConfig {
    /// Number of resamples.
    pub draws: usize,
    /// Observations per resample; `None` uses the original series length.
    pub sample_size: Option<usize>,
    /// Seed for reproducible runs; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            draws: DEFAULT_BOOTSTRAP_DRAWS,
            sample_size: None,
            seed: None,
        }
    }
}

impl BootstrapConfig {
    /// Config with an explicit seed and the default draw count.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    /// Overrides the number of resamples.
    #[must_use]
    pub fn with_draws(mut self, draws: usize) -> Self {
        self.draws = draws;
        self
    }

    /// Overrides the resample size.
    #[must_use]
    pub fn with_sample_size(mut self, sample_size: usize) -> Self {
        self.sample_size = Some(sample_size);
        self
    }
}

/// Bootstrap summary of the historical VaR sampling distribution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BootstrapVaR {
    /// Mean of the resampled VaR estimates (currency units).
    pub var: Decimal,
    /// Standard deviation of the resampled estimates.
    pub std_error: f64,
    /// Normal-approximation 95% confidence interval, floored at zero.
    pub confidence_interval: (f64, f64),
    /// Number of resamples behind the summary.
    pub draws: usize,
    /// Confidence level of the underlying historical VaR.
    pub confidence_level: f64,
    /// Time horizon in trading days.
    pub horizon_days: u32,
}

impl BootstrapVaR {
    /// The mean VaR estimate as an `f64`.
    #[must_use]
    pub fn amount(&self) -> f64 {
        self.var.to_f64().unwrap_or(0.0)
    }
}

/// Bootstrap-enhanced historical VaR.
///
/// Draws `config.draws` resamples with replacement from the return series
/// (each of the original length unless `sample_size` overrides it),
/// computes historical VaR on every resample, and reports the mean,
/// standard error, and a 95% confidence interval of the estimates.
///
/// Seeding behaves exactly like the Monte Carlo method: an explicit seed
/// makes runs bit-identical, no seed still succeeds.
///
/// # Errors
///
/// Returns the historical method's validation errors, plus `Simulation`
/// when `draws` or the resample size is too small to summarize.
pub fn bootstrap_var(
    returns: &[f64],
    portfolio_value: f64,
    confidence_level: f64,
    horizon_days: u32,
    config: BootstrapConfig,
) -> RiskResult<BootstrapVaR> {
    validate_var_inputs(portfolio_value, confidence_level)?;
    if returns.len() < 2 {
        return Err(RiskError::insufficient_data(2, returns.len()));
    }
    if config.draws < 2 {
        return Err(RiskError::simulation(
            "bootstrap needs at least 2 draws to summarize",
        ));
    }
    let sample_size = config.sample_size.unwrap_or(returns.len());
    if sample_size < 2 {
        return Err(RiskError::simulation(
            "bootstrap resample size must be at least 2",
        ));
    }

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::seed_from_u64(rand::random::<u64>()),
    };

    let mut estimates = Vec::with_capacity(config.draws);
    let mut resample = vec![0.0; sample_size];
    for _ in 0..config.draws {
        for slot in &mut resample {
            *slot = returns[rng.gen_range(0..returns.len())];
        }
        estimates.push(historical_var_amount(
            &resample,
            portfolio_value,
            confidence_level,
            horizon_days,
        )?);
    }

    let center = mean(&estimates)?;
    let spread = sample_std(&estimates)?;

    Ok(BootstrapVaR {
        var: loss_decimal(center),
        std_error: spread,
        confidence_interval: (
            (center - CI_Z * spread).max(0.0),
            center + CI_Z * spread,
        ),
        draws: config.draws,
        confidence_level,
        horizon_days,
    })
}

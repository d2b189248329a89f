//! Property-based tests for risk-engine invariants.
//!
//! These tests verify key mathematical properties that should always hold:
//! - Component VaR contributions sum to total parametric VaR
//! - VaR is monotone in the confidence level
//! - Correlation matrices have a unit diagonal and bounded entries
//! - Seeded simulations are reproducible

use chrono::NaiveDate;
use nalgebra::DMatrix;

use tailrisk_core::{Asset, ReturnSeries};
use tailrisk_var::prelude::*;
use tailrisk_var::component_var;

// =============================================================================
// TEST DATA GENERATORS
// =============================================================================

/// Simple deterministic hash for test data generation.
fn simple_hash(seed: u64, i: u64) -> u64 {
    let mut x = seed.wrapping_add(i).wrapping_mul(0x517cc1b727220a95);
    x ^= x >> 32;
    x = x.wrapping_mul(0x517cc1b727220a95);
    x ^= x >> 32;
    x
}

/// Pseudo-random return in roughly [-3%, +3%], deterministic per (seed, i).
fn pseudo_return(seed: u64, i: u64) -> f64 {
    let h = simple_hash(seed, i);
    ((h % 60_000) as f64 / 1_000.0 - 30.0) / 1_000.0
}

/// Generates an n-asset, t-period return series with varying texture.
fn generate_series(n: usize, t: usize, seed: u64) -> ReturnSeries {
    let assets: Vec<Asset> = (0..n).map(|i| Asset::new(format!("A{i}"))).collect();
    let dates: Vec<NaiveDate> = (0..t)
        .map(|i| NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + chrono::Days::new(i as u64))
        .collect();
    let returns = DMatrix::from_fn(t, n, |row, col| {
        pseudo_return(seed.wrapping_add(col as u64 * 7919), row as u64)
    });
    ReturnSeries::new(assets, dates, returns).unwrap()
}

/// Generates a normalized long-only weight vector.
fn generate_weights(n: usize, seed: u64) -> Vec<f64> {
    let raw: Vec<f64> = (0..n)
        .map(|i| 1.0 + (simple_hash(seed, i as u64) % 1000) as f64 / 100.0)
        .collect();
    let total: f64 = raw.iter().sum();
    raw.into_iter().map(|w| w / total).collect()
}

const VALUE: f64 = 1_000_000.0;

// =============================================================================
// PROPERTY: COMPONENT VAR SUMS TO TOTAL
// =============================================================================

#[test]
fn property_component_var_sums_to_parametric_total() {
    for seed in 0..10 {
        for n in [2, 3, 5, 8] {
            let series = generate_series(n, 120, seed);
            let weights = generate_weights(n, seed + 1);
            let cov = CovarianceMatrix::sample(&series).unwrap();
            let means = series.mean_returns();

            let total = parametric_var(&weights, &means, &cov, VALUE, 0.95, 1)
                .unwrap()
                .amount();
            let component = component_var(
                series.assets(),
                &weights,
                &means,
                &cov,
                VALUE,
                0.95,
                1,
            )
            .unwrap();

            let sum = component.contribution_sum();
            assert!(
                (sum - total).abs() <= total.abs().max(1.0) * 1e-6,
                "contributions {} != total {} for n={}, seed={}",
                sum,
                total,
                n,
                seed
            );
        }
    }
}

// =============================================================================
// PROPERTY: VAR IS MONOTONE IN CONFIDENCE
// =============================================================================

#[test]
fn property_historical_var_monotone_in_confidence() {
    for seed in 0..10 {
        let series = generate_series(1, 200, seed);
        let returns = series.asset_returns(0);

        let mut last = 0.0;
        for confidence in [0.80, 0.90, 0.95, 0.975, 0.99] {
            let var = historical_var(&returns, VALUE, confidence, 1)
                .unwrap()
                .amount();
            assert!(
                var + 1e-9 >= last,
                "historical VaR fell from {} to {} at {} for seed={}",
                last,
                var,
                confidence,
                seed
            );
            last = var;
        }
    }
}

#[test]
fn property_parametric_var_monotone_in_confidence() {
    for seed in 0..10 {
        let series = generate_series(3, 60, seed);
        let weights = generate_weights(3, seed);
        let cov = CovarianceMatrix::sample(&series).unwrap();
        let means = series.mean_returns();

        let mut last = f64::NEG_INFINITY;
        for confidence in [0.85, 0.90, 0.95, 0.99, 0.995] {
            let var = parametric_var(&weights, &means, &cov, VALUE, confidence, 1)
                .unwrap()
                .amount();
            assert!(
                var >= last,
                "parametric VaR fell at {} for seed={}",
                confidence,
                seed
            );
            last = var;
        }
    }
}

// =============================================================================
// PROPERTY: CORRELATION MATRIX SHAPE
// =============================================================================

#[test]
fn property_correlation_unit_diagonal_bounded_entries() {
    for seed in 0..10 {
        for n in [2, 4, 6] {
            let series = generate_series(n, 90, seed);
            let cov = CovarianceMatrix::sample(&series).unwrap();
            let corr = cov.correlation().unwrap();

            for i in 0..n {
                assert_eq!(
                    corr[(i, i)],
                    1.0,
                    "diagonal not exactly 1.0 for n={}, seed={}",
                    n,
                    seed
                );
                for j in 0..n {
                    let c = corr[(i, j)];
                    assert!(
                        (-1.0..=1.0).contains(&c),
                        "correlation {} out of bounds for n={}, seed={}",
                        c,
                        n,
                        seed
                    );
                }
            }
        }
    }
}

// =============================================================================
// PROPERTY: EWMA COVARIANCE STAYS WELL-FORMED
// =============================================================================

#[test]
fn property_ewma_diagonal_positive_across_lambdas() {
    for seed in 0..5 {
        let series = generate_series(3, 100, seed);
        for lambda in [0.85, 0.90, DEFAULT_EWMA_LAMBDA, 0.97] {
            let ewma = CovarianceMatrix::ewma(&series, lambda).unwrap();
            assert!(
                ewma.matrix().diagonal().iter().all(|v| *v > 0.0),
                "non-positive EWMA variance for lambda={}, seed={}",
                lambda,
                seed
            );
        }
    }
}

// =============================================================================
// PROPERTY: SEEDED SIMULATION REPRODUCIBILITY
// =============================================================================

#[test]
fn property_monte_carlo_seed_determinism() {
    for seed in 0..5 {
        let series = generate_series(3, 80, seed);
        let weights = generate_weights(3, seed);
        let cov = CovarianceMatrix::sample(&series).unwrap();
        let means = series.mean_returns();
        let config = MonteCarloConfig::seeded(seed).with_simulations(4_000);

        let a = monte_carlo_var(&weights, &means, &cov, VALUE, 0.95, 1, config).unwrap();
        let b = monte_carlo_var(&weights, &means, &cov, VALUE, 0.95, 1, config).unwrap();

        assert_eq!(a.var, b.var, "seeded MC differed for seed={}", seed);
    }
}

#[test]
fn property_historical_var_never_negative() {
    for seed in 0..20 {
        let series = generate_series(1, 50, seed);
        let returns = series.asset_returns(0);
        for confidence in [0.5, 0.9, 0.99] {
            let var = historical_var(&returns, VALUE, confidence, 1)
                .unwrap()
                .amount();
            assert!(var >= 0.0);
        }
    }
}

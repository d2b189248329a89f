//! Descriptive statistics and empirical quantiles.

use crate::error::{MathError, MathResult};

/// Arithmetic mean.
///
/// # Errors
///
/// Returns an error for an empty slice.
pub fn mean(values: &[f64]) -> MathResult<f64> {
    if values.is_empty() {
        return Err(MathError::insufficient_data(1, 0));
    }
    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

/// Unbiased sample variance (denominator `n - 1`).
///
/// # Errors
///
/// Returns an error for fewer than two observations.
pub fn sample_variance(values: &[f64]) -> MathResult<f64> {
    if values.len() < 2 {
        return Err(MathError::insufficient_data(2, values.len()));
    }
    let m = mean(values)?;
    let sum_sq: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    Ok(sum_sq / (values.len() - 1) as f64)
}

/// Unbiased sample standard deviation.
///
/// # Errors
///
/// Returns an error for fewer than two observations.
pub fn sample_std(values: &[f64]) -> MathResult<f64> {
    Ok(sample_variance(values)?.sqrt())
}

/// Empirical quantile with linear interpolation between order statistics.
///
/// Uses the `rank = p * (n - 1)` convention: the result interpolates
/// between the two order statistics straddling the rank, so quantiles vary
/// continuously in `p`.
///
/// # Arguments
///
/// * `values` - Sample, in any order
/// * `p` - Probability in `[0, 1]`
///
/// # Errors
///
/// Returns an error for an empty sample or `p` outside `[0, 1]`.
pub fn quantile(values: &[f64], p: f64) -> MathResult<f64> {
    if values.is_empty() {
        return Err(MathError::insufficient_data(1, 0));
    }
    if !(0.0..=1.0).contains(&p) {
        return Err(MathError::invalid_input(format!(
            "quantile probability must be in [0, 1], got {p}"
        )));
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    if sorted.len() == 1 {
        return Ok(sorted[0]);
    }

    let rank = p * (sorted.len() as f64 - 1.0);
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        Ok(sorted[lo])
    } else {
        let w = rank - lo as f64;
        Ok(sorted[lo] + w * (sorted[hi] - sorted[lo]))
    }
}

/// First four sample moments: `(mean, std, skewness, excess kurtosis)`.
///
/// Central moments use the population (`1/n`) normalization. A sample with
/// zero spread reports zero skewness and excess kurtosis rather than NaN.
///
/// # Errors
///
/// Returns an error for fewer than two observations.
pub fn sample_moments(values: &[f64]) -> MathResult<(f64, f64, f64, f64)> {
    if values.len() < 2 {
        return Err(MathError::insufficient_data(2, values.len()));
    }

    let n = values.len() as f64;
    let m = values.iter().sum::<f64>() / n;

    let mut m2 = 0.0;
    let mut m3 = 0.0;
    let mut m4 = 0.0;
    for &x in values {
        let d = x - m;
        let d2 = d * d;
        m2 += d2;
        m3 += d2 * d;
        m4 += d2 * d2;
    }
    m2 /= n;
    m3 /= n;
    m4 /= n;

    if m2 <= 1.0e-16 {
        return Ok((m, 0.0, 0.0, 0.0));
    }

    let std = m2.sqrt();
    let skew = m3 / m2.powf(1.5);
    let excess_kurtosis = m4 / (m2 * m2) - 3.0;
    Ok((m, std, skew, excess_kurtosis))
}

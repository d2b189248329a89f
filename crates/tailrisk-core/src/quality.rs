//! Data-quality checks on return histories.
//!
//! The data provider is responsible for alignment and gap handling; these
//! checks validate what it hands over before the risk engine consumes it.

use crate::error::{CoreError, CoreResult};
use crate::types::ReturnSeries;

/// Outlier detection rule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutlierMethod {
    /// Flag values outside `[Q1 - k*IQR, Q3 + k*IQR]`.
    Iqr {
        /// Fence multiplier, conventionally 1.5.
        multiplier: f64,
    },
    /// Flag values more than `threshold` standard deviations from the mean.
    ZScore {
        /// Distance threshold in standard deviations, conventionally 3.0.
        threshold: f64,
    },
}

/// Validates a return history for downstream risk use.
///
/// Checks that the series carries at least `min_observations` periods and
/// that no asset's return column is constant (a constant column produces a
/// zero variance and a rank-deficient covariance).
///
/// # Errors
///
/// Returns `InsufficientData` or `InvalidParameter` describing the failure.
pub fn quality_check(series: &ReturnSeries, min_observations: usize) -> CoreResult<()> {
    if series.num_periods() < min_observations {
        return Err(CoreError::insufficient_data(
            min_observations,
            series.num_periods(),
        ));
    }

    for (j, asset) in series.assets().iter().enumerate() {
        let column = series.asset_returns(j);
        let first = column[0];
        if column.iter().all(|r| (*r - first).abs() < f64::EPSILON) {
            return Err(CoreError::invalid_parameter(format!(
                "constant return series for asset {asset}"
            )));
        }
    }

    Ok(())
}

/// Flags outliers in a single return column.
///
/// Returns one flag per input value. Values in a column with zero spread
/// are never flagged.
#[must_use]
pub fn detect_outliers(values: &[f64], method: OutlierMethod) -> Vec<bool> {
    if values.len() < 2 {
        return vec![false; values.len()];
    }

    match method {
        OutlierMethod::Iqr { multiplier } => {
            let mut sorted = values.to_vec();
            sorted.sort_by(|a, b| a.total_cmp(b));
            let q1 = percentile(&sorted, 0.25);
            let q3 = percentile(&sorted, 0.75);
            let iqr = q3 - q1;
            let lower = q1 - multiplier * iqr;
            let upper = q3 + multiplier * iqr;
            values.iter().map(|v| *v < lower || *v > upper).collect()
        }
        OutlierMethod::ZScore { threshold } => {
            let n = values.len() as f64;
            let mean = values.iter().sum::<f64>() / n;
            let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
            let std = var.sqrt();
            if std < f64::EPSILON {
                return vec![false; values.len()];
            }
            values
                .iter()
                .map(|v| ((v - mean) / std).abs() > threshold)
                .collect()
        }
    }
}

/// Linear-interpolated percentile of pre-sorted data.
fn percentile(sorted: &[f64], p: f64) -> f64 {
    let rank = p * (sorted.len() as f64 - 1.0);
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        sorted[lo]
    } else {
        let w = rank - lo as f64;
        sorted[lo] + w * (sorted[hi] - sorted[lo])
    }
}

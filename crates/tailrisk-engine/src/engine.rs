//! The risk engine facade: one request in, one report out.

use tailrisk_core::{Portfolio, ReturnSeries};
use tailrisk_portfolio::{performance_metrics, portfolio_returns};
use tailrisk_var::{
    bootstrap_var, component_var, historical_expected_shortfall, historical_var, monte_carlo_var,
    parametric_expected_shortfall, parametric_var, CovarianceMatrix, MonteCarloConfig, VaRMethod,
    VaRResult,
};

use crate::config::RiskEngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::report::{ExpectedShortfallSummary, MatrixView, RiskReport};
use crate::request::{CovarianceChoice, RiskRequest};

/// The in-process risk engine.
///
/// Holds nothing but configuration defaults; every analysis is a pure
/// function of the request and the supplied return history, so one engine
/// can serve concurrent callers freely.
#[derive(Debug, Clone, Default)]
pub struct RiskEngine {
    config: RiskEngineConfig,
}

impl RiskEngine {
    /// Creates an engine with explicit configuration.
    #[must_use]
    pub fn new(config: RiskEngineConfig) -> Self {
        Self { config }
    }

    /// The engine's configuration defaults.
    #[must_use]
    pub fn config(&self) -> &RiskEngineConfig {
        &self.config
    }

    /// Runs a risk request against an aligned return history.
    ///
    /// The history must carry exactly the request's assets, in order.
    /// Alignment is the data provider's contract; a mismatch here is an
    /// error rather than a silent reordering.
    ///
    /// # Errors
    ///
    /// Propagates boundary-validation and calculation errors from the
    /// underlying crates; no partial report is ever produced.
    pub fn analyze(&self, request: &RiskRequest, series: &ReturnSeries) -> EngineResult<RiskReport> {
        if series.assets() != request.assets.as_slice() {
            return Err(EngineError::DataMismatch(format!(
                "return history covers {:?}, request asks for {:?}",
                series.assets(),
                request.assets
            )));
        }

        // Fail fast on the portfolio invariants before any computation
        let portfolio = Portfolio::new(
            request.assets.clone(),
            request.weights.clone(),
            request.portfolio_value,
            request.time_horizon,
            request.confidence_level,
        )?;

        let methods = request.methods.methods();
        tracing::info!(
            assets = portfolio.num_assets(),
            periods = series.num_periods(),
            ?methods,
            "running risk analysis"
        );

        let returns = portfolio_returns(series, portfolio.weights())?;
        let means = series.mean_returns();

        let needs_covariance = methods
            .iter()
            .any(|m| matches!(m, VaRMethod::Parametric | VaRMethod::MonteCarlo))
            || request.include_components
            || request.include_matrices
            || request.include_expected_shortfall;

        let covariance = if needs_covariance {
            Some(self.estimate_covariance(request, series)?)
        } else {
            None
        };

        let mut var_results: Vec<VaRResult> = Vec::with_capacity(methods.len());
        for method in methods {
            let result = match method {
                VaRMethod::Historical => historical_var(
                    &returns,
                    portfolio.value(),
                    portfolio.confidence_level(),
                    portfolio.time_horizon(),
                )?,
                VaRMethod::Parametric => parametric_var(
                    portfolio.weights(),
                    &means,
                    require_covariance(&covariance)?,
                    portfolio.value(),
                    portfolio.confidence_level(),
                    portfolio.time_horizon(),
                )?,
                VaRMethod::MonteCarlo => {
                    let config = request.monte_carlo.unwrap_or(MonteCarloConfig {
                        simulations: self.config.simulations,
                        seed: None,
                    });
                    monte_carlo_var(
                        portfolio.weights(),
                        &means,
                        require_covariance(&covariance)?,
                        portfolio.value(),
                        portfolio.confidence_level(),
                        portfolio.time_horizon(),
                        config,
                    )?
                }
            };
            tracing::debug!(%result, "method complete");
            var_results.push(result);
        }

        let components = if request.include_components {
            let cov = require_covariance(&covariance)?;
            Some(component_var(
                portfolio.assets(),
                portfolio.weights(),
                &means,
                cov,
                portfolio.value(),
                portfolio.confidence_level(),
                portfolio.time_horizon(),
            )?)
        } else {
            None
        };

        let performance = if request.include_performance {
            Some(performance_metrics(&returns, self.config.risk_free_rate)?)
        } else {
            None
        };

        let expected_shortfall = if request.include_expected_shortfall {
            let cov = require_covariance(&covariance)?;
            Some(ExpectedShortfallSummary {
                historical: historical_expected_shortfall(
                    &returns,
                    portfolio.value(),
                    portfolio.confidence_level(),
                    portfolio.time_horizon(),
                )?,
                parametric: parametric_expected_shortfall(
                    portfolio.weights(),
                    &means,
                    cov,
                    portfolio.value(),
                    portfolio.confidence_level(),
                    portfolio.time_horizon(),
                )?,
            })
        } else {
            None
        };

        let bootstrap = match request.bootstrap {
            Some(config) => Some(bootstrap_var(
                &returns,
                portfolio.value(),
                portfolio.confidence_level(),
                portfolio.time_horizon(),
                config,
            )?),
            None => None,
        };

        let (covariance_view, correlation_view) = if request.include_matrices {
            let cov = require_covariance(&covariance)?;
            let correlation = cov.correlation()?;
            (
                Some(matrix_view(series, cov.matrix())),
                Some(matrix_view(series, &correlation)),
            )
        } else {
            (None, None)
        };

        Ok(RiskReport {
            var_results,
            component_var: components,
            performance,
            expected_shortfall,
            bootstrap,
            covariance: covariance_view,
            correlation: correlation_view,
        })
    }

    fn estimate_covariance(
        &self,
        request: &RiskRequest,
        series: &ReturnSeries,
    ) -> EngineResult<CovarianceMatrix> {
        let covariance = match request.covariance {
            CovarianceChoice::Sample => CovarianceMatrix::sample(series)?,
            CovarianceChoice::Ewma { lambda } => {
                CovarianceMatrix::ewma(series, lambda.unwrap_or(self.config.ewma_lambda))?
            }
        };
        Ok(covariance)
    }
}

/// A covariance-dependent section was reached; the estimate must exist.
fn require_covariance(covariance: &Option<CovarianceMatrix>) -> EngineResult<&CovarianceMatrix> {
    covariance.as_ref().ok_or_else(|| {
        EngineError::InvalidRequest(
            "covariance-based section requested without a covariance estimate".to_string(),
        )
    })
}

fn matrix_view(series: &ReturnSeries, matrix: &nalgebra::DMatrix<f64>) -> MatrixView {
    MatrixView {
        assets: series.assets().to_vec(),
        rows: (0..matrix.nrows())
            .map(|i| (0..matrix.ncols()).map(|j| matrix[(i, j)]).collect())
            .collect(),
    }
}

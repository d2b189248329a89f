//! Portfolio weighting schemes.

use serde::{Deserialize, Serialize};

/// How portfolio weights are assigned across assets.
///
/// The scheme is resolved into a concrete weight vector by the portfolio
/// aggregation layer, which has access to the return history and latest
/// prices it may need.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum WeightingScheme {
    /// Equal weight across all assets.
    #[default]
    Equal,

    /// Weight proportional to the latest observed price.
    MarketValue,

    /// Weight inversely proportional to historical volatility
    /// (simplified risk parity).
    InverseVolatility,

    /// Caller-supplied weights, used verbatim after validation.
    Custom(Vec<f64>),
}

impl WeightingScheme {
    /// Returns a human-readable name for the scheme.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Equal => "Equal Weight",
            Self::MarketValue => "Market Value",
            Self::InverseVolatility => "Inverse Volatility",
            Self::Custom(_) => "Custom",
        }
    }
}

impl std::fmt::Display for WeightingScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

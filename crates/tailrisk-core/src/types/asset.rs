//! Asset identifier type.

use serde::{Deserialize, Serialize};

/// An asset identified by its ticker symbol.
///
/// Assets are immutable once constructed and are referenced by
/// [`Portfolio`](crate::types::Portfolio) and
/// [`ReturnSeries`](crate::types::ReturnSeries).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Asset(String);

impl Asset {
    /// Creates an asset from a ticker symbol.
    pub fn new(ticker: impl Into<String>) -> Self {
        Self(ticker.into())
    }

    /// Returns the ticker symbol.
    #[must_use]
    pub fn ticker(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Asset {
    fn from(ticker: &str) -> Self {
        Self::new(ticker)
    }
}

impl From<String> for Asset {
    fn from(ticker: String) -> Self {
        Self(ticker)
    }
}

impl std::fmt::Display for Asset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

//! Core value objects: assets, return histories, portfolios.

mod asset;
mod portfolio;
mod returns;
mod weighting;

pub use asset::Asset;
pub use portfolio::{Portfolio, WEIGHT_SUM_TOLERANCE};
pub use returns::{ReturnMethod, ReturnSeries};
pub use weighting::WeightingScheme;

//! Statistical hypothesis testing
//!
//! The two families of tests the analysis relies on: Shapiro-Wilk for
//! normality and Pearson/Spearman for association. Distribution tails come
//! from `statrs`.


pub use correlation::{correlate, pairwise_complete, pearson, spearman};
pub use distributional::shapiro_wilk;

use crate::StatsError;

/// Generic test result structure
#[derive(Debug, Clone, PartialEq)]
pub struct TestResult {
    /// Test statistic (W, t, ...)
    pub statistic: f64,
    /// p-value
    pub p_value: f64,
    /// Sample size after removing missing values
    pub n: usize,
    /// Test method/name
    pub method: String,
}

/// Convert statrs construction errors to our StatsError
fn convert_error<E: std::fmt::Display>(e: E) -> StatsError {
    StatsError::Distribution(e.to_string())
}

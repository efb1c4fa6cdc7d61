//! Analysis configuration
//!
//! Options are plain structs with defaults that reproduce the standard
//! analysis. They can also be read from TOML; missing keys keep their
//! default values.

use crate::types::CorrelationMethod;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parsing error: {0}")]
    TomlParse(#[from] toml::de::Error),
    #[error("Validation error: {0}")]
    Validation(String),
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Options for the Shapiro-Wilk normality check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalityOptions {
    /// Significance level; a series is normal when p > alpha
    pub alpha: f64,
    /// Smallest sample the test is applied to
    pub min_n: usize,
    /// Largest sample the test is applied to
    pub max_n: usize,
}

impl Default for NormalityOptions {
    fn default() -> Self {
        Self {
            alpha: 0.05,
            min_n: 3,
            max_n: 5000,
        }
    }
}

/// Options for the correlation stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorrelationOptions {
    /// Minimum number of pairwise-complete rows
    pub min_pairs: usize,
    /// Method to use instead of the recommended one
    pub method_override: Option<CorrelationMethod>,
}

impl Default for CorrelationOptions {
    fn default() -> Self {
        Self {
            min_pairs: 3,
            method_override: None,
        }
    }
}

/// Options for a full analysis run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisOptions {
    pub normality: NormalityOptions,
    pub correlation: CorrelationOptions,
    /// Number of bins in composite histograms
    pub histogram_bins: usize,
    /// Result key of the X composite
    pub x_label: String,
    /// Result key of the Y composite
    pub y_label: String,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            normality: NormalityOptions::default(),
            correlation: CorrelationOptions::default(),
            histogram_bins: 20,
            x_label: "X_total".to_string(),
            y_label: "Y_total".to_string(),
        }
    }
}

impl AnalysisOptions {
    /// Parse options from TOML text and validate them
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let options: AnalysisOptions = toml::from_str(content)?;
        options.validate()?;
        Ok(options)
    }

    /// Load options from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let options = Self::from_toml_str(&content)?;
        log::debug!("Loaded analysis options from {}", path.as_ref().display());
        Ok(options)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        let alpha = self.normality.alpha;
        if !(alpha > 0.0 && alpha < 1.0) {
            return Err(ConfigError::Validation(format!(
                "normality.alpha must be in (0, 1), got {}",
                alpha
            )));
        }
        if self.normality.min_n < 3 {
            return Err(ConfigError::Validation(
                "normality.min_n must be at least 3".into(),
            ));
        }
        if self.normality.max_n < self.normality.min_n {
            return Err(ConfigError::Validation(format!(
                "normality.max_n ({}) is below normality.min_n ({})",
                self.normality.max_n, self.normality.min_n
            )));
        }
        if self.correlation.min_pairs < 3 {
            return Err(ConfigError::Validation(
                "correlation.min_pairs must be at least 3".into(),
            ));
        }
        if self.histogram_bins == 0 {
            return Err(ConfigError::Validation(
                "histogram_bins must be positive".into(),
            ));
        }
        if self.x_label.is_empty() || self.y_label.is_empty() || self.x_label == self.y_label {
            return Err(ConfigError::Validation(
                "x_label and y_label must be non-empty and distinct".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let options = AnalysisOptions::default();
        assert!(options.validate().is_ok());
        assert_eq!(options.normality.max_n, 5000);
        assert_eq!(options.correlation.min_pairs, 3);
        assert_eq!(options.histogram_bins, 20);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let options = AnalysisOptions::from_toml_str(
            r#"
            histogram_bins = 10

            [correlation]
            method_override = "Spearman"
            "#,
        )
        .unwrap();

        assert_eq!(options.histogram_bins, 10);
        assert_eq!(
            options.correlation.method_override,
            Some(CorrelationMethod::Spearman)
        );
        assert_eq!(options.correlation.min_pairs, 3);
        assert_eq!(options.normality, NormalityOptions::default());
        assert_eq!(options.x_label, "X_total");
    }

    #[test]
    fn test_invalid_alpha_rejected() {
        let result = AnalysisOptions::from_toml_str("[normality]\nalpha = 1.5\n");
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_too_few_pairs_rejected() {
        let result = AnalysisOptions::from_toml_str("[correlation]\nmin_pairs = 2\n");
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_malformed_toml() {
        let result = AnalysisOptions::from_toml_str("histogram_bins = \"many\"");
        assert!(matches!(result, Err(ConfigError::TomlParse(_))));
    }
}

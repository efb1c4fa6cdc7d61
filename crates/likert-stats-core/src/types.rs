use serde::{Deserialize, Serialize};
use std::fmt;

/// Correlation method used for the association analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CorrelationMethod {
    /// Product-moment correlation on the raw composite scores
    Pearson,
    /// Rank correlation, robust to non-normal and ordinal data
    Spearman,
}

impl CorrelationMethod {
    pub fn name(&self) -> &'static str {
        match self {
            CorrelationMethod::Pearson => "Pearson",
            CorrelationMethod::Spearman => "Spearman",
        }
    }
}

impl fmt::Display for CorrelationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Summary measures of a single numeric series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DescriptiveSummary {
    /// Stable identifier of the series (column name, `X_total`, ...)
    pub label: String,
    /// Number of non-missing values
    pub n: usize,
    pub mean: f64,
    pub median: f64,
    /// Most frequent value; ties resolve to the smallest value
    pub mode: f64,
    pub min: f64,
    pub max: f64,
    /// Sample standard deviation (N-1 denominator), NaN when n = 1
    pub std_dev: f64,
    /// Sample variance (N-1 denominator), NaN when n = 1
    pub variance: f64,
}

/// One row of a frequency table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrequencyRow {
    pub value: f64,
    pub count: usize,
    /// Share of non-missing observations, rounded to 2 decimal places
    pub percentage: f64,
}

/// Outcome class of a normality test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NormalityClass {
    Normal,
    NonNormal,
}

impl fmt::Display for NormalityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NormalityClass::Normal => f.write_str("normal"),
            NormalityClass::NonNormal => f.write_str("non-normal"),
        }
    }
}

/// Shapiro-Wilk result with its classification
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalityResult {
    /// W statistic
    pub statistic: f64,
    pub p_value: f64,
    /// Sample size after dropping missing values
    pub n: usize,
    pub classification: NormalityClass,
    /// Human-readable summary of the test
    pub interpretation: String,
}

/// Normality check outcome; the test only applies to a bounded sample size
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum NormalityOutcome {
    Tested(NormalityResult),
    NotApplicable { n: usize, reason: String },
}

impl NormalityOutcome {
    /// p-value of the test, if it ran
    pub fn p_value(&self) -> Option<f64> {
        match self {
            NormalityOutcome::Tested(result) => Some(result.p_value),
            NormalityOutcome::NotApplicable { .. } => None,
        }
    }

    pub fn is_applicable(&self) -> bool {
        matches!(self, NormalityOutcome::Tested(_))
    }

    /// Text shown in reports for either outcome
    pub fn interpretation(&self) -> &str {
        match self {
            NormalityOutcome::Tested(result) => &result.interpretation,
            NormalityOutcome::NotApplicable { reason, .. } => reason,
        }
    }
}

/// Method chosen from two normality outcomes
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodRecommendation {
    pub method: CorrelationMethod,
    pub rationale: String,
}

/// Correlation test result over the pairwise-complete rows
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationResult {
    /// Correlation coefficient
    pub r: f64,
    /// t statistic with n - 2 degrees of freedom
    pub statistic: f64,
    /// Two-sided p-value
    pub p_value: f64,
    /// Number of valid pairs
    pub n: usize,
    pub method: CorrelationMethod,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Positive,
    Negative,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Positive => f.write_str("positive"),
            Direction::Negative => f.write_str("negative"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Strength {
    Weak,
    Moderate,
    Strong,
}

impl fmt::Display for Strength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strength::Weak => f.write_str("weak"),
            Strength::Moderate => f.write_str("moderate"),
            Strength::Strong => f.write_str("strong"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SignificanceTier {
    /// p < 0.001
    HighlySignificant,
    /// p < 0.01
    VerySignificant,
    /// p < 0.05
    Significant,
    /// p >= 0.05
    NotSignificant,
}

impl SignificanceTier {
    pub fn description(&self) -> &'static str {
        match self {
            SignificanceTier::HighlySignificant => "highly significant (p < 0.001)",
            SignificanceTier::VerySignificant => "very significant (p < 0.01)",
            SignificanceTier::Significant => "significant (p < 0.05)",
            SignificanceTier::NotSignificant => "not significant (p ≥ 0.05)",
        }
    }
}

impl fmt::Display for SignificanceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Qualitative reading of a correlation result
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Interpretation {
    pub direction: Direction,
    pub strength: Strength,
    pub significance: SignificanceTier,
    pub summary: String,
}

/// Equal-width histogram of a series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    /// Bin edges, `counts.len() + 1` entries
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

/// Box-plot summary of a series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxPlotSummary {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    /// Smallest observation within 1.5 IQR below Q1
    pub lower_whisker: f64,
    /// Largest observation within 1.5 IQR above Q3
    pub upper_whisker: f64,
    pub outliers: Vec<f64>,
}

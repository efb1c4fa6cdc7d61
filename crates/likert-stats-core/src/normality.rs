//! Normality checker
//!
//! Wraps the Shapiro-Wilk test with the sample-size gate and the
//! classification used by the method recommender.

use crate::config::NormalityOptions;
use crate::descriptive::filter_nan;
use crate::tests::shapiro_wilk;
use crate::types::{NormalityClass, NormalityOutcome, NormalityResult};

/// Message reported when the sample size is outside the test's range
pub const NOT_APPLICABLE_REASON: &str = "Sample size too small or too large for Shapiro-Wilk test.";

/// Check a series for normality with the default options
pub fn check_normality(series: &[f64]) -> NormalityOutcome {
    check_normality_with(series, &NormalityOptions::default())
}

/// Check a series for normality
///
/// Missing values are dropped. Outside `[min_n, max_n]` the test is not run
/// and `NormalityOutcome::NotApplicable` is returned. A series is classified
/// normal only when p > alpha.
pub fn check_normality_with(series: &[f64], options: &NormalityOptions) -> NormalityOutcome {
    let clean = filter_nan(series);
    let n = clean.len();

    if n < options.min_n || n > options.max_n {
        log::warn!("Normality check not applicable for n = {}", n);
        return not_applicable(n);
    }

    let test = match shapiro_wilk(&clean) {
        Ok(test) => test,
        Err(e) => {
            log::warn!("Shapiro-Wilk failed for n = {}: {}", n, e);
            return not_applicable(n);
        }
    };

    let classification = if test.p_value > options.alpha {
        NormalityClass::Normal
    } else {
        NormalityClass::NonNormal
    };
    let interpretation = describe_outcome(test.statistic, test.p_value, classification, options.alpha);
    log::debug!("Shapiro-Wilk n = {}: W = {:.4}, p = {:.4}", n, test.statistic, test.p_value);

    NormalityOutcome::Tested(NormalityResult {
        statistic: test.statistic,
        p_value: test.p_value,
        n,
        classification,
        interpretation,
    })
}

fn not_applicable(n: usize) -> NormalityOutcome {
    NormalityOutcome::NotApplicable {
        n,
        reason: NOT_APPLICABLE_REASON.to_string(),
    }
}

fn describe_outcome(w: f64, p: f64, classification: NormalityClass, alpha: f64) -> String {
    let verdict = match classification {
        NormalityClass::Normal => {
            format!("Data appears to be normally distributed (p > {}).", alpha)
        }
        NormalityClass::NonNormal => format!(
            "Data does not appear to be normally distributed (p ≤ {}). Consider using Spearman correlation.",
            alpha
        ),
    };
    format!("Shapiro-Wilk test: W = {:.4}, p = {:.4}. {}", w, p, verdict)
}

//! Method recommender

use crate::types::{CorrelationMethod, MethodRecommendation, NormalityOutcome};

/// p-value at or above which a composite counts as normal for the recommendation
pub const RECOMMENDATION_ALPHA: f64 = 0.05;

/// Recommend a correlation method from the normality of both composites
///
/// Pearson is recommended only when both tests ran and neither rejected
/// normality (p >= 0.05). A test that did not apply counts as non-normal.
pub fn recommend_method(x: &NormalityOutcome, y: &NormalityOutcome) -> MethodRecommendation {
    match (x.p_value(), y.p_value()) {
        (Some(px), Some(py)) if px >= RECOMMENDATION_ALPHA && py >= RECOMMENDATION_ALPHA => {
            MethodRecommendation {
                method: CorrelationMethod::Pearson,
                rationale: format!(
                    "Both composites look normally distributed (p = {:.4} and p = {:.4}); Pearson correlation is appropriate.",
                    px, py
                ),
            }
        }
        (Some(_), Some(_)) => MethodRecommendation {
            method: CorrelationMethod::Spearman,
            rationale: "At least one composite departs from normality; Spearman correlation is recommended."
                .to_string(),
        },
        _ => MethodRecommendation {
            method: CorrelationMethod::Spearman,
            rationale: "Normality could not be tested for at least one composite; Spearman correlation is recommended."
                .to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{NormalityClass, NormalityResult};

    fn tested(p_value: f64) -> NormalityOutcome {
        NormalityOutcome::Tested(NormalityResult {
            statistic: 0.95,
            p_value,
            n: 30,
            classification: if p_value > 0.05 {
                NormalityClass::Normal
            } else {
                NormalityClass::NonNormal
            },
            interpretation: String::new(),
        })
    }

    fn not_applicable() -> NormalityOutcome {
        NormalityOutcome::NotApplicable {
            n: 2,
            reason: "too small".into(),
        }
    }

    #[test]
    fn test_both_normal_recommends_pearson() {
        let rec = recommend_method(&tested(0.10), &tested(0.20));
        assert_eq!(rec.method, CorrelationMethod::Pearson);
        assert!(rec.rationale.contains("p = 0.1000"));
    }

    #[test]
    fn test_one_non_normal_recommends_spearman() {
        let rec = recommend_method(&tested(0.20), &tested(0.01));
        assert_eq!(rec.method, CorrelationMethod::Spearman);
    }

    #[test]
    fn test_not_applicable_recommends_spearman() {
        assert_eq!(
            recommend_method(&not_applicable(), &tested(0.50)).method,
            CorrelationMethod::Spearman
        );
        assert_eq!(
            recommend_method(&tested(0.50), &not_applicable()).method,
            CorrelationMethod::Spearman
        );
    }

    #[test]
    fn test_boundary_p_counts_as_normal() {
        let rec = recommend_method(&tested(0.05), &tested(0.05));
        assert_eq!(rec.method, CorrelationMethod::Pearson);
    }
}

//! Qualitative reading of a correlation coefficient and its p-value
//!
//! The cut points are fixed: |r| < 0.3 weak, < 0.7 moderate, else strong;
//! p < 0.001, < 0.01, < 0.05 for the significance tiers.

use crate::types::{Direction, Interpretation, SignificanceTier, Strength};

const WEAK_BELOW: f64 = 0.3;
const MODERATE_BELOW: f64 = 0.7;

/// Interpret a correlation result
pub fn interpret(r: f64, p_value: f64) -> Interpretation {
    let direction = direction_of(r);
    let strength = strength_of(r);
    let significance = significance_of(p_value);

    let summary = format!(
        "The correlation is {} and {} (r = {:.4}), and it is {}.",
        direction, strength, r, significance
    );

    Interpretation {
        direction,
        strength,
        significance,
        summary,
    }
}

/// Positive only for r > 0; zero reads as negative
pub fn direction_of(r: f64) -> Direction {
    if r > 0.0 {
        Direction::Positive
    } else {
        Direction::Negative
    }
}

pub fn strength_of(r: f64) -> Strength {
    let magnitude = r.abs();
    if magnitude < WEAK_BELOW {
        Strength::Weak
    } else if magnitude < MODERATE_BELOW {
        Strength::Moderate
    } else {
        Strength::Strong
    }
}

pub fn significance_of(p_value: f64) -> SignificanceTier {
    if p_value < 0.001 {
        SignificanceTier::HighlySignificant
    } else if p_value < 0.01 {
        SignificanceTier::VerySignificant
    } else if p_value < 0.05 {
        SignificanceTier::Significant
    } else {
        SignificanceTier::NotSignificant
    }
}

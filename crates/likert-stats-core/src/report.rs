//! Plain-text rendering of an analysis report

use crate::pipeline::{AnalysisReport, AssociationOutcome, CompositeAnalysis};
use std::fmt;

impl fmt::Display for AnalysisReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Survey Data Analysis Report")?;
        writeln!(f)?;

        writeln!(f, "Variables Description")?;
        writeln!(f, "X items: {}", self.selection.x_columns.join(", "))?;
        writeln!(f, "Y items: {}", self.selection.y_columns.join(", "))?;
        writeln!(f, "{}: Mean of X items", self.x.label)?;
        writeln!(f, "{}: Mean of Y items", self.y.label)?;
        writeln!(f)?;

        writeln!(f, "Descriptive Statistics")?;
        write_composite(f, &self.x)?;
        write_composite(f, &self.y)?;
        writeln!(f)?;

        writeln!(f, "Association Analysis")?;
        match &self.association {
            AssociationOutcome::Completed(analysis) => {
                let c = &analysis.correlation;
                writeln!(f, "Method: {} correlation", analysis.method_used)?;
                writeln!(f, "Correlation coefficient (r): {:.4}", c.r)?;
                writeln!(f, "p-value: {:.4}", c.p_value)?;
                writeln!(f, "Valid pairs: {}", c.n)?;
                writeln!(f, "Interpretation: {}", analysis.interpretation.summary)?;
                writeln!(f)?;

                writeln!(f, "Assumption Checks")?;
                writeln!(f, "{}: {}", self.x.label, analysis.normality_x.interpretation())?;
                writeln!(f, "{}: {}", self.y.label, analysis.normality_y.interpretation())?;
                write!(f, "Recommendation: {}", analysis.recommendation.rationale)?;
            }
            AssociationOutcome::Halted { message, .. } => {
                write!(f, "{}", message)?;
            }
        }

        Ok(())
    }
}

fn write_composite(f: &mut fmt::Formatter<'_>, composite: &CompositeAnalysis) -> fmt::Result {
    match &composite.summary {
        Some(s) => writeln!(
            f,
            "{}: N = {}, Mean = {:.4}, Median = {:.4}, Std Dev = {:.4}, Min = {:.4}, Max = {:.4}",
            composite.label, s.n, s.mean, s.median, s.std_dev, s.min, s.max
        ),
        None => writeln!(f, "{}: no valid data", composite.label),
    }
}

//! Full analysis run
//!
//! Composites, descriptives, normality, recommendation, correlation and
//! interpretation in one call. Nothing is kept between runs: the dataset,
//! the column selection and the options are all passed in.

use crate::composite::build_composite;
use crate::config::AnalysisOptions;
use crate::dataset::Dataset;
use crate::descriptive::{box_plot, describe, frequency_table, histogram};
use crate::interpretation::interpret;
use crate::normality::check_normality_with;
use crate::recommend::recommend_method;
use crate::tests::correlation::{correlate_with_min_pairs, pairwise_complete};
use crate::types::{
    BoxPlotSummary, CorrelationMethod, CorrelationResult, DescriptiveSummary, FrequencyRow,
    Histogram, Interpretation, MethodRecommendation, NormalityOutcome,
};
use crate::{StatsError, StatsResult};
use serde::{Deserialize, Serialize};

/// Item columns forming the X and Y composites
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSelection {
    pub x_columns: Vec<String>,
    pub y_columns: Vec<String>,
}

impl ColumnSelection {
    pub fn new<X, Y, S>(x_columns: X, y_columns: Y) -> Self
    where
        X: IntoIterator<Item = S>,
        Y: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            x_columns: x_columns.into_iter().map(Into::into).collect(),
            y_columns: y_columns.into_iter().map(Into::into).collect(),
        }
    }

    fn validate(&self, dataset: &Dataset) -> StatsResult<()> {
        if self.x_columns.is_empty() {
            return Err(StatsError::EmptySelection { set: "x_columns" });
        }
        if self.y_columns.is_empty() {
            return Err(StatsError::EmptySelection { set: "y_columns" });
        }
        for name in self.x_columns.iter().chain(&self.y_columns) {
            if dataset.column(name).is_none() {
                return Err(StatsError::ColumnNotFound(name.clone()));
            }
        }
        Ok(())
    }
}

/// Summary and frequency table of one item column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemDescriptive {
    pub column: String,
    /// `None` when the column has no numeric value
    pub summary: Option<DescriptiveSummary>,
    pub frequencies: Vec<FrequencyRow>,
}

/// Everything computed for one composite series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompositeAnalysis {
    pub label: String,
    /// One value per dataset row, NaN where missing
    pub values: Vec<f64>,
    pub summary: Option<DescriptiveSummary>,
    pub frequencies: Vec<FrequencyRow>,
    pub histogram: Option<Histogram>,
    pub box_plot: Option<BoxPlotSummary>,
}

/// Association stage once enough pairs are available
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssociationAnalysis {
    pub normality_x: NormalityOutcome,
    pub normality_y: NormalityOutcome,
    pub recommendation: MethodRecommendation,
    /// Recommended method unless overridden in the options
    pub method_used: CorrelationMethod,
    pub correlation: CorrelationResult,
    pub interpretation: Interpretation,
    /// Pairwise-complete (x, y) rows the correlation was computed from
    pub pairs: Vec<(f64, f64)>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AssociationOutcome {
    Completed(Box<AssociationAnalysis>),
    /// No coefficient is produced
    Halted { valid_pairs: usize, message: String },
}

impl AssociationOutcome {
    pub fn analysis(&self) -> Option<&AssociationAnalysis> {
        match self {
            AssociationOutcome::Completed(analysis) => Some(analysis),
            AssociationOutcome::Halted { .. } => None,
        }
    }
}

/// Result of one analysis run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub selection: ColumnSelection,
    pub n_rows: usize,
    pub x_items: Vec<ItemDescriptive>,
    pub y_items: Vec<ItemDescriptive>,
    pub x: CompositeAnalysis,
    pub y: CompositeAnalysis,
    pub association: AssociationOutcome,
}

impl AnalysisReport {
    /// Pretty-printed JSON; missing and undefined numbers become `null`
    pub fn to_json(&self) -> StatsResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Run the whole analysis on `dataset`
///
/// Only an invalid selection or invalid options are returned as errors.
/// Missing data anywhere else ends up in the report as `None` entries,
/// `NormalityOutcome::NotApplicable` or `AssociationOutcome::Halted`.
pub fn analyze(
    dataset: &Dataset,
    selection: &ColumnSelection,
    options: &AnalysisOptions,
) -> StatsResult<AnalysisReport> {
    options
        .validate()
        .map_err(|e| StatsError::InvalidInput(e.to_string()))?;
    selection.validate(dataset)?;

    log::debug!(
        "Analyzing {} rows: {} X items, {} Y items",
        dataset.n_rows(),
        selection.x_columns.len(),
        selection.y_columns.len()
    );

    let x_values = build_composite(dataset, &selection.x_columns)?;
    let y_values = build_composite(dataset, &selection.y_columns)?;

    let x_items = item_descriptives(dataset, &selection.x_columns)?;
    let y_items = item_descriptives(dataset, &selection.y_columns)?;

    let x = composite_analysis(&options.x_label, x_values, options.histogram_bins)?;
    let y = composite_analysis(&options.y_label, y_values, options.histogram_bins)?;

    let association = associate(&x.values, &y.values, options)?;

    Ok(AnalysisReport {
        selection: selection.clone(),
        n_rows: dataset.n_rows(),
        x_items,
        y_items,
        x,
        y,
        association,
    })
}

fn item_descriptives(dataset: &Dataset, columns: &[String]) -> StatsResult<Vec<ItemDescriptive>> {
    columns
        .iter()
        .map(|name| {
            let values = dataset.coerce_column(name)?;
            let summary = optional(describe(&values, name))?;
            log::trace!(
                "Item {}: n = {}",
                name,
                summary.as_ref().map(|s| s.n).unwrap_or(0)
            );
            Ok(ItemDescriptive {
                column: name.clone(),
                summary,
                frequencies: frequency_table(&values),
            })
        })
        .collect()
}

fn composite_analysis(label: &str, values: Vec<f64>, bins: usize) -> StatsResult<CompositeAnalysis> {
    let summary = optional(describe(&values, label))?;
    match &summary {
        Some(s) => log::debug!("{}: n = {}, mean = {:.4}", label, s.n, s.mean),
        None => log::warn!("{} has no valid values", label),
    }

    Ok(CompositeAnalysis {
        label: label.to_string(),
        frequencies: frequency_table(&values),
        histogram: optional(histogram(&values, bins))?,
        box_plot: optional(box_plot(&values))?,
        summary,
        values,
    })
}

/// Map the no-data signal to `None`, keep every other error
fn optional<T>(result: StatsResult<T>) -> StatsResult<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(StatsError::NoValidData) => Ok(None),
        Err(e) => Err(e),
    }
}

fn associate(x: &[f64], y: &[f64], options: &AnalysisOptions) -> StatsResult<AssociationOutcome> {
    let pairs = pairwise_complete(x, y)?;
    let required = options.correlation.min_pairs;

    if pairs.len() < required {
        let message = StatsError::InsufficientPairs {
            valid_pairs: pairs.len(),
            required,
        }
        .to_string();
        log::warn!("{}", message);
        return Ok(AssociationOutcome::Halted {
            valid_pairs: pairs.len(),
            message,
        });
    }

    let normality_x = check_normality_with(x, &options.normality);
    let normality_y = check_normality_with(y, &options.normality);
    let recommendation = recommend_method(&normality_x, &normality_y);
    let method_used = options
        .correlation
        .method_override
        .unwrap_or(recommendation.method);
    log::debug!(
        "Recommended {}, using {}",
        recommendation.method,
        method_used
    );

    let correlation = match correlate_with_min_pairs(x, y, method_used, required) {
        Ok(result) => result,
        // a constant composite has no defined coefficient
        Err(StatsError::InvalidInput(reason)) => {
            log::warn!("Correlation halted: {}", reason);
            return Ok(AssociationOutcome::Halted {
                valid_pairs: pairs.len(),
                message: reason,
            });
        }
        Err(e) => return Err(e),
    };
    log::debug!(
        "{} r = {:.4}, p = {:.4}, n = {}",
        method_used,
        correlation.r,
        correlation.p_value,
        correlation.n
    );

    let interpretation = interpret(correlation.r, correlation.p_value);

    Ok(AssociationOutcome::Completed(Box::new(AssociationAnalysis {
        normality_x,
        normality_y,
        recommendation,
        method_used,
        correlation,
        interpretation,
        pairs,
    })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::CellValue;

    fn dataset(columns: &[(&str, &[f64])]) -> Dataset {
        Dataset::from_columns(
            columns
                .iter()
                .map(|(name, values)| {
                    let cells = values
                        .iter()
                        .map(|&v| {
                            if v.is_nan() {
                                CellValue::Missing
                            } else {
                                CellValue::Number(v)
                            }
                        })
                        .collect();
                    (name.to_string(), cells)
                })
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_empty_selection_rejected() {
        let ds = dataset(&[("q1", &[1.0, 2.0, 3.0])]);
        let selection = ColumnSelection::new(Vec::<String>::new(), vec!["q1".to_string()]);
        let result = analyze(&ds, &selection, &AnalysisOptions::default());

        assert!(matches!(
            result,
            Err(StatsError::EmptySelection { set: "x_columns" })
        ));
    }

    #[test]
    fn test_unknown_column_rejected() {
        let ds = dataset(&[("q1", &[1.0, 2.0, 3.0])]);
        let selection = ColumnSelection::new(["q1"], ["q9"]);
        let result = analyze(&ds, &selection, &AnalysisOptions::default());

        assert!(matches!(result, Err(StatsError::ColumnNotFound(name)) if name == "q9"));
    }

    #[test]
    fn test_halts_with_two_pairs() {
        let nan = f64::NAN;
        let ds = dataset(&[
            ("q1", &[1.0, 2.0, nan, 4.0]),
            ("q2", &[3.0, nan, 5.0, nan]),
        ]);
        let selection = ColumnSelection::new(["q1"], ["q2"]);
        let report = analyze(&ds, &selection, &AnalysisOptions::default()).unwrap();

        match report.association {
            AssociationOutcome::Halted {
                valid_pairs,
                message,
            } => {
                assert_eq!(valid_pairs, 1);
                assert!(message.contains("need at least 3"));
            }
            other => panic!("expected halt, got {:?}", other),
        }
    }

    #[test]
    fn test_constant_composite_halts() {
        let ds = dataset(&[("q1", &[3.0, 3.0, 3.0, 3.0]), ("q2", &[1.0, 2.0, 4.0, 5.0])]);
        let selection = ColumnSelection::new(["q1"], ["q2"]);
        let report = analyze(&ds, &selection, &AnalysisOptions::default()).unwrap();

        assert!(matches!(
            report.association,
            AssociationOutcome::Halted { valid_pairs: 4, .. }
        ));
    }

    #[test]
    fn test_all_missing_item_is_reported_not_failed() {
        let nan = f64::NAN;
        let ds = dataset(&[
            ("q1", &[1.0, 2.0, 3.0, 4.0]),
            ("q2", &[nan, nan, nan, nan]),
            ("q3", &[2.0, 1.0, 4.0, 3.0]),
        ]);
        let selection = ColumnSelection::new(["q1", "q2"], ["q3"]);
        let report = analyze(&ds, &selection, &AnalysisOptions::default()).unwrap();

        assert_eq!(report.x_items.len(), 2);
        assert!(report.x_items[1].summary.is_none());
        assert!(report.x_items[1].frequencies.is_empty());
        assert_eq!(report.x.summary.as_ref().unwrap().n, 4);
    }

    #[test]
    fn test_method_override() {
        let ds = dataset(&[
            ("q1", &[1.0, 2.0, 3.0, 4.0, 5.0]),
            ("q2", &[2.0, 4.0, 5.0, 4.0, 5.0]),
        ]);
        let selection = ColumnSelection::new(["q1"], ["q2"]);
        let mut options = AnalysisOptions::default();
        options.correlation.method_override = Some(CorrelationMethod::Spearman);

        let report = analyze(&ds, &selection, &options).unwrap();
        let analysis = report.association.analysis().unwrap();

        assert_eq!(analysis.method_used, CorrelationMethod::Spearman);
        assert_eq!(analysis.correlation.method, CorrelationMethod::Spearman);
        assert_eq!(analysis.pairs.len(), 5);
    }

    #[test]
    fn test_invalid_options_rejected() {
        let ds = dataset(&[("q1", &[1.0, 2.0, 3.0]), ("q2", &[1.0, 2.0, 3.0])]);
        let selection = ColumnSelection::new(["q1"], ["q2"]);
        let options = AnalysisOptions {
            histogram_bins: 0,
            ..AnalysisOptions::default()
        };

        assert!(matches!(
            analyze(&ds, &selection, &options),
            Err(StatsError::InvalidInput(_))
        ));
    }
}

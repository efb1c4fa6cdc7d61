//! likert-stats-core: Statistical analysis of Likert-scale survey data
//!
//! Builds X and Y composite scores from item columns, describes them,
//! checks normality, recommends and runs a Pearson or Spearman correlation
//! and interprets the result. Every operation is a pure function; the
//! `analyze` pipeline runs them in order.

pub mod composite;
pub mod config;
pub mod dataset;
pub mod descriptive;
pub mod errors;
pub mod interpretation;
pub mod normality;
pub mod pipeline;
pub mod recommend;
mod report;
pub mod tests;
pub mod types;

pub use composite::build_composite;
pub use config::{AnalysisOptions, ConfigError, CorrelationOptions, NormalityOptions};
pub use dataset::{CellValue, Dataset};
pub use descriptive::{box_plot, describe, frequency_table, histogram};
pub use errors::{StatsError, StatsResult};
pub use interpretation::interpret;
pub use normality::{check_normality, check_normality_with};
pub use pipeline::{analyze, AnalysisReport, AssociationOutcome, ColumnSelection};
pub use recommend::recommend_method;
pub use tests::correlate;
pub use types::*;

//! Composite scores
//!
//! A composite is the row-wise mean of a group of item columns. Missing
//! cells are skipped, so a partially answered row still gets a score from
//! the items it has; a row with no usable item is missing (NaN).

use crate::dataset::Dataset;
use crate::{StatsError, StatsResult};

/// Build the row-wise mean composite of `column_names`
///
/// # Arguments
/// * `dataset` - Source table, never modified
/// * `column_names` - Non-empty ordered selection of item columns
///
/// # Returns
/// One value per dataset row, NaN where no selected cell is numeric
pub fn build_composite<S: AsRef<str>>(
    dataset: &Dataset,
    column_names: &[S],
) -> StatsResult<Vec<f64>> {
    if column_names.is_empty() {
        return Err(StatsError::InvalidInput(
            "Composite requires at least one column".into(),
        ));
    }

    let columns: Vec<Vec<f64>> = column_names
        .iter()
        .map(|name| dataset.coerce_column(name.as_ref()))
        .collect::<StatsResult<_>>()?;

    Ok(row_means(&columns, dataset.n_rows()))
}

/// Row-wise mean over already-numeric columns, skipping NaN
pub fn row_means(columns: &[Vec<f64>], n_rows: usize) -> Vec<f64> {
    (0..n_rows)
        .map(|row| {
            let (sum, count) = columns
                .iter()
                .filter_map(|col| col.get(row).copied())
                .filter(|v| !v.is_nan())
                .fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));

            if count == 0 {
                f64::NAN
            } else {
                sum / count as f64
            }
        })
        .collect()
}

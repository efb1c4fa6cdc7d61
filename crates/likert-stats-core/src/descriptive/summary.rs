use super::{filter_nan, quantile_sorted, sorted};
use crate::types::DescriptiveSummary;
use crate::{StatsError, StatsResult};

/// Compute the descriptive summary of a series
///
/// Missing values (NaN) are dropped first. A series with nothing left is
/// reported as `StatsError::NoValidData` rather than a zero-filled summary.
/// With a single observation the sample variance and standard deviation
/// are undefined and reported as NaN.
///
/// # Arguments
/// * `data` - Numeric series, NaN marking missing values
/// * `label` - Identifier carried into the summary
pub fn describe(data: &[f64], label: &str) -> StatsResult<DescriptiveSummary> {
    let clean = filter_nan(data);
    let n = clean.len();

    if n == 0 {
        return Err(StatsError::NoValidData);
    }

    let values = sorted(&clean);
    let mean = values.iter().sum::<f64>() / n as f64;

    let variance = if n > 1 {
        values.iter().map(|&x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64
    } else {
        f64::NAN
    };

    Ok(DescriptiveSummary {
        label: label.to_string(),
        n,
        mean,
        median: quantile_sorted(&values, 0.5),
        mode: mode_sorted(&values),
        min: values[0],
        max: values[n - 1],
        std_dev: variance.sqrt(),
        variance,
    })
}

/// Most frequent value of sorted data; the first (smallest) run wins ties
fn mode_sorted(values: &[f64]) -> f64 {
    let mut best = values[0];
    let mut best_count = 0;
    let mut i = 0;

    while i < values.len() {
        let mut j = i;
        while j < values.len() && values[j] == values[i] {
            j += 1;
        }
        if j - i > best_count {
            best_count = j - i;
            best = values[i];
        }
        i = j;
    }

    best
}

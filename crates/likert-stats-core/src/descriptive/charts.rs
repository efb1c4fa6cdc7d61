use super::{filter_nan, quantile_sorted, sorted};
use crate::types::{BoxPlotSummary, Histogram};
use crate::{StatsError, StatsResult};

/// Equal-width histogram over [min, max]
///
/// A constant series is binned over [v - 0.5, v + 0.5]. Every bin is
/// half-open except the last, which also holds the maximum.
pub fn histogram(data: &[f64], bins: usize) -> StatsResult<Histogram> {
    if bins == 0 {
        return Err(StatsError::InvalidInput(
            "Histogram requires at least one bin".into(),
        ));
    }

    let clean = filter_nan(data);
    if clean.is_empty() {
        return Err(StatsError::NoValidData);
    }

    let mut lo = clean.iter().copied().fold(f64::INFINITY, f64::min);
    let mut hi = clean.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if lo == hi {
        lo -= 0.5;
        hi += 0.5;
    }

    let width = (hi - lo) / bins as f64;
    let edges: Vec<f64> = (0..=bins)
        .map(|i| if i == bins { hi } else { lo + width * i as f64 })
        .collect();

    let mut counts = vec![0usize; bins];
    for v in clean {
        let idx = (((v - lo) / (hi - lo)) * bins as f64).floor() as usize;
        counts[idx.min(bins - 1)] += 1;
    }

    Ok(Histogram { edges, counts })
}

/// Box-plot summary with 1.5 IQR whiskers
pub fn box_plot(data: &[f64]) -> StatsResult<BoxPlotSummary> {
    let clean = filter_nan(data);
    if clean.is_empty() {
        return Err(StatsError::NoValidData);
    }

    let values = sorted(&clean);
    let q1 = quantile_sorted(&values, 0.25);
    let median = quantile_sorted(&values, 0.5);
    let q3 = quantile_sorted(&values, 0.75);
    let iqr = q3 - q1;
    let lower_fence = q1 - 1.5 * iqr;
    let upper_fence = q3 + 1.5 * iqr;

    let (inside, outliers): (Vec<f64>, Vec<f64>) = values
        .iter()
        .partition(|&&v| v >= lower_fence && v <= upper_fence);
    let lower_whisker = inside.first().copied().unwrap_or(q1);
    let upper_whisker = inside.last().copied().unwrap_or(q3);

    Ok(BoxPlotSummary {
        q1,
        median,
        q3,
        lower_whisker,
        upper_whisker,
        outliers,
    })
}

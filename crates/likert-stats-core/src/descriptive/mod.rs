//! Descriptive statistics
//!
//! - Summary measures (N, mean, median, mode, min, max, sample std/variance)
//! - Frequency table over distinct values
//! - Histogram and box-plot data for renderers

mod charts;
mod frequency;
mod summary;

pub use charts::{box_plot, histogram};
pub use frequency::frequency_table;
pub use summary::describe;

/// Filter NaN values from a slice
pub(crate) fn filter_nan(data: &[f64]) -> Vec<f64> {
    data.iter().copied().filter(|x| !x.is_nan()).collect()
}

/// Sort ascending; callers pass NaN-free data
pub(crate) fn sorted(data: &[f64]) -> Vec<f64> {
    let mut values = data.to_vec();
    values.sort_by(|a, b| a.total_cmp(b));
    values
}

/// Linear-interpolated quantile of sorted data, `q` in [0, 1]
pub(crate) fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    if lo == hi {
        return sorted[lo];
    }
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

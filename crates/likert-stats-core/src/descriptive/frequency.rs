use super::{filter_nan, sorted};
use crate::types::FrequencyRow;

/// Frequency table of a series
///
/// Missing values are dropped. Rows enumerate the distinct observed values
/// in ascending order of the value; percentages are relative to the number
/// of non-missing observations and rounded to 2 decimal places. An
/// all-missing series yields an empty table.
pub fn frequency_table(data: &[f64]) -> Vec<FrequencyRow> {
    let values = sorted(&filter_nan(data));
    let n = values.len();
    let mut rows: Vec<FrequencyRow> = Vec::new();

    for value in values {
        match rows.last_mut() {
            Some(row) if row.value == value => row.count += 1,
            _ => rows.push(FrequencyRow {
                value,
                count: 1,
                percentage: 0.0,
            }),
        }
    }

    for row in &mut rows {
        row.percentage = round2(row.count as f64 / n as f64 * 100.0);
    }

    rows
}

/// Round to 2 decimal places, ties to even
fn round2(x: f64) -> f64 {
    (x * 100.0).round_ties_even() / 100.0
}

//! C FFI boundary for likert-stats
//!
//! This crate provides C-compatible functions for a UI shell or report
//! generator written in another language.

mod types;

pub use types::*;

use libc::c_char;
use likert_stats_core::{
    build_composite, check_normality, correlate, describe, frequency_table, interpret,
    recommend_method, CellValue, Dataset, NormalityClass, NormalityOutcome, StatsError,
};
use std::ffi::CStr;
use std::slice;

/// Convert StatsError to ErrorCode
fn error_to_code(err: &StatsError) -> ErrorCode {
    match err {
        StatsError::EmptySelection { .. } => ErrorCode::InvalidInput,
        StatsError::ColumnNotFound(_) => ErrorCode::ColumnNotFound,
        StatsError::InvalidInput(_) => ErrorCode::InvalidInput,
        StatsError::DimensionMismatchMsg(_) => ErrorCode::DimensionMismatch,
        StatsError::NoValidData => ErrorCode::NoValidData,
        StatsError::InsufficientDataMsg(_) => ErrorCode::InsufficientData,
        StatsError::InsufficientPairs { .. } => ErrorCode::InsufficientData,
        StatsError::Distribution(_) => ErrorCode::DistributionError,
        StatsError::SerializationError(_) => ErrorCode::SerializationError,
    }
}

/// Allocate a C string (must be freed with libc::free)
unsafe fn alloc_string(s: &str) -> *mut c_char {
    let len = s.len() + 1;
    let ptr = libc::malloc(len) as *mut c_char;
    if !ptr.is_null() {
        std::ptr::copy_nonoverlapping(s.as_ptr(), ptr as *mut u8, s.len());
        *ptr.add(s.len()) = 0;
    }
    ptr
}

/// Copy a slice into a malloc'd buffer; NULL for an empty slice
unsafe fn alloc_copy<T: Copy>(values: &[T]) -> Option<*mut T> {
    if values.is_empty() {
        return Some(std::ptr::null_mut());
    }
    let ptr = libc::malloc(std::mem::size_of_val(values)) as *mut T;
    if ptr.is_null() {
        return None;
    }
    std::ptr::copy_nonoverlapping(values.as_ptr(), ptr, values.len());
    Some(ptr)
}

/// Get library version string
#[no_mangle]
pub extern "C" fn likert_version() -> *const c_char {
    concat!(env!("CARGO_PKG_VERSION"), "\0").as_ptr() as *const c_char
}

/// Build a composite score as the row-wise mean of item columns
///
/// NULL entries (validity bit 0) and non-finite values are missing. A row
/// with no valid item yields NaN.
///
/// # Safety
/// - `columns` must point to `n_columns` valid DataArray structs of equal length
/// - `out_values` and `out_len` must be valid pointers
/// - `out_error` must be a valid pointer
///
/// # Returns
/// `true` on success, `false` on error (check `out_error` for details)
#[no_mangle]
pub unsafe extern "C" fn likert_build_composite(
    columns: *const DataArray,
    n_columns: usize,
    out_values: *mut *mut f64,
    out_len: *mut usize,
    out_error: *mut LikertError,
) -> bool {
    if !out_error.is_null() {
        *out_error = LikertError::success();
    }

    if out_values.is_null() || out_len.is_null() {
        if !out_error.is_null() {
            (*out_error).set(ErrorCode::InvalidInput, "out_values or out_len is NULL");
        }
        return false;
    }

    if columns.is_null() || n_columns == 0 {
        if !out_error.is_null() {
            (*out_error).set(ErrorCode::InvalidInput, "columns is NULL or empty");
        }
        return false;
    }

    let arrays = slice::from_raw_parts(columns, n_columns);
    let named: Vec<(String, Vec<CellValue>)> = arrays
        .iter()
        .enumerate()
        .map(|(i, arr)| {
            let cells = arr.to_vec().into_iter().map(CellValue::Number).collect();
            (format!("item_{}", i), cells)
        })
        .collect();
    let names: Vec<String> = named.iter().map(|(name, _)| name.clone()).collect();

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        Dataset::from_columns(named).and_then(|ds| build_composite(&ds, &names))
    }));

    let result = match result {
        Ok(r) => r,
        Err(_) => {
            if !out_error.is_null() {
                (*out_error).set(ErrorCode::InternalError, "Internal panic in composite builder");
            }
            return false;
        }
    };

    match result {
        Ok(values) => match alloc_copy(&values) {
            Some(ptr) => {
                *out_values = ptr;
                *out_len = values.len();
                true
            }
            None => {
                if !out_error.is_null() {
                    (*out_error).set(ErrorCode::AllocationFailure, "Failed to allocate composite");
                }
                false
            }
        },
        Err(e) => {
            if !out_error.is_null() {
                (*out_error).set(error_to_code(&e), &e.to_string());
            }
            false
        }
    }
}

/// Free a composite returned by likert_build_composite
///
/// # Safety
/// `values` must be NULL or a pointer previously returned by likert_build_composite
#[no_mangle]
pub unsafe extern "C" fn likert_free_values(values: *mut f64) {
    if !values.is_null() {
        libc::free(values as *mut libc::c_void);
    }
}

/// Descriptive summary of a series
///
/// An all-NULL series fails with `ErrorCode::NoValidData`.
///
/// # Safety
/// - `data` must be a valid DataArray
/// - `label` must be NULL or a NUL-terminated string
/// - `out_result` must be a valid pointer
/// - `out_error` must be a valid pointer
#[no_mangle]
pub unsafe extern "C" fn likert_describe(
    data: DataArray,
    label: *const c_char,
    out_result: *mut DescriptiveSummaryFFI,
    out_error: *mut LikertError,
) -> bool {
    if !out_error.is_null() {
        *out_error = LikertError::success();
    }

    if out_result.is_null() {
        if !out_error.is_null() {
            (*out_error).set(ErrorCode::InvalidInput, "out_result is NULL");
        }
        return false;
    }

    let label = if label.is_null() {
        String::new()
    } else {
        CStr::from_ptr(label).to_string_lossy().into_owned()
    };
    let data_vec = data.to_vec();

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        describe(&data_vec, &label)
    }));

    let result = match result {
        Ok(r) => r,
        Err(_) => {
            if !out_error.is_null() {
                (*out_error).set(ErrorCode::InternalError, "Internal panic in describe");
            }
            return false;
        }
    };

    match result {
        Ok(s) => {
            (*out_result) = DescriptiveSummaryFFI {
                label: alloc_string(&s.label),
                n: s.n,
                mean: s.mean,
                median: s.median,
                mode: s.mode,
                min: s.min,
                max: s.max,
                std_dev: s.std_dev,
                variance: s.variance,
            };
            true
        }
        Err(e) => {
            if !out_error.is_null() {
                (*out_error).set(error_to_code(&e), &e.to_string());
            }
            false
        }
    }
}

/// Free memory allocated by likert_describe
///
/// # Safety
/// `result` must be NULL or a valid pointer to a DescriptiveSummaryFFI
#[no_mangle]
pub unsafe extern "C" fn likert_free_descriptive_summary(result: *mut DescriptiveSummaryFFI) {
    if result.is_null() {
        return;
    }
    if !(*result).label.is_null() {
        libc::free((*result).label as *mut libc::c_void);
        (*result).label = std::ptr::null_mut();
    }
}

/// Frequency table of a series, ascending by value
///
/// An all-NULL series yields an empty table (`*out_rows` NULL, `*out_len` 0).
///
/// # Safety
/// - `data` must be a valid DataArray
/// - `out_rows` and `out_len` must be valid pointers
/// - `out_error` must be a valid pointer
#[no_mangle]
pub unsafe extern "C" fn likert_frequency_table(
    data: DataArray,
    out_rows: *mut *mut FrequencyRowFFI,
    out_len: *mut usize,
    out_error: *mut LikertError,
) -> bool {
    if !out_error.is_null() {
        *out_error = LikertError::success();
    }

    if out_rows.is_null() || out_len.is_null() {
        if !out_error.is_null() {
            (*out_error).set(ErrorCode::InvalidInput, "out_rows or out_len is NULL");
        }
        return false;
    }

    let data_vec = data.to_vec();

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        frequency_table(&data_vec)
    }));

    let table = match result {
        Ok(t) => t,
        Err(_) => {
            if !out_error.is_null() {
                (*out_error).set(ErrorCode::InternalError, "Internal panic in frequency table");
            }
            return false;
        }
    };

    let rows: Vec<FrequencyRowFFI> = table
        .iter()
        .map(|row| FrequencyRowFFI {
            value: row.value,
            count: row.count,
            percentage: row.percentage,
        })
        .collect();

    match alloc_copy(&rows) {
        Some(ptr) => {
            *out_rows = ptr;
            *out_len = rows.len();
            true
        }
        None => {
            if !out_error.is_null() {
                (*out_error).set(ErrorCode::AllocationFailure, "Failed to allocate frequency table");
            }
            false
        }
    }
}

/// Free a table returned by likert_frequency_table
///
/// # Safety
/// `rows` must be NULL or a pointer previously returned by likert_frequency_table
#[no_mangle]
pub unsafe extern "C" fn likert_free_frequency_table(rows: *mut FrequencyRowFFI) {
    if !rows.is_null() {
        libc::free(rows as *mut libc::c_void);
    }
}

/// Shapiro-Wilk normality check
///
/// A sample size outside [3, 5000] is not an error: the call succeeds with
/// `applicable = false` and the reason in `interpretation`.
///
/// # Safety
/// - `data` must be a valid DataArray
/// - `out_result` must be a valid pointer
/// - `out_error` must be a valid pointer
#[no_mangle]
pub unsafe extern "C" fn likert_check_normality(
    data: DataArray,
    out_result: *mut NormalityResultFFI,
    out_error: *mut LikertError,
) -> bool {
    if !out_error.is_null() {
        *out_error = LikertError::success();
    }

    if out_result.is_null() {
        if !out_error.is_null() {
            (*out_error).set(ErrorCode::InvalidInput, "out_result is NULL");
        }
        return false;
    }

    let data_vec = data.to_vec();

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        check_normality(&data_vec)
    }));

    let outcome = match result {
        Ok(o) => o,
        Err(_) => {
            if !out_error.is_null() {
                (*out_error).set(ErrorCode::InternalError, "Internal panic in Shapiro-Wilk");
            }
            return false;
        }
    };

    (*out_result) = match &outcome {
        NormalityOutcome::Tested(r) => NormalityResultFFI {
            applicable: true,
            statistic: r.statistic,
            p_value: r.p_value,
            n: r.n,
            is_normal: r.classification == NormalityClass::Normal,
            interpretation: alloc_string(&r.interpretation),
        },
        NormalityOutcome::NotApplicable { n, reason } => NormalityResultFFI {
            n: *n,
            interpretation: alloc_string(reason),
            ..NormalityResultFFI::default()
        },
    };
    true
}

/// Free memory allocated by likert_check_normality
///
/// # Safety
/// `result` must be NULL or a valid pointer to a NormalityResultFFI
#[no_mangle]
pub unsafe extern "C" fn likert_free_normality_result(result: *mut NormalityResultFFI) {
    if result.is_null() {
        return;
    }
    if !(*result).interpretation.is_null() {
        libc::free((*result).interpretation as *mut libc::c_void);
        (*result).interpretation = std::ptr::null_mut();
    }
}

/// Recommend Pearson or Spearman from two normality results
///
/// A NULL result counts as not applicable.
///
/// # Safety
/// `normality_x` and `normality_y` must be NULL or valid pointers
#[no_mangle]
pub unsafe extern "C" fn likert_recommend_method(
    normality_x: *const NormalityResultFFI,
    normality_y: *const NormalityResultFFI,
) -> CorrelationMethodFFI {
    let outcome = |ptr: *const NormalityResultFFI| {
        if ptr.is_null() {
            NormalityResultFFI::default().to_outcome()
        } else {
            (*ptr).to_outcome()
        }
    };

    recommend_method(&outcome(normality_x), &outcome(normality_y))
        .method
        .into()
}

/// Pearson or Spearman correlation over the pairwise-complete rows
///
/// Fewer than three valid pairs fails with `ErrorCode::InsufficientData`.
///
/// # Safety
/// - `x` and `y` must be valid DataArrays of equal length
/// - `out_result` must be a valid pointer
/// - `out_error` must be a valid pointer
#[no_mangle]
pub unsafe extern "C" fn likert_correlate(
    x: DataArray,
    y: DataArray,
    method: CorrelationMethodFFI,
    out_result: *mut CorrelationResultFFI,
    out_error: *mut LikertError,
) -> bool {
    if !out_error.is_null() {
        *out_error = LikertError::success();
    }

    if out_result.is_null() {
        if !out_error.is_null() {
            (*out_error).set(ErrorCode::InvalidInput, "out_result is NULL");
        }
        return false;
    }

    let x_vec = x.to_vec();
    let y_vec = y.to_vec();

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        correlate(&x_vec, &y_vec, method.into())
    }));

    let result = match result {
        Ok(r) => r,
        Err(_) => {
            if !out_error.is_null() {
                (*out_error).set(ErrorCode::InternalError, "Internal panic in correlation");
            }
            return false;
        }
    };

    match result {
        Ok(r) => {
            (*out_result) = CorrelationResultFFI {
                r: r.r,
                statistic: r.statistic,
                p_value: r.p_value,
                n: r.n,
                method: r.method.into(),
            };
            true
        }
        Err(e) => {
            if !out_error.is_null() {
                (*out_error).set(error_to_code(&e), &e.to_string());
            }
            false
        }
    }
}

/// Interpret a correlation coefficient and its p-value
///
/// # Safety
/// - `out_result` must be a valid pointer
/// - `out_error` must be a valid pointer
#[no_mangle]
pub unsafe extern "C" fn likert_interpret(
    r: f64,
    p_value: f64,
    out_result: *mut InterpretationFFI,
    out_error: *mut LikertError,
) -> bool {
    if !out_error.is_null() {
        *out_error = LikertError::success();
    }

    if out_result.is_null() {
        if !out_error.is_null() {
            (*out_error).set(ErrorCode::InvalidInput, "out_result is NULL");
        }
        return false;
    }

    if r.is_nan() || p_value.is_nan() {
        if !out_error.is_null() {
            (*out_error).set(ErrorCode::InvalidInput, "r and p_value must not be NaN");
        }
        return false;
    }

    let interpretation = interpret(r, p_value);
    (*out_result) = InterpretationFFI {
        direction: interpretation.direction.into(),
        strength: interpretation.strength.into(),
        significance: interpretation.significance.into(),
        summary: alloc_string(&interpretation.summary),
    };
    true
}

/// Free memory allocated by likert_interpret
///
/// # Safety
/// `result` must be NULL or a valid pointer to an InterpretationFFI
#[no_mangle]
pub unsafe extern "C" fn likert_free_interpretation(result: *mut InterpretationFFI) {
    if result.is_null() {
        return;
    }
    if !(*result).summary.is_null() {
        libc::free((*result).summary as *mut libc::c_void);
        (*result).summary = std::ptr::null_mut();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn array(values: &[f64]) -> DataArray {
        DataArray {
            data: values.as_ptr(),
            validity: std::ptr::null(),
            len: values.len(),
        }
    }

    unsafe fn c_str(ptr: *const c_char) -> String {
        CStr::from_ptr(ptr).to_string_lossy().into_owned()
    }

    #[test]
    fn test_version() {
        let version = unsafe { c_str(likert_version()) };
        assert_eq!(version, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_build_composite_with_nulls() {
        let q1 = [4.0, 3.0, 0.0];
        let q2 = [5.0, 0.0, 0.0];
        let q1_validity = [0b011u8];
        let q2_validity = [0b001u8];
        let columns = [
            DataArray {
                data: q1.as_ptr(),
                validity: q1_validity.as_ptr(),
                len: 3,
            },
            DataArray {
                data: q2.as_ptr(),
                validity: q2_validity.as_ptr(),
                len: 3,
            },
        ];

        let mut values: *mut f64 = std::ptr::null_mut();
        let mut len = 0usize;
        let mut err = LikertError::success();
        unsafe {
            assert!(likert_build_composite(
                columns.as_ptr(),
                columns.len(),
                &mut values,
                &mut len,
                &mut err
            ));
            let composite = slice::from_raw_parts(values, len);
            assert_eq!(composite[0], 4.5);
            assert_eq!(composite[1], 3.0);
            assert!(composite[2].is_nan());
            likert_free_values(values);
        }
    }

    #[test]
    fn test_build_composite_ragged_columns() {
        let q1 = [1.0, 2.0, 3.0];
        let q2 = [1.0, 2.0];
        let columns = [array(&q1), array(&q2)];
        let mut values: *mut f64 = std::ptr::null_mut();
        let mut len = 0usize;
        let mut err = LikertError::success();

        let ok = unsafe {
            likert_build_composite(columns.as_ptr(), 2, &mut values, &mut len, &mut err)
        };
        assert!(!ok);
        assert_eq!(err.code, ErrorCode::DimensionMismatch);
    }

    #[test]
    fn test_describe_and_free() {
        let data = [1.0, 2.0, 3.0, 4.0, 5.0];
        let label = b"X_total\0";
        let mut result = DescriptiveSummaryFFI::default();
        let mut err = LikertError::success();

        unsafe {
            assert!(likert_describe(
                array(&data),
                label.as_ptr() as *const c_char,
                &mut result,
                &mut err
            ));
            assert_eq!(c_str(result.label), "X_total");
            likert_free_descriptive_summary(&mut result);
        }
        assert_eq!(result.n, 5);
        assert_eq!(result.mean, 3.0);
        assert!(result.label.is_null());
    }

    #[test]
    fn test_describe_no_data() {
        let data = [1.0, 2.0];
        let validity = [0u8];
        let arr = DataArray {
            data: data.as_ptr(),
            validity: validity.as_ptr(),
            len: 2,
        };
        let mut result = DescriptiveSummaryFFI::default();
        let mut err = LikertError::success();

        let ok = unsafe { likert_describe(arr, std::ptr::null(), &mut result, &mut err) };
        assert!(!ok);
        assert_eq!(err.code, ErrorCode::NoValidData);
    }

    #[test]
    fn test_frequency_table() {
        let data = [2.0, 1.0, 2.0, 5.0];
        let mut rows: *mut FrequencyRowFFI = std::ptr::null_mut();
        let mut len = 0usize;
        let mut err = LikertError::success();

        unsafe {
            assert!(likert_frequency_table(array(&data), &mut rows, &mut len, &mut err));
            let table = slice::from_raw_parts(rows, len);
            assert_eq!(table.len(), 3);
            assert_eq!(table[1].value, 2.0);
            assert_eq!(table[1].count, 2);
            assert_eq!(table[1].percentage, 50.0);
            likert_free_frequency_table(rows);
        }
    }

    #[test]
    fn test_normality_and_recommendation() {
        let small = [1.0, 2.0];
        let mut x = NormalityResultFFI::default();
        let mut err = LikertError::success();

        unsafe {
            assert!(likert_check_normality(array(&small), &mut x, &mut err));
            assert!(!x.applicable);
            assert_eq!(
                c_str(x.interpretation),
                "Sample size too small or too large for Shapiro-Wilk test."
            );

            let method = likert_recommend_method(&x, std::ptr::null());
            assert_eq!(method, CorrelationMethodFFI::Spearman);
            likert_free_normality_result(&mut x);
        }
    }

    #[test]
    fn test_correlate_insufficient_pairs() {
        let x = [1.0, 2.0];
        let y = [2.0, 3.0];
        let mut result = CorrelationResultFFI::default();
        let mut err = LikertError::success();

        let ok = unsafe {
            likert_correlate(
                array(&x),
                array(&y),
                CorrelationMethodFFI::Pearson,
                &mut result,
                &mut err,
            )
        };
        assert!(!ok);
        assert_eq!(err.code, ErrorCode::InsufficientData);
    }

    #[test]
    fn test_correlate_and_interpret() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [2.0, 4.0, 5.0, 4.0, 5.0];
        let mut result = CorrelationResultFFI::default();
        let mut interp = InterpretationFFI {
            direction: DirectionFFI::Negative,
            strength: StrengthFFI::Weak,
            significance: SignificanceFFI::NotSignificant,
            summary: std::ptr::null_mut(),
        };
        let mut err = LikertError::success();

        unsafe {
            assert!(likert_correlate(
                array(&x),
                array(&y),
                CorrelationMethodFFI::Pearson,
                &mut result,
                &mut err
            ));
            assert!(likert_interpret(result.r, result.p_value, &mut interp, &mut err));
            assert_eq!(
                c_str(interp.summary),
                "The correlation is positive and strong (r = 0.7746), and it is not significant (p ≥ 0.05)."
            );
            likert_free_interpretation(&mut interp);
        }
        assert_eq!(result.n, 5);
        assert_eq!(interp.direction, DirectionFFI::Positive);
        assert_eq!(interp.strength, StrengthFFI::Strong);
    }
}

//! C-compatible types for FFI boundary

use libc::c_char;
use likert_stats_core::{
    CorrelationMethod, Direction, NormalityClass, NormalityOutcome, NormalityResult,
    SignificanceTier, Strength,
};

/// Error codes for FFI boundary
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Success = 0,
    InvalidInput = 1,
    InsufficientData = 2,
    NoValidData = 3,
    DimensionMismatch = 4,
    ColumnNotFound = 5,
    DistributionError = 6,
    AllocationFailure = 7,
    SerializationError = 8,
    InternalError = 99,
}

/// Error information for FFI
#[repr(C)]
pub struct LikertError {
    pub code: ErrorCode,
    pub message: [c_char; 256],
}

impl LikertError {
    pub fn success() -> Self {
        Self {
            code: ErrorCode::Success,
            message: [0; 256],
        }
    }

    pub fn set(&mut self, code: ErrorCode, msg: &str) {
        self.code = code;
        let bytes = msg.as_bytes();
        let len = bytes.len().min(255);
        for (i, &b) in bytes[..len].iter().enumerate() {
            self.message[i] = b as c_char;
        }
        self.message[len] = 0;
    }
}

/// Array of f64 values with validity mask for NULL handling
#[repr(C)]
pub struct DataArray {
    /// Pointer to data values
    pub data: *const f64,
    /// Validity bitmask: bit i is 1 if data[i] is valid, 0 if NULL
    /// Can be NULL if all values are valid
    pub validity: *const u8,
    /// Number of elements
    pub len: usize,
}

impl DataArray {
    /// Check if index i is valid (not NULL)
    ///
    /// # Safety
    /// Caller must ensure index is within bounds
    pub unsafe fn is_valid(&self, i: usize) -> bool {
        if self.validity.is_null() {
            return true;
        }
        let byte_idx = i / 8;
        let bit_idx = i % 8;
        ((*self.validity.add(byte_idx)) >> bit_idx) & 1 == 1
    }

    /// Convert to Vec<f64>, replacing NULL with NaN
    ///
    /// # Safety
    /// Caller must ensure pointers are valid and len is correct
    pub unsafe fn to_vec(&self) -> Vec<f64> {
        if self.data.is_null() {
            return Vec::new();
        }
        let mut result = Vec::with_capacity(self.len);
        for i in 0..self.len {
            if self.is_valid(i) {
                result.push(*self.data.add(i));
            } else {
                result.push(f64::NAN);
            }
        }
        result
    }
}

/// Correlation method selector
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorrelationMethodFFI {
    Pearson = 0,
    Spearman = 1,
}

impl From<CorrelationMethodFFI> for CorrelationMethod {
    fn from(method: CorrelationMethodFFI) -> Self {
        match method {
            CorrelationMethodFFI::Pearson => CorrelationMethod::Pearson,
            CorrelationMethodFFI::Spearman => CorrelationMethod::Spearman,
        }
    }
}

impl From<CorrelationMethod> for CorrelationMethodFFI {
    fn from(method: CorrelationMethod) -> Self {
        match method {
            CorrelationMethod::Pearson => CorrelationMethodFFI::Pearson,
            CorrelationMethod::Spearman => CorrelationMethodFFI::Spearman,
        }
    }
}

/// Descriptive summary for FFI
#[repr(C)]
pub struct DescriptiveSummaryFFI {
    /// Series label (must be freed)
    pub label: *mut c_char,
    pub n: usize,
    pub mean: f64,
    pub median: f64,
    pub mode: f64,
    pub min: f64,
    pub max: f64,
    /// NaN when n = 1
    pub std_dev: f64,
    /// NaN when n = 1
    pub variance: f64,
}

impl Default for DescriptiveSummaryFFI {
    fn default() -> Self {
        Self {
            label: std::ptr::null_mut(),
            n: 0,
            mean: f64::NAN,
            median: f64::NAN,
            mode: f64::NAN,
            min: f64::NAN,
            max: f64::NAN,
            std_dev: f64::NAN,
            variance: f64::NAN,
        }
    }
}

/// One frequency table row
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct FrequencyRowFFI {
    pub value: f64,
    pub count: usize,
    pub percentage: f64,
}

/// Normality check result for FFI
///
/// When `applicable` is false the test did not run: `statistic` and
/// `p_value` are NaN and `interpretation` holds the reason.
#[repr(C)]
pub struct NormalityResultFFI {
    pub applicable: bool,
    /// W statistic
    pub statistic: f64,
    pub p_value: f64,
    pub n: usize,
    pub is_normal: bool,
    /// Interpretation text (must be freed)
    pub interpretation: *mut c_char,
}

impl Default for NormalityResultFFI {
    fn default() -> Self {
        Self {
            applicable: false,
            statistic: f64::NAN,
            p_value: f64::NAN,
            n: 0,
            is_normal: false,
            interpretation: std::ptr::null_mut(),
        }
    }
}

impl NormalityResultFFI {
    /// Rebuild the core outcome; the interpretation text is not carried back
    pub fn to_outcome(&self) -> NormalityOutcome {
        if !self.applicable {
            return NormalityOutcome::NotApplicable {
                n: self.n,
                reason: String::new(),
            };
        }
        NormalityOutcome::Tested(NormalityResult {
            statistic: self.statistic,
            p_value: self.p_value,
            n: self.n,
            classification: if self.is_normal {
                NormalityClass::Normal
            } else {
                NormalityClass::NonNormal
            },
            interpretation: String::new(),
        })
    }
}

/// Correlation result for FFI
#[repr(C)]
pub struct CorrelationResultFFI {
    /// Correlation coefficient
    pub r: f64,
    /// t statistic
    pub statistic: f64,
    /// Two-sided p-value
    pub p_value: f64,
    /// Number of valid pairs
    pub n: usize,
    pub method: CorrelationMethodFFI,
}

impl Default for CorrelationResultFFI {
    fn default() -> Self {
        Self {
            r: f64::NAN,
            statistic: f64::NAN,
            p_value: f64::NAN,
            n: 0,
            method: CorrelationMethodFFI::Pearson,
        }
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectionFFI {
    Positive = 0,
    Negative = 1,
}

impl From<Direction> for DirectionFFI {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Positive => DirectionFFI::Positive,
            Direction::Negative => DirectionFFI::Negative,
        }
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrengthFFI {
    Weak = 0,
    Moderate = 1,
    Strong = 2,
}

impl From<Strength> for StrengthFFI {
    fn from(strength: Strength) -> Self {
        match strength {
            Strength::Weak => StrengthFFI::Weak,
            Strength::Moderate => StrengthFFI::Moderate,
            Strength::Strong => StrengthFFI::Strong,
        }
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignificanceFFI {
    HighlySignificant = 0,
    VerySignificant = 1,
    Significant = 2,
    NotSignificant = 3,
}

impl From<SignificanceTier> for SignificanceFFI {
    fn from(tier: SignificanceTier) -> Self {
        match tier {
            SignificanceTier::HighlySignificant => SignificanceFFI::HighlySignificant,
            SignificanceTier::VerySignificant => SignificanceFFI::VerySignificant,
            SignificanceTier::Significant => SignificanceFFI::Significant,
            SignificanceTier::NotSignificant => SignificanceFFI::NotSignificant,
        }
    }
}

/// Interpretation of a correlation for FFI
#[repr(C)]
pub struct InterpretationFFI {
    pub direction: DirectionFFI,
    pub strength: StrengthFFI,
    pub significance: SignificanceFFI,
    /// Summary sentence (must be freed)
    pub summary: *mut c_char,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validity_mask() {
        let data = [1.0, 2.0, 3.0, 4.0];
        let validity = [0b0000_1011u8];
        let array = DataArray {
            data: data.as_ptr(),
            validity: validity.as_ptr(),
            len: data.len(),
        };
        let values = unsafe { array.to_vec() };

        assert_eq!(values[0], 1.0);
        assert_eq!(values[1], 2.0);
        assert!(values[2].is_nan());
        assert_eq!(values[3], 4.0);
    }

    #[test]
    fn test_error_message_truncated() {
        let mut err = LikertError::success();
        err.set(ErrorCode::InvalidInput, &"x".repeat(400));

        assert_eq!(err.code, ErrorCode::InvalidInput);
        assert_eq!(err.message[254], b'x' as c_char);
        assert_eq!(err.message[255], 0);
    }

    #[test]
    fn test_normality_round_trip_to_outcome() {
        let ffi = NormalityResultFFI {
            applicable: true,
            statistic: 0.97,
            p_value: 0.4,
            n: 12,
            is_normal: true,
            interpretation: std::ptr::null_mut(),
        };
        assert_eq!(ffi.to_outcome().p_value(), Some(0.4));

        let skipped = NormalityResultFFI::default();
        assert!(!skipped.to_outcome().is_applicable());
    }
}

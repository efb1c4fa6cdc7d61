use thiserror::Error;

/// Errors that can occur during survey analysis
#[derive(Error, Debug)]
pub enum StatsError {
    // Input validation errors
    #[error("Empty column selection: {set} must name at least one column")]
    EmptySelection { set: &'static str },

    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Dimension mismatch: {0}")]
    DimensionMismatchMsg(String),

    // Data availability errors
    #[error("All values are missing after numeric coercion")]
    NoValidData,

    #[error("Insufficient data: {0}")]
    InsufficientDataMsg(String),

    #[error("Insufficient data for correlation: {valid_pairs} valid pairs (need at least {required})")]
    InsufficientPairs { valid_pairs: usize, required: usize },

    // Numerical errors
    #[error("Distribution error: {0}")]
    Distribution(String),

    // Internal errors
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Result type for statistical operations
pub type StatsResult<T> = Result<T, StatsError>;

impl From<serde_json::Error> for StatsError {
    fn from(err: serde_json::Error) -> Self {
        StatsError::SerializationError(err.to_string())
    }
}

//! Error types for the varmax-forecast library.

use thiserror::Error;

/// Result type alias for forecast operations.
pub type Result<T> = std::result::Result<T, ForecastError>;

/// Errors that can occur during forecasting and verification.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ForecastError {
    /// Input data is empty.
    #[error("empty input data")]
    EmptyData,

    /// Insufficient observations for the requested model order.
    #[error("insufficient data: need at least {needed}, got {got}")]
    InsufficientData { needed: usize, got: usize },

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Dimension mismatch between data structures.
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// Period index violation (ordering, contiguity, parsing).
    #[error("period error: {0}")]
    PeriodError(String),

    /// Model has not been fitted yet.
    #[error("model must be fitted before prediction")]
    FitRequired,

    /// Exogenous regressors were used in training but are missing or
    /// misaligned at prediction time.
    #[error("missing exogenous regressors: {0}")]
    MissingRegressor(String),

    /// Named column not present in a frame.
    #[error("unknown column: {0}")]
    UnknownColumn(String),

    /// Requested period not present in a frame's index.
    #[error("period not found in index: {0}")]
    PeriodNotFound(String),

    /// Index out of bounds.
    #[error("index out of bounds: {index} (size: {size})")]
    IndexOutOfBounds { index: usize, size: usize },

    /// Two prediction outputs do not share the same index or labels.
    #[error("prediction indexes differ: {0}")]
    IndexMismatch(String),

    /// Element-wise comparison exceeded the allowed tolerance.
    #[error("values differ beyond tolerance: {0}")]
    ToleranceExceeded(String),

    /// Computation error (e.g., numerical issues).
    #[error("computation error: {0}")]
    ComputationError(String),
}

/// Crate-level error type for rhythmicity estimation.
///
/// Insufficient data is not an error: estimators report it as `NaN`.
/// These variants cover malformed inputs only.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid parameter value.
    #[error("invalid parameter `{name}`: got {value}, {reason}")]
    InvalidParameter {
        name: &'static str,
        value: String,
        reason: String,
    },

    /// A required dimension is zero or invalid.
    #[error("invalid size for `{name}`: {value} ({reason})")]
    InvalidSize {
        name: &'static str,
        value: usize,
        reason: &'static str,
    },

    /// Frequency range is invalid.
    #[error("invalid frequency range: fmin={fmin}, fmax={fmax} ({reason})")]
    InvalidFrequencyRange {
        fmin: f64,
        fmax: f64,
        reason: String,
    },

    /// The designated time axis does not exist in the input array.
    #[error("axis {axis} is out of bounds for an array with {ndim} dimensions")]
    InvalidAxis { axis: usize, ndim: usize },

    /// Output could not be assembled into the expected shape.
    #[error("shape mismatch: expected {expected}, got {got}")]
    ShapeMismatch { expected: String, got: String },
}

/// Convenience Result type for rhythmicity operations.
pub type Result<T> = std::result::Result<T, Error>;

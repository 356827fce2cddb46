use thiserror::Error;

/// Errors that terminate a regression call
///
/// These are structural problems with the caller's input. Numerical trouble
/// inside an estimator is never reported here; it is recovered by the manual
/// fallback and surfaced as a [`crate::FallbackEvent`] instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StatsError {
    #[error("Length mismatch: x has {x_len} elements, y has {y_len}")]
    LengthMismatch { x_len: usize, y_len: usize },

    #[error("Insufficient points: {n} provided (need at least 2)")]
    InsufficientPoints { n: usize },

    #[error("Insufficient valid points after removing NaN/Inf: {n} remain (need at least 2)")]
    InsufficientValidPoints { n: usize },

    #[error("Invalid value at index {index}: x = {x}, y = {y}")]
    InvalidValue { index: usize, x: f64, y: f64 },
}

/// Result type for regression calls
pub type StatsResult<T> = Result<T, StatsError>;

/// Failures reported by a fitted-line or correlation primitive
///
/// These never reach the caller of [`crate::regress`]; they are carried as the
/// cause of a fallback.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PrimitiveError {
    #[error("Empty input")]
    EmptyInput,

    #[error("Size mismatch: {left} vs {right}")]
    SizeMismatch { left: usize, right: usize },

    #[error("Series has zero variance")]
    ZeroVariance,

    #[error("{0}")]
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = StatsError::LengthMismatch { x_len: 3, y_len: 2 };
        assert_eq!(err.to_string(), "Length mismatch: x has 3 elements, y has 2");

        let err = StatsError::InsufficientValidPoints { n: 1 };
        assert!(err.to_string().contains("1 remain"));

        assert_eq!(PrimitiveError::Other("boom".into()).to_string(), "boom");
    }
}

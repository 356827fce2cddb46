use std::fmt;

use crate::errors::PrimitiveError;

/// A single `(x, y)` coordinate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// True when both coordinates are finite
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Result of a simple linear regression `y = intercept + slope * x`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegressionResult {
    /// Slope of the fitted line
    pub slope: f64,
    /// Intercept of the fitted line
    pub intercept: f64,
    /// R-squared (coefficient of determination)
    pub r_squared: f64,
}

/// Policy for pairs containing NaN or infinite values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InvalidValuePolicy {
    /// Drop the offending pair and keep going (default)
    #[default]
    Drop,
    /// Fail with `StatsError::InvalidValue` on the first offending pair
    Error,
}

/// Options for a regression call
#[derive(Debug, Clone)]
pub struct RegressionOptions {
    /// Minimum x-width of the fitted line before the fit counts as vertical
    pub vertical_tolerance: f64,
    /// How NaN/Inf pairs are handled during cleaning
    pub invalid_values: InvalidValuePolicy,
}

impl Default for RegressionOptions {
    fn default() -> Self {
        Self {
            vertical_tolerance: 1e-12,
            invalid_values: InvalidValuePolicy::Drop,
        }
    }
}

/// Why the primary path handed work to the manual estimator
#[derive(Debug, Clone, PartialEq)]
pub enum FallbackReason {
    /// The fitted-line primitive reported an error
    LineFitFailed(PrimitiveError),
    /// The fitted-line primitive returned fewer than two points
    TooFewFittedPoints { n: usize },
    /// An endpoint of the fitted line has a NaN or infinite coordinate
    NonFiniteEndpoint { first: Point, last: Point },
    /// The fitted line's x-range is narrower than the vertical tolerance
    VerticalFit { width: f64 },
    /// The correlation primitive reported an error
    CorrelationFailed(PrimitiveError),
    /// The correlation primitive returned NaN
    CorrelationNaN,
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LineFitFailed(e) => write!(f, "line fit failed: {e}"),
            Self::TooFewFittedPoints { n } => write!(f, "fitted line has {n} points"),
            Self::NonFiniteEndpoint { .. } => write!(f, "invalid regression line endpoints"),
            Self::VerticalFit { width } => {
                write!(f, "vertical line (x-range width {width:e})")
            }
            Self::CorrelationFailed(e) => write!(f, "correlation failed: {e}"),
            Self::CorrelationNaN => write!(f, "correlation is NaN"),
        }
    }
}

/// Which estimator produced each part of a result
#[derive(Debug, Clone, PartialEq)]
pub enum EstimationPath {
    /// Slope and intercept from the fitted line, R² from correlation
    Primary,
    /// Slope and intercept from the fitted line, R² from manual residuals
    PrimaryWithManualRSquared(FallbackReason),
    /// Everything from the manual estimator
    Manual(FallbackReason),
}

impl EstimationPath {
    /// The fallback cause, if any fallback happened
    pub fn fallback_reason(&self) -> Option<&FallbackReason> {
        match self {
            Self::Primary => None,
            Self::PrimaryWithManualRSquared(reason) | Self::Manual(reason) => Some(reason),
        }
    }

    /// Short label for tables and logs
    pub fn label(&self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::PrimaryWithManualRSquared(_) => "primary+manual-r2",
            Self::Manual(_) => "manual",
        }
    }
}

/// A regression result together with how it was obtained
#[derive(Debug, Clone, PartialEq)]
pub struct Estimate {
    pub result: RegressionResult,
    pub path: EstimationPath,
    /// Number of pairs used after cleaning
    pub n_used: usize,
    /// Number of pairs dropped during cleaning
    pub n_dropped: usize,
}

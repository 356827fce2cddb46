//! Collaborator primitives used by the primary estimator
//!
//! The primary path trusts nothing these return: fitted lines are checked for
//! length, finiteness and width, correlations for NaN. Closures with the right
//! signature implement both traits, which keeps test doubles one-liners.

mod correlation;
mod line;

pub use correlation::PearsonCorrelation;
pub use line::OlsLine;

use crate::errors::PrimitiveError;
use crate::types::Point;

/// Produces a fitted line for a set of coordinates
pub trait LineFitter {
    /// Fit a line and return it as an ordered sequence of points
    fn fit_line(&self, coords: &[Point]) -> Result<Vec<Point>, PrimitiveError>;
}

/// Computes a correlation coefficient between two equal-length series
pub trait Correlator {
    fn correlation(&self, x: &[f64], y: &[f64]) -> Result<f64, PrimitiveError>;
}

/// Largest magnitude in `values`, or 1 when that is zero or not finite
///
/// Both built-in primitives divide by this before handing data to their
/// backends. Sums of squares then stay finite for inputs near the top of the
/// `f64` range.
pub(crate) fn magnitude(values: impl IntoIterator<Item = f64>) -> f64 {
    let max = values.into_iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
    if max > 0.0 && max.is_finite() {
        max
    } else {
        1.0
    }
}

impl<F> LineFitter for F
where
    F: Fn(&[Point]) -> Result<Vec<Point>, PrimitiveError>,
{
    fn fit_line(&self, coords: &[Point]) -> Result<Vec<Point>, PrimitiveError> {
        self(coords)
    }
}

impl<F> Correlator for F
where
    F: Fn(&[f64], &[f64]) -> Result<f64, PrimitiveError>,
{
    fn correlation(&self, x: &[f64], y: &[f64]) -> Result<f64, PrimitiveError> {
        self(x, y)
    }
}

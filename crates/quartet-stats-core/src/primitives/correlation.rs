use statrs::statistics::Statistics;

use super::{magnitude, Correlator};
use crate::errors::PrimitiveError;

/// Pearson product-moment correlation from population moments
///
/// A constant series has no defined correlation and is reported as
/// `ZeroVariance` rather than a number. Each series is divided by its largest
/// magnitude first, which leaves the coefficient unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct PearsonCorrelation;

impl Correlator for PearsonCorrelation {
    fn correlation(&self, x: &[f64], y: &[f64]) -> Result<f64, PrimitiveError> {
        if x.is_empty() || y.is_empty() {
            return Err(PrimitiveError::EmptyInput);
        }
        if x.len() != y.len() {
            return Err(PrimitiveError::SizeMismatch {
                left: x.len(),
                right: y.len(),
            });
        }

        let x_scale = magnitude(x.iter().copied());
        let y_scale = magnitude(y.iter().copied());
        let x: Vec<f64> = x.iter().map(|v| v / x_scale).collect();
        let y: Vec<f64> = y.iter().map(|v| v / y_scale).collect();

        let sd_x = x.iter().population_std_dev();
        let sd_y = y.iter().population_std_dev();
        if sd_x == 0.0 || sd_y == 0.0 {
            return Err(PrimitiveError::ZeroVariance);
        }

        let cov = x.iter().population_covariance(y.iter());
        Ok(cov / (sd_x * sd_y))
    }
}

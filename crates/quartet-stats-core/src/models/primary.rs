//! Primary estimator: slope and intercept from a fitted line's endpoints

use crate::cleaning::CleanedData;
use crate::primitives::{Correlator, LineFitter};
use crate::types::FallbackReason;

/// Slope and intercept read off a fitted line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineEstimate {
    pub slope: f64,
    pub intercept: f64,
}

/// Derive slope and intercept from the first and last point of a fitted line
///
/// # Arguments
/// * `fitter` - Fitted-line primitive; its output is not trusted
/// * `data` - Cleaned pairs
/// * `vertical_tolerance` - Minimum x-width between the endpoints
///
/// # Returns
/// The line estimate, or the reason the manual estimator should take over
pub fn fit_endpoints<L>(
    fitter: &L,
    data: &CleanedData,
    vertical_tolerance: f64,
) -> Result<LineEstimate, FallbackReason>
where
    L: LineFitter + ?Sized,
{
    let line = fitter
        .fit_line(&data.points())
        .map_err(FallbackReason::LineFitFailed)?;

    let (first, last) = match (line.first(), line.last()) {
        (Some(&first), Some(&last)) if line.len() >= 2 => (first, last),
        _ => return Err(FallbackReason::TooFewFittedPoints { n: line.len() }),
    };

    if !first.is_finite() || !last.is_finite() {
        return Err(FallbackReason::NonFiniteEndpoint { first, last });
    }

    let width = last.x - first.x;
    if width.abs() < vertical_tolerance {
        return Err(FallbackReason::VerticalFit { width });
    }

    let slope = (last.y - first.y) / width;
    let intercept = first.y - slope * first.x;

    Ok(LineEstimate { slope, intercept })
}

/// R² as the squared correlation of the cleaned pairs
pub fn correlation_r_squared<C>(correlator: &C, data: &CleanedData) -> Result<f64, FallbackReason>
where
    C: Correlator + ?Sized,
{
    let r = correlator
        .correlation(&data.x, &data.y)
        .map_err(FallbackReason::CorrelationFailed)?;
    if r.is_nan() {
        return Err(FallbackReason::CorrelationNaN);
    }
    Ok(r * r)
}

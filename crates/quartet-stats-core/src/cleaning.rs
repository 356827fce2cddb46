//! Input validation and NaN/Inf filtering

use crate::errors::{StatsError, StatsResult};
use crate::types::{InvalidValuePolicy, Point};

/// Index-aligned pairs that survived cleaning, in their original order
#[derive(Debug, Clone, PartialEq)]
pub struct CleanedData {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    /// Number of pairs removed because a value was NaN or infinite
    pub n_dropped: usize,
}

impl CleanedData {
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// The cleaned pairs as coordinates for a line fitter
    pub fn points(&self) -> Vec<Point> {
        self.x
            .iter()
            .zip(&self.y)
            .map(|(&x, &y)| Point::new(x, y))
            .collect()
    }
}

/// Validate shapes and remove pairs where either value is NaN or infinite
///
/// # Errors
/// * `LengthMismatch` if `x` and `y` differ in length
/// * `InsufficientPoints` if fewer than 2 pairs are provided
/// * `InvalidValue` if `policy` is `Error` and a pair is not finite
/// * `InsufficientValidPoints` if fewer than 2 pairs survive filtering
pub fn clean_pairs(x: &[f64], y: &[f64], policy: InvalidValuePolicy) -> StatsResult<CleanedData> {
    if x.len() != y.len() {
        return Err(StatsError::LengthMismatch {
            x_len: x.len(),
            y_len: y.len(),
        });
    }
    if x.len() < 2 {
        return Err(StatsError::InsufficientPoints { n: x.len() });
    }

    let mut clean_x = Vec::with_capacity(x.len());
    let mut clean_y = Vec::with_capacity(y.len());

    for (index, (&xi, &yi)) in x.iter().zip(y).enumerate() {
        if xi.is_finite() && yi.is_finite() {
            clean_x.push(xi);
            clean_y.push(yi);
        } else if policy == InvalidValuePolicy::Error {
            return Err(StatsError::InvalidValue { index, x: xi, y: yi });
        }
    }

    if clean_x.len() < 2 {
        return Err(StatsError::InsufficientValidPoints { n: clean_x.len() });
    }

    Ok(CleanedData {
        n_dropped: x.len() - clean_x.len(),
        x: clean_x,
        y: clean_y,
    })
}

use anofox_regression::prelude::*;
use faer::{Col, Mat};

use super::{magnitude, LineFitter};
use crate::errors::PrimitiveError;
use crate::types::Point;

/// Ordinary least squares on a single feature, evaluated at every input x
///
/// Points come back in input order, so the endpoints are the first and last
/// input x rather than the extremes. A constant x column is aliased by the
/// backend and every fitted y is the intercept.
///
/// The backend sees x and y divided by their largest magnitude; fitted values
/// are scaled back before they are returned.
#[derive(Debug, Clone, Copy, Default)]
pub struct OlsLine;

impl LineFitter for OlsLine {
    fn fit_line(&self, coords: &[Point]) -> Result<Vec<Point>, PrimitiveError> {
        if coords.is_empty() {
            return Err(PrimitiveError::EmptyInput);
        }

        let n = coords.len();
        let x_scale = magnitude(coords.iter().map(|p| p.x));
        let y_scale = magnitude(coords.iter().map(|p| p.y));
        let x_mat = Mat::from_fn(n, 1, |i, _| coords[i].x / x_scale);
        let y_col = Col::from_fn(n, |i| coords[i].y / y_scale);

        let fitted = OlsRegressor::builder()
            .with_intercept(true)
            .compute_inference(false)
            .build()
            .fit(&x_mat, &y_col)
            .map_err(|e| PrimitiveError::Other(format!("{:?}", e)))?;

        let predicted = fitted.predict(&x_mat);
        Ok(coords
            .iter()
            .zip(predicted.iter())
            .map(|(p, &y)| Point::new(p.x, y * y_scale))
            .collect())
    }
}

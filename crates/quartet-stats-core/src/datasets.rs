//! Reference datasets

use crate::types::RegressionResult;

/// A named pair of index-aligned series
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub name: String,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl Dataset {
    pub fn new(name: impl Into<String>, x: Vec<f64>, y: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            x,
            y,
        }
    }
}

/// Published least-squares fit shared by all four Anscombe datasets
pub const ANSCOMBE_REFERENCE: RegressionResult = RegressionResult {
    slope: 0.500091,
    intercept: 3.000091,
    r_squared: 0.666542,
};

const ANSCOMBE_X: [f64; 11] = [10.0, 8.0, 13.0, 9.0, 11.0, 14.0, 6.0, 4.0, 12.0, 7.0, 5.0];

/// Anscombe's quartet, datasets I to IV in order
///
/// I, II and III share the same x values. IV has every x equal to 8 except
/// one point at 19.
pub fn anscombe_quartet() -> Vec<Dataset> {
    vec![
        Dataset::new(
            "I",
            ANSCOMBE_X.to_vec(),
            vec![8.04, 6.95, 7.58, 8.81, 8.33, 9.96, 7.24, 4.26, 10.84, 4.82, 5.68],
        ),
        Dataset::new(
            "II",
            ANSCOMBE_X.to_vec(),
            vec![9.14, 8.14, 8.74, 8.77, 9.26, 8.10, 6.13, 3.10, 9.13, 7.26, 4.74],
        ),
        Dataset::new(
            "III",
            ANSCOMBE_X.to_vec(),
            vec![7.46, 6.77, 12.74, 7.11, 7.81, 8.84, 6.08, 5.39, 8.15, 6.42, 5.73],
        ),
        Dataset::new(
            "IV",
            vec![8.0, 8.0, 8.0, 8.0, 8.0, 8.0, 8.0, 19.0, 8.0, 8.0, 8.0],
            vec![6.58, 5.76, 7.71, 8.84, 8.47, 7.04, 5.25, 12.50, 5.56, 7.91, 6.89],
        ),
    ]
}

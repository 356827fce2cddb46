//! Closed-form least squares on centred data

use statrs::statistics::Statistics;

use crate::types::RegressionResult;

/// Fit `y = intercept + slope * x` with the normal-equation formulas
///
/// Always returns a result. If every x is identical the slope is defined as 0
/// and the intercept as the mean of y. R² comes from the residuals of this
/// line; when y has zero variance it is 1 for a perfect fit and 0 otherwise.
///
/// Deviations from the means are divided by their largest magnitude before
/// any products are summed, so finite input gives a finite triple.
///
/// Callers must pass equal-length, finite, non-empty slices.
pub fn fit_manual(x: &[f64], y: &[f64]) -> RegressionResult {
    let mean_x = x.iter().mean();
    let mean_y = y.iter().mean();

    let scale_x = spread(x, mean_x);
    let scale_y = spread(y, mean_y);
    let u: Vec<f64> = x.iter().map(|&xi| (xi - mean_x) / scale_x).collect();
    let v: Vec<f64> = y.iter().map(|&yi| (yi - mean_y) / scale_y).collect();

    let mut s_uu = 0.0;
    let mut s_uv = 0.0;
    let mut s_vv = 0.0;
    for (&ui, &vi) in u.iter().zip(&v) {
        s_uu += ui * ui;
        s_uv += ui * vi;
        s_vv += vi * vi;
    }

    let identical_x = x.iter().all(|&xi| xi == x[0]);
    let (slope, intercept, scaled_slope) = if identical_x || s_uu == 0.0 {
        (0.0, mean_y, 0.0)
    } else {
        let scaled_slope = s_uv / s_uu;
        let slope = scaled_slope * (scale_y / scale_x);
        (slope, mean_y - slope * mean_x, scaled_slope)
    };

    // Residual and total sums share the same scale, so their ratio is exact
    let ss_total = s_vv;
    let ss_residual: f64 = u
        .iter()
        .zip(&v)
        .map(|(&ui, &vi)| {
            let residual = vi - scaled_slope * ui;
            residual * residual
        })
        .sum();

    let r_squared = if ss_total > 0.0 {
        1.0 - ss_residual / ss_total
    } else if ss_residual == 0.0 {
        1.0
    } else {
        0.0
    };

    RegressionResult {
        slope,
        intercept,
        r_squared,
    }
}

/// Largest absolute deviation from `mean`, or 1 if there is none
fn spread(values: &[f64], mean: f64) -> f64 {
    let max = values
        .iter()
        .fold(0.0_f64, |acc, &v| acc.max((v - mean).abs()));
    if max > 0.0 {
        max
    } else {
        1.0
    }
}

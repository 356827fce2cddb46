use std::sync::Arc;
use std::time::{Duration, Instant};

use approx::assert_abs_diff_eq;
use quartet_stats_core::datasets::{anscombe_quartet, ANSCOMBE_REFERENCE};
use quartet_stats_core::{
    regress, CollectingObserver, EstimationPath, Estimator, FallbackReason, FallbackStage,
    StatsError,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// ============================================================================
// Quartet properties
// ============================================================================

#[test]
fn test_quartet_coefficients() {
    for dataset in anscombe_quartet() {
        let result = regress(&dataset.x, &dataset.y)
            .unwrap_or_else(|e| panic!("dataset {} failed: {e}", dataset.name));
        assert_abs_diff_eq!(result.slope, 0.500, epsilon = 0.01);
        assert_abs_diff_eq!(result.intercept, 3.000, epsilon = 0.01);
        assert_abs_diff_eq!(result.r_squared, ANSCOMBE_REFERENCE.r_squared, epsilon = 0.01);
    }
}

#[test]
fn test_shared_x_datasets_agree_on_r_squared() {
    let quartet = anscombe_quartet();
    let r2: Vec<f64> = quartet[..3]
        .iter()
        .map(|d| regress(&d.x, &d.y).unwrap().r_squared)
        .collect();

    for value in &r2[1..] {
        assert_abs_diff_eq!(*value, r2[0], epsilon = 0.01);
    }
}

#[test]
fn test_quartet_paths() {
    let estimator = Estimator::new();
    let quartet = anscombe_quartet();

    for dataset in &quartet[..3] {
        let estimate = estimator.estimate(&dataset.x, &dataset.y).unwrap();
        assert_eq!(estimate.path, EstimationPath::Primary, "dataset {}", dataset.name);
    }

    // IV starts and ends at x = 8, so the fitted line has zero width
    let iv = &quartet[3];
    let estimate = estimator.estimate(&iv.x, &iv.y).unwrap();
    assert!(matches!(
        estimate.path,
        EstimationPath::Manual(FallbackReason::VerticalFit { .. })
    ));
}

// ============================================================================
// Boundaries and degenerate inputs
// ============================================================================

#[test]
fn test_nan_pair_is_dropped() {
    let result = regress(&[1.0, 2.0, 3.0], &[f64::NAN, 2.0, 4.0]).unwrap();
    assert_abs_diff_eq!(result.slope, 2.0, epsilon = 1e-12);
    assert_abs_diff_eq!(result.intercept, -2.0, epsilon = 1e-12);
}

#[test]
fn test_single_point() {
    assert_eq!(
        regress(&[1.0], &[1.0]),
        Err(StatsError::InsufficientPoints { n: 1 })
    );
}

#[test]
fn test_length_mismatch() {
    assert_eq!(
        regress(&[1.0, 2.0, 3.0], &[1.0, 2.0]),
        Err(StatsError::LengthMismatch { x_len: 3, y_len: 2 })
    );
}

#[test]
fn test_all_invalid() {
    assert_eq!(
        regress(&[f64::NAN, 1.0, f64::INFINITY], &[1.0, f64::NAN, 2.0]),
        Err(StatsError::InsufficientValidPoints { n: 0 })
    );
}

#[test]
fn test_identical_x_falls_back_to_flat_line() {
    let observer = Arc::new(CollectingObserver::new());
    let estimator = Estimator::new().with_observer(observer.clone());

    let estimate = estimator
        .estimate(&[5.0, 5.0, 5.0, 5.0], &[1.0, 2.0, 3.0, 4.0])
        .unwrap();
    assert_eq!(estimate.result.slope, 0.0);
    assert_eq!(estimate.result.intercept, 2.5);
    assert!(matches!(estimate.path, EstimationPath::Manual(_)));

    let events = observer.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].stage, FallbackStage::Estimate);
}

#[test]
fn test_identical_inexact_x_gives_zero_slope() {
    let estimate = Estimator::new()
        .estimate(&[0.7; 5], &[0.0, 1.0, 2.0, 3.0, 4.0])
        .unwrap();
    assert_eq!(estimate.result.slope, 0.0);
    assert_eq!(estimate.result.intercept, 2.0);
    assert!(matches!(estimate.path, EstimationPath::Manual(_)));
}

#[test]
fn test_huge_finite_inputs_give_finite_result() {
    let result = regress(&[1e200, 2e200, 3e200], &[1.0, 2.0, 3.0]).unwrap();
    assert!(result.slope.is_finite());
    assert!(result.intercept.is_finite());
    assert!(result.r_squared.is_finite());
    assert_abs_diff_eq!(result.slope * 1e200, 1.0, epsilon = 1e-9);
    assert_abs_diff_eq!(result.r_squared, 1.0, epsilon = 1e-9);
}

#[test]
fn test_constant_y_has_perfect_r_squared() {
    let estimator = Estimator::new();
    let estimate = estimator.estimate(&[1.0, 2.0, 3.0], &[7.0, 7.0, 7.0]).unwrap();

    assert_eq!(estimate.result.r_squared, 1.0);
    assert_abs_diff_eq!(estimate.result.slope, 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!(estimate.result.intercept, 7.0, epsilon = 1e-12);
    assert!(matches!(
        estimate.path,
        EstimationPath::PrimaryWithManualRSquared(FallbackReason::CorrelationFailed(_))
    ));
}

// ============================================================================
// Determinism
// ============================================================================

#[test]
fn test_repeat_calls_are_bit_identical() {
    let mut rng = StdRng::seed_from_u64(42);
    let estimator = Estimator::new();

    for _ in 0..50 {
        let n = rng.gen_range(2..40);
        let x: Vec<f64> = (0..n).map(|_| rng.gen_range(-100.0..100.0)).collect();
        let y: Vec<f64> = x
            .iter()
            .map(|xi| 1.5 * xi - 4.0 + rng.gen_range(-5.0..5.0))
            .collect();

        let first = estimator.regress(&x, &y).unwrap();
        let second = estimator.regress(&x, &y).unwrap();
        assert_eq!(first.slope.to_bits(), second.slope.to_bits());
        assert_eq!(first.intercept.to_bits(), second.intercept.to_bits());
        assert_eq!(first.r_squared.to_bits(), second.r_squared.to_bits());
    }
}

#[test]
fn test_r_squared_in_unit_interval() {
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..50 {
        let n = rng.gen_range(3..30);
        let x: Vec<f64> = (0..n).map(|_| rng.gen_range(0.0..10.0)).collect();
        let y: Vec<f64> = (0..n).map(|_| rng.gen_range(0.0..10.0)).collect();

        let result = regress(&x, &y).unwrap();
        assert!(result.r_squared >= -1e-12 && result.r_squared <= 1.0 + 1e-12);
    }
}

// ============================================================================
// Performance
// ============================================================================

#[test]
fn test_thousand_regressions_are_fast() {
    let quartet = anscombe_quartet();
    let estimator = Estimator::new();

    let start = Instant::now();
    for i in 0..1000 {
        let dataset = &quartet[i % quartet.len()];
        estimator.regress(&dataset.x, &dataset.y).unwrap();
    }
    let elapsed = start.elapsed();

    assert!(
        elapsed < Duration::from_millis(100),
        "1000 regressions took {elapsed:?}"
    );
}

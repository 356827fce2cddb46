//! Estimation orchestrator
//!
//! A regression call runs in two steps. [`Estimator::decide`] cleans the input,
//! runs the primary estimator and records which branch applies as a
//! [`Decision`], without side effects. [`Estimator::resolve`] turns that
//! decision into a result, running the manual estimator where the decision
//! calls for it and emitting fallback events.

use std::sync::Arc;

use crate::cleaning::{clean_pairs, CleanedData};
use crate::diagnostics::{emit, EstimationObserver, FallbackEvent, FallbackStage};
use crate::errors::{StatsError, StatsResult};
use crate::models::{correlation_r_squared, fit_endpoints, fit_manual, LineEstimate};
use crate::primitives::{Correlator, LineFitter, OlsLine, PearsonCorrelation};
use crate::types::{Estimate, EstimationPath, FallbackReason, RegressionOptions, RegressionResult};

/// Where R² comes from on the primary path
#[derive(Debug, Clone, PartialEq)]
pub enum RSquaredSource {
    /// Squared correlation of the cleaned pairs
    Correlation(f64),
    /// Correlation was unusable; the manual residual R² is used instead
    Manual(FallbackReason),
}

/// Branch taken by a single regression call
#[derive(Debug, Clone, PartialEq)]
pub enum Decision {
    /// The fitted line passed every check
    PrimaryOk {
        data: CleanedData,
        line: LineEstimate,
        r_squared: RSquaredSource,
    },
    /// The primary path failed; the manual estimator produces everything
    PrimaryFallback {
        data: CleanedData,
        reason: FallbackReason,
    },
    /// Input was rejected during cleaning
    CleanError(StatsError),
}

/// Dual-path simple linear regression
///
/// Holds no per-call state; one estimator can serve any number of calls,
/// including concurrent ones when the primitives are `Sync`.
#[derive(Clone)]
pub struct Estimator<L = OlsLine, C = PearsonCorrelation> {
    fitter: L,
    correlator: C,
    options: RegressionOptions,
    observer: Option<Arc<dyn EstimationObserver + Send + Sync>>,
}

impl Estimator {
    /// Estimator with the built-in primitives and default options
    pub fn new() -> Self {
        Self {
            fitter: OlsLine,
            correlator: PearsonCorrelation,
            options: RegressionOptions::default(),
            observer: None,
        }
    }
}

impl Default for Estimator {
    fn default() -> Self {
        Self::new()
    }
}

impl<L, C> Estimator<L, C>
where
    L: LineFitter,
    C: Correlator,
{
    pub fn with_options(mut self, options: RegressionOptions) -> Self {
        self.options = options;
        self
    }

    /// Replace the fitted-line primitive
    pub fn with_fitter<L2: LineFitter>(self, fitter: L2) -> Estimator<L2, C> {
        Estimator {
            fitter,
            correlator: self.correlator,
            options: self.options,
            observer: self.observer,
        }
    }

    /// Replace the correlation primitive
    pub fn with_correlator<C2: Correlator>(self, correlator: C2) -> Estimator<L, C2> {
        Estimator {
            fitter: self.fitter,
            correlator,
            options: self.options,
            observer: self.observer,
        }
    }

    /// Subscribe to fallback events
    pub fn with_observer(mut self, observer: Arc<dyn EstimationObserver + Send + Sync>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Clean the input and run the primary path, recording the outcome
    pub fn decide(&self, x: &[f64], y: &[f64]) -> Decision {
        let data = match clean_pairs(x, y, self.options.invalid_values) {
            Ok(data) => data,
            Err(e) => return Decision::CleanError(e),
        };

        let line = match fit_endpoints(&self.fitter, &data, self.options.vertical_tolerance) {
            Ok(line) => line,
            Err(reason) => return Decision::PrimaryFallback { data, reason },
        };

        let r_squared = match correlation_r_squared(&self.correlator, &data) {
            Ok(r2) => RSquaredSource::Correlation(r2),
            Err(reason) => RSquaredSource::Manual(reason),
        };

        Decision::PrimaryOk {
            data,
            line,
            r_squared,
        }
    }

    /// Turn a decision into a result
    pub fn resolve(&self, decision: Decision) -> StatsResult<Estimate> {
        let observer = self.observer.as_deref();

        let (result, path, data) = match decision {
            Decision::CleanError(e) => {
                tracing::debug!(error = %e, "regression input rejected");
                return Err(e);
            }
            Decision::PrimaryFallback { data, reason } => {
                emit(
                    FallbackEvent {
                        stage: FallbackStage::Estimate,
                        reason: reason.clone(),
                        n_points: data.len(),
                    },
                    observer,
                );
                let result = fit_manual(&data.x, &data.y);
                (result, EstimationPath::Manual(reason), data)
            }
            Decision::PrimaryOk {
                data,
                line,
                r_squared,
            } => {
                let (r_squared, path) = match r_squared {
                    RSquaredSource::Correlation(r2) => (r2, EstimationPath::Primary),
                    RSquaredSource::Manual(reason) => {
                        emit(
                            FallbackEvent {
                                stage: FallbackStage::RSquared,
                                reason: reason.clone(),
                                n_points: data.len(),
                            },
                            observer,
                        );
                        let r2 = fit_manual(&data.x, &data.y).r_squared;
                        (r2, EstimationPath::PrimaryWithManualRSquared(reason))
                    }
                };
                let result = RegressionResult {
                    slope: line.slope,
                    intercept: line.intercept,
                    r_squared,
                };
                (result, path, data)
            }
        };

        tracing::debug!(
            path = path.label(),
            n_used = data.len(),
            n_dropped = data.n_dropped,
            "regression complete"
        );

        Ok(Estimate {
            result,
            path,
            n_used: data.len(),
            n_dropped: data.n_dropped,
        })
    }

    /// Regress `y` on `x` and report which path produced the result
    pub fn estimate(&self, x: &[f64], y: &[f64]) -> StatsResult<Estimate> {
        self.resolve(self.decide(x, y))
    }

    /// Regress `y` on `x`
    pub fn regress(&self, x: &[f64], y: &[f64]) -> StatsResult<RegressionResult> {
        self.estimate(x, y).map(|estimate| estimate.result)
    }
}

/// Regress `y` on `x` with the built-in primitives and default options
///
/// # Errors
/// * `LengthMismatch` if `x` and `y` differ in length
/// * `InsufficientPoints` if fewer than 2 pairs are provided
/// * `InsufficientValidPoints` if fewer than 2 finite pairs remain
///
/// # Example
/// ```
/// use quartet_stats_core::regress;
///
/// let result = regress(&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0]).unwrap();
/// assert!((result.slope - 2.0).abs() < 1e-10);
/// assert!(result.intercept.abs() < 1e-10);
/// ```
pub fn regress(x: &[f64], y: &[f64]) -> StatsResult<RegressionResult> {
    Estimator::new().regress(x, y)
}

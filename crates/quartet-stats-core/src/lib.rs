//! quartet-stats-core: dual-path simple linear regression
//!
//! Slope and intercept come from a fitted line's endpoints when that line is
//! usable, and from the closed-form least-squares formulas otherwise. Invalid
//! input shapes are errors; numerical trouble during estimation is recovered
//! internally and reported through [`FallbackEvent`]s.

pub mod batch;
pub mod cleaning;
pub mod datasets;
pub mod diagnostics;
pub mod errors;
pub mod estimator;
pub mod models;
pub mod primitives;
pub mod types;

pub use diagnostics::{CollectingObserver, EstimationObserver, FallbackEvent, FallbackStage};
pub use errors::{PrimitiveError, StatsError, StatsResult};
pub use estimator::{regress, Decision, Estimator, RSquaredSource};
pub use types::*;

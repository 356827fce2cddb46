//! Estimator implementations

mod manual;
mod primary;

pub use manual::fit_manual;
pub use primary::{correlation_r_squared, fit_endpoints, LineEstimate};

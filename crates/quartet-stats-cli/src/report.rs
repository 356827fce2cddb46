//! Console formatting and exit codes

use std::fmt;
use std::process::ExitCode;

use quartet_stats_core::batch::{BatchEntry, BatchReport};
use quartet_stats_core::{RegressionResult, StatsError};

/// Process exit codes, one per error kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Success = 0,
    LengthMismatch = 1,
    InsufficientPoints = 2,
    InsufficientValidPoints = 3,
    InvalidValue = 4,
}

impl From<ErrorCode> for ExitCode {
    fn from(code: ErrorCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// Convert StatsError to ErrorCode
pub fn error_to_code(err: &StatsError) -> ErrorCode {
    match err {
        StatsError::LengthMismatch { .. } => ErrorCode::LengthMismatch,
        StatsError::InsufficientPoints { .. } => ErrorCode::InsufficientPoints,
        StatsError::InsufficientValidPoints { .. } => ErrorCode::InsufficientValidPoints,
        StatsError::InvalidValue { .. } => ErrorCode::InvalidValue,
    }
}

/// Exit code for a batch: the first failure's code, or success
pub fn batch_exit_code(report: &BatchReport) -> ErrorCode {
    report
        .entries
        .iter()
        .find_map(|e| e.outcome.as_ref().err())
        .map(error_to_code)
        .unwrap_or(ErrorCode::Success)
}

/// Per-dataset block
pub struct EntryBlock<'a>(pub &'a BatchEntry);

impl fmt::Display for EntryBlock<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entry = self.0;
        let estimate = match &entry.outcome {
            Ok(estimate) => estimate,
            Err(e) => return writeln!(f, "Dataset {}: regression failed: {e}", entry.name),
        };

        let r = &estimate.result;
        writeln!(f, "Dataset {}:", entry.name)?;
        writeln!(f, "  Slope:     {:.6}", r.slope)?;
        writeln!(f, "  Intercept: {:.6}", r.intercept)?;
        writeln!(f, "  R-squared: {:.6}", r.r_squared)?;
        writeln!(f, "  Path:      {}", estimate.path.label())?;
        if let Some(reason) = estimate.path.fallback_reason() {
            writeln!(f, "  Fallback:  {reason}")?;
        }
        writeln!(f, "  Time:      {:?}", entry.elapsed)
    }
}

/// Summary table plus timing totals
pub struct SummaryTable<'a>(pub &'a BatchReport);

impl fmt::Display for SummaryTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;
        let rule = "-".repeat(72);

        writeln!(f, "=== Summary ===")?;
        writeln!(f, "{rule}")?;
        writeln!(
            f,
            "{:<8} {:>10} {:>10} {:>10} {:<18} {:>12}",
            "Dataset", "Slope", "Intercept", "R-squared", "Path", "Elapsed"
        )?;
        writeln!(f, "{rule}")?;
        for entry in &report.entries {
            match &entry.outcome {
                Ok(estimate) => {
                    let r = &estimate.result;
                    writeln!(
                        f,
                        "{:<8} {:>10.4} {:>10.4} {:>10.4} {:<18} {:>12}",
                        entry.name,
                        r.slope,
                        r.intercept,
                        r.r_squared,
                        estimate.path.label(),
                        format!("{:?}", entry.elapsed)
                    )?;
                }
                Err(e) => writeln!(f, "{:<8} error: {e}", entry.name)?,
            }
        }
        writeln!(f, "{rule}")?;

        writeln!(f, "Total execution time: {:?}", report.total)?;
        match report.average() {
            Some(avg) => writeln!(f, "Average per dataset:  {:.6}s", avg.as_secs_f64()),
            None => writeln!(f, "Average per dataset:  N/A (no datasets)"),
        }
    }
}

/// Reference values every quartet dataset should approximate
pub struct ReferenceBlock<'a>(pub &'a RegressionResult);

impl fmt::Display for ReferenceBlock<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reference = self.0;
        writeln!(f, "=== Expected Results (reference) ===")?;
        writeln!(f, "All datasets should have approximately:")?;
        writeln!(f, "  Slope:     {:.6}", reference.slope)?;
        writeln!(f, "  Intercept: {:.6}", reference.intercept)?;
        writeln!(f, "  R-squared: {:.6}", reference.r_squared)
    }
}

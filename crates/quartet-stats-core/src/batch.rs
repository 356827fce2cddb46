//! Timed regression over many named datasets
//!
//! A failing dataset is recorded in its entry and does not stop the batch.
//! The parallel runner uses the global rayon pool; entries come back in input
//! order either way.

use std::time::{Duration, Instant};

use rayon::prelude::*;

use crate::datasets::Dataset;
use crate::errors::StatsResult;
use crate::estimator::Estimator;
use crate::primitives::{Correlator, LineFitter};
use crate::types::Estimate;

/// Outcome of one dataset in a batch
#[derive(Debug, Clone)]
pub struct BatchEntry {
    pub name: String,
    pub outcome: StatsResult<Estimate>,
    /// Time spent in the regression call
    pub elapsed: Duration,
}

/// Outcomes of a whole batch
#[derive(Debug, Clone)]
pub struct BatchReport {
    pub entries: Vec<BatchEntry>,
    /// Wall-clock time for the whole batch
    pub total: Duration,
}

impl BatchReport {
    /// Wall-clock time divided by the number of datasets
    pub fn average(&self) -> Option<Duration> {
        let n = u32::try_from(self.entries.len()).ok()?;
        if n == 0 {
            return None;
        }
        Some(self.total / n)
    }

    /// Entries whose regression succeeded
    pub fn successes(&self) -> impl Iterator<Item = (&str, &Estimate)> {
        self.entries
            .iter()
            .filter_map(|e| e.outcome.as_ref().ok().map(|est| (e.name.as_str(), est)))
    }

    pub fn n_failed(&self) -> usize {
        self.entries.iter().filter(|e| e.outcome.is_err()).count()
    }
}

fn run_one<L, C>(estimator: &Estimator<L, C>, dataset: &Dataset) -> BatchEntry
where
    L: LineFitter,
    C: Correlator,
{
    let start = Instant::now();
    let outcome = estimator.estimate(&dataset.x, &dataset.y);
    let elapsed = start.elapsed();

    if let Err(e) = &outcome {
        tracing::warn!(dataset = %dataset.name, error = %e, "regression failed");
    }

    BatchEntry {
        name: dataset.name.clone(),
        outcome,
        elapsed,
    }
}

/// Regress every dataset in turn
pub fn regress_all<L, C>(estimator: &Estimator<L, C>, datasets: &[Dataset]) -> BatchReport
where
    L: LineFitter,
    C: Correlator,
{
    let start = Instant::now();
    let entries = datasets.iter().map(|d| run_one(estimator, d)).collect();
    BatchReport {
        entries,
        total: start.elapsed(),
    }
}

/// Regress every dataset on the rayon pool
pub fn par_regress_all<L, C>(estimator: &Estimator<L, C>, datasets: &[Dataset]) -> BatchReport
where
    L: LineFitter + Sync,
    C: Correlator + Sync,
{
    let start = Instant::now();
    let entries = datasets.par_iter().map(|d| run_one(estimator, d)).collect();
    BatchReport {
        entries,
        total: start.elapsed(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasets::anscombe_quartet;
    use crate::errors::StatsError;

    #[test]
    fn test_regress_all_quartet() {
        let report = regress_all(&Estimator::new(), &anscombe_quartet());
        assert_eq!(report.entries.len(), 4);
        assert_eq!(report.n_failed(), 0);
        assert_eq!(report.successes().count(), 4);
        assert!(report.average().is_some());
    }

    #[test]
    fn test_failure_does_not_stop_batch() {
        let datasets = vec![
            Dataset::new("short", vec![1.0], vec![1.0]),
            Dataset::new("ok", vec![1.0, 2.0, 3.0], vec![1.0, 2.0, 3.0]),
        ];
        let report = regress_all(&Estimator::new(), &datasets);

        assert_eq!(report.n_failed(), 1);
        assert_eq!(
            report.entries[0].outcome,
            Err(StatsError::InsufficientPoints { n: 1 })
        );
        let names: Vec<&str> = report.successes().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["ok"]);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let datasets = anscombe_quartet();
        let estimator = Estimator::new();
        let seq = regress_all(&estimator, &datasets);
        let par = par_regress_all(&estimator, &datasets);

        assert_eq!(seq.entries.len(), par.entries.len());
        for (a, b) in seq.entries.iter().zip(&par.entries) {
            assert_eq!(a.name, b.name);
            assert_eq!(a.outcome, b.outcome);
        }
    }

    #[test]
    fn test_empty_batch() {
        let report = regress_all(&Estimator::new(), &[]);
        assert!(report.entries.is_empty());
        assert_eq!(report.average(), None);
    }
}

//! Fallback diagnostics
//!
//! Every fallback is logged as a `tracing` event and, if the caller attached
//! one, delivered to an [`EstimationObserver`].

use std::sync::Mutex;

use crate::types::FallbackReason;

/// What the manual estimator was asked to replace
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackStage {
    /// Slope, intercept and R² all come from the manual estimator
    Estimate,
    /// Only R² comes from the manual estimator
    RSquared,
}

/// A single fallback notice
#[derive(Debug, Clone, PartialEq)]
pub struct FallbackEvent {
    pub stage: FallbackStage,
    pub reason: FallbackReason,
    /// Number of cleaned pairs in the regression
    pub n_points: usize,
}

/// Receives fallback notices from an estimator
pub trait EstimationObserver {
    fn on_fallback(&self, event: &FallbackEvent);
}

impl<F> EstimationObserver for F
where
    F: Fn(&FallbackEvent),
{
    fn on_fallback(&self, event: &FallbackEvent) {
        self(event)
    }
}

/// Observer that keeps every event it receives
#[derive(Debug, Default)]
pub struct CollectingObserver {
    events: Mutex<Vec<FallbackEvent>>,
}

impl CollectingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events received so far
    pub fn events(&self) -> Vec<FallbackEvent> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl EstimationObserver for CollectingObserver {
    fn on_fallback(&self, event: &FallbackEvent) {
        match self.events.lock() {
            Ok(mut events) => events.push(event.clone()),
            Err(poisoned) => poisoned.into_inner().push(event.clone()),
        }
    }
}

pub(crate) fn emit(event: FallbackEvent, observer: Option<&(dyn EstimationObserver + Send + Sync)>) {
    match event.stage {
        FallbackStage::Estimate => tracing::warn!(
            reason = %event.reason,
            n_points = event.n_points,
            "falling back to manual regression"
        ),
        FallbackStage::RSquared => tracing::warn!(
            reason = %event.reason,
            n_points = event.n_points,
            "falling back to manual R² calculation"
        ),
    }
    if let Some(observer) = observer {
        observer.on_fallback(&event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(stage: FallbackStage) -> FallbackEvent {
        FallbackEvent {
            stage,
            reason: FallbackReason::CorrelationNaN,
            n_points: 3,
        }
    }

    #[test]
    fn test_collecting_observer() {
        let observer = CollectingObserver::new();
        let sink: &(dyn EstimationObserver + Send + Sync) = &observer;
        emit(event(FallbackStage::Estimate), Some(sink));
        emit(event(FallbackStage::RSquared), Some(sink));

        let events = observer.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].stage, FallbackStage::Estimate);
        assert_eq!(events[1].stage, FallbackStage::RSquared);
    }

    #[test]
    fn test_emit_without_observer() {
        emit(event(FallbackStage::Estimate), None);
    }
}

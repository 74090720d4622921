//! Bounded whole-run restarts.
//!
//! The counter lives for the lifetime of a suite instance, not a single
//! `run`, so restarts granted in one run count against later runs too.

use tracing::{info, warn};

use crate::steps::{RestartSignal, StepResult, StepReturn};

/// Default restart budget, matching [`StaircaseConfig`](crate::config::StaircaseConfig).
pub const DEFAULT_RESTART_RETRIES: u32 = 1;

/// Answer to a restart request.
#[derive(Debug, PartialEq)]
pub enum RestartDecision {
    /// The attempt should be abandoned and the run started over.
    Granted(RestartSignal),
    /// The budget is spent; the calling step fails instead.
    Exhausted,
}

impl RestartDecision {
    /// What a step body should return for this decision.
    pub fn into_return(self) -> StepReturn {
        match self {
            RestartDecision::Granted(signal) => StepReturn::Restart(signal),
            RestartDecision::Exhausted => {
                let result = StepResult::max_retries_exceeded();
                StepReturn::sequence([
                    serde_json::Value::Bool(false),
                    result.value.unwrap_or_default(),
                ])
            }
        }
    }
}

/// Tracks how many restarts have been granted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestartController {
    max_retries: u32,
    retries: u32,
}

impl Default for RestartController {
    fn default() -> Self {
        Self::new(DEFAULT_RESTART_RETRIES)
    }
}

impl RestartController {
    pub fn new(max_retries: u32) -> Self {
        Self {
            max_retries,
            retries: 0,
        }
    }

    /// Grant a restart while the counter is at or below the maximum.
    pub fn request(&mut self) -> RestartDecision {
        if self.retries > self.max_retries {
            warn!(
                "Restart refused: {} restarts already granted (max {})",
                self.retries, self.max_retries
            );
            return RestartDecision::Exhausted;
        }
        self.retries += 1;
        info!("Restart {} granted", self.retries);
        RestartDecision::Granted(RestartSignal::granted())
    }

    /// Restarts granted so far.
    pub fn count(&self) -> u32 {
        self.retries
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    pub fn is_exhausted(&self) -> bool {
        self.retries > self.max_retries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::steps::MAX_RETRIES_EXCEEDED;

    #[test]
    fn zero_budget_grants_exactly_one_restart() {
        let mut controller = RestartController::new(0);
        assert!(matches!(controller.request(), RestartDecision::Granted(_)));
        assert_eq!(controller.count(), 1);
        assert!(controller.is_exhausted());
        assert_eq!(controller.request(), RestartDecision::Exhausted);
        assert_eq!(controller.count(), 1);
    }

    #[test]
    fn budget_is_inclusive() {
        let mut controller = RestartController::new(1);
        assert!(matches!(controller.request(), RestartDecision::Granted(_)));
        assert!(matches!(controller.request(), RestartDecision::Granted(_)));
        assert_eq!(controller.request(), RestartDecision::Exhausted);
    }

    #[test]
    fn default_budget() {
        assert_eq!(RestartController::default().max_retries(), DEFAULT_RESTART_RETRIES);
    }

    #[test]
    fn exhausted_return_is_a_failed_pair() {
        assert_eq!(
            RestartDecision::Exhausted.into_return(),
            StepReturn::sequence([
                serde_json::Value::Bool(false),
                serde_json::Value::from(MAX_RETRIES_EXCEEDED)
            ])
        );
    }

    #[test]
    fn granted_return_is_the_signal() {
        let mut controller = RestartController::new(3);
        assert!(matches!(
            controller.request().into_return(),
            StepReturn::Restart(_)
        ));
    }
}

//! The handle a step body receives.

use serde_json::Value;
use tracing::debug;

use crate::error::{Result, StaircaseError};
use crate::steps::outcome::{normalize, Normalized};
use crate::steps::{RestartSignal, StepDirectory, StepResult, StepReturn, SubstepRecord};
use crate::ui::StaircaseLogger;

use super::gate;
use super::restart::{RestartController, RestartDecision};

/// Passed to every step body; the only way a body talks back to the engine.
///
/// Substeps invoked through the context are recorded under the owning step.
/// Results of earlier steps can be read with [`result`](Self::result),
/// [`value`](Self::value), and [`has_passed`](Self::has_passed).
pub struct StepContext<'a> {
    step: &'a str,
    directory: &'a mut StepDirectory,
    restarts: &'a mut RestartController,
    logger: &'a mut dyn StaircaseLogger,
    restart_granted: bool,
    restart_refused: bool,
}

impl<'a> StepContext<'a> {
    pub(crate) fn new(
        step: &'a str,
        directory: &'a mut StepDirectory,
        restarts: &'a mut RestartController,
        logger: &'a mut dyn StaircaseLogger,
    ) -> Self {
        Self {
            step,
            directory,
            restarts,
            logger,
            restart_granted: false,
            restart_refused: false,
        }
    }

    /// Name of the step being executed.
    pub fn name(&self) -> &str {
        self.step
    }

    /// The suite's logging sink.
    pub fn logger(&mut self) -> &mut dyn StaircaseLogger {
        &mut *self.logger
    }

    /// The last result of another step in this run.
    pub fn result(&self, name: &str) -> Result<&StepResult> {
        self.directory.result(name)
    }

    /// The value recorded by another step in this run.
    pub fn value(&self, name: &str) -> Result<Option<&Value>> {
        self.directory.value(name)
    }

    pub fn has_passed(&self, name: &str) -> Result<bool> {
        self.directory.has_passed(name)
    }

    /// Ask for the whole run to start over.
    ///
    /// While budget remains the restart is granted: once the body returns,
    /// the attempt is abandoned whatever the body handed back. Asking again
    /// in the same invocation does not spend more budget. Once the budget is
    /// spent the step is recorded as failed with "max retries exceeded" and
    /// the run carries on.
    ///
    /// ```ignore
    /// .step(StepDefinition::task("recover"), |_, ctx| Ok(ctx.restart()))
    /// ```
    pub fn restart(&mut self) -> StepReturn {
        if self.restart_granted {
            return StepReturn::Restart(RestartSignal::granted());
        }
        let decision = self.restarts.request();
        match decision {
            RestartDecision::Granted(_) => {
                self.restart_granted = true;
                self.logger.info("Attempting to restart the test...");
            }
            RestartDecision::Exhausted => {
                self.restart_refused = true;
            }
        }
        decision.into_return()
    }

    pub(crate) fn restart_granted(&self) -> bool {
        self.restart_granted
    }

    pub(crate) fn restart_refused(&self) -> bool {
        self.restart_refused
    }

    /// Run a substep declared on this step and record its result.
    ///
    /// The substep's gate is checked first; a closed gate records a skip
    /// without calling `body`. Every call appends a new record, so calling the
    /// same substep in a loop keeps the full history.
    pub fn substep<R, F>(&mut self, name: &str, body: F) -> Result<StepResult>
    where
        F: FnOnce() -> anyhow::Result<R>,
        R: Into<StepReturn>,
    {
        let qualified = format!("{}.{}", self.step, name);
        let spec = self
            .directory
            .get(self.step)?
            .substep_spec(name)
            .cloned()
            .ok_or_else(|| StaircaseError::StepNotFound {
                name: qualified.clone(),
            })?;

        let result = if gate::eligible(self.directory, &spec.condition) {
            let returned = body().map_err(|source| StaircaseError::StepFailed {
                step: qualified.clone(),
                source,
            })?;
            match normalize(&qualified, returned.into())? {
                Normalized::Recorded(result) => result,
                Normalized::Restart => {
                    return Err(StaircaseError::InvariantViolation {
                        step: qualified,
                        message: "substeps cannot request a restart".to_string(),
                    })
                }
            }
        } else {
            debug!(substep = %qualified, "Substep gate closed");
            StepResult::gate_skipped()
        };

        self.directory.append_substep(
            self.step,
            SubstepRecord {
                name: qualified,
                description: spec.description,
                result: result.clone(),
            },
        )?;
        Ok(result)
    }
}

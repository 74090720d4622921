//! Step declarations, outcomes, and the step directory.
//!
//! - [`StepDefinition`] / [`SubstepDefinition`] - what a suite author declares
//! - [`Phase`] / [`Flight`] - step kinds and the flights they run in
//! - [`DependencyCondition`] - on_pass / on_fail gates
//! - [`StepReturn`] / [`StepResult`] / [`Outcome`] - what bodies return and what gets recorded
//! - [`StepDirectory`] - registration bookkeeping and per-run result state

pub mod condition;
pub mod definition;
pub mod directory;
pub mod outcome;
pub mod phase;

pub use condition::{DependencyCondition, GateKind, IntoStepNames};
pub use definition::{StepDefinition, SubstepDefinition};
pub use directory::{StepDirectory, StepEntry, SubstepRecord, SubstepSpec};
pub use outcome::{
    Outcome, RestartSignal, StepResult, StepReturn, GATE_SKIPPED, MAX_RETRIES_EXCEEDED,
};
pub use phase::{Flight, Phase};

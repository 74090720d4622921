//! Step execution orchestration.
//!
//! [`Staircase`] owns the step directory and drives a run through setup,
//! main, and teardown flights. Ordering lives in [`dependency`], gate checks
//! in [`gate`], and the restart budget in [`restart`].

pub mod context;
pub mod dependency;
pub mod engine;
pub mod gate;
pub mod restart;

pub use context::StepContext;
pub use dependency::{DependencyGraph, ExecutionPlan};
pub use engine::{EngineState, RunOptions, Staircase, StaircaseBuilder, StepFn};
pub use gate::eligible;
pub use restart::{RestartController, RestartDecision, DEFAULT_RESTART_RETRIES};

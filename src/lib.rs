//! Staircase - ordered, dependency-gated test suites.
//!
//! A suite is a set of named steps, each in one of four phases (setup, task,
//! test, teardown), optionally gated on the outcome of other steps. The
//! engine orders steps so every dependency runs first, runs setup before the
//! main steps and teardown after, skips steps whose gate is closed, and
//! renders a summary table at the end.
//!
//! # Modules
//!
//! - [`steps`] - Step definitions, conditions, results, and the step directory
//! - [`runner`] - Ordering, gate evaluation, restarts, and the execution engine
//! - [`config`] - Suite configuration loading
//! - [`ui`] - Logging sinks, themes, and report rendering
//! - [`cli`] - Command-line interface for the demo binary
//! - [`demo`] - Built-in demonstration suites
//! - [`error`] - Error types and result aliases
//!
//! # Example
//!
//! ```
//! use staircase::{RunOptions, Staircase};
//! use staircase::steps::{Outcome, StepDefinition};
//! use staircase::ui::MockLogger;
//!
//! let mut suite = Staircase::builder(())
//!     .logger(MockLogger::new())
//!     .step(StepDefinition::task("fetch"), |_, _| Ok(false))
//!     .step(StepDefinition::task("retry").on_fail("fetch"), |_, _| Ok(true))
//!     .step(StepDefinition::test("verify").on_pass("fetch"), |_, _| Ok(()))
//!     .build()
//!     .unwrap();
//!
//! suite.run(&RunOptions::default()).unwrap();
//! assert!(suite.has_passed("retry").unwrap());
//! assert_eq!(suite.get_result("verify").unwrap().outcome, Outcome::Skipped);
//! ```

pub mod cli;
pub mod config;
pub mod demo;
pub mod error;
pub mod runner;
pub mod steps;
pub mod ui;

pub use error::{Result, StaircaseError};
pub use runner::{EngineState, RunOptions, Staircase, StaircaseBuilder, StepContext};

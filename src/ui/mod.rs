//! Logging sinks and report rendering.
//!
//! This module provides:
//! - [`StaircaseLogger`] trait, the sink the engine and reports write through
//! - [`ConsoleLogger`] for plain terminal output and [`TracingLogger`] to
//!   forward into `tracing`
//! - [`MockLogger`] for capturing output in tests
//! - [`Reporter`] for the summary, preview, and results views
//!
//! # Example
//!
//! ```
//! use staircase::ui::{MockLogger, StaircaseLogger};
//!
//! let mut logger = MockLogger::new();
//! logger.info("Starting suite");
//! logger.error("Step failed");
//! assert_eq!(logger.infos(), ["Starting suite"]);
//! assert_eq!(logger.errors(), ["Step failed"]);
//! ```

pub mod logger;
pub mod mock;
pub mod report;
pub mod theme;

pub use logger::{ConsoleLogger, TracingLogger};
pub use mock::MockLogger;
pub use report::{PrintMode, Reporter};
pub use theme::{should_use_colors, StaircaseTheme};

/// Sink for user-facing output.
///
/// The engine calls [`error`](Self::error) exactly once per step body error,
/// before propagating it. Reports are written line by line through
/// [`info`](Self::info).
pub trait StaircaseLogger {
    /// Write an informational line.
    fn info(&mut self, msg: &str);

    /// Write an error line.
    fn error(&mut self, msg: &str);
}

impl<L: StaircaseLogger + ?Sized> StaircaseLogger for Box<L> {
    fn info(&mut self, msg: &str) {
        (**self).info(msg);
    }

    fn error(&mut self, msg: &str) {
        (**self).error(msg);
    }
}

//! Mock logger for testing.
//!
//! `MockLogger` captures every line written to it for later assertion.
//! Clones share the same buffers, so a test can hand one clone to a suite and
//! keep another to inspect.
//!
//! # Example
//!
//! ```
//! use staircase::ui::{MockLogger, StaircaseLogger};
//!
//! let logger = MockLogger::new();
//! let mut handle = logger.clone();
//! handle.info("Attempting to restart the test...");
//! assert!(logger.contains("restart"));
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use super::StaircaseLogger;

#[derive(Debug, Default)]
struct Captured {
    infos: Vec<String>,
    errors: Vec<String>,
}

/// Logger that records output instead of printing it.
#[derive(Debug, Clone, Default)]
pub struct MockLogger {
    captured: Rc<RefCell<Captured>>,
}

impl MockLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all captured info lines.
    pub fn infos(&self) -> Vec<String> {
        self.captured.borrow().infos.clone()
    }

    /// Get all captured error lines.
    pub fn errors(&self) -> Vec<String> {
        self.captured.borrow().errors.clone()
    }

    /// Whether any captured line (info or error) contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        let captured = self.captured.borrow();
        captured
            .infos
            .iter()
            .chain(&captured.errors)
            .any(|line| line.contains(needle))
    }

    /// Count info lines containing `needle`.
    pub fn count_infos(&self, needle: &str) -> usize {
        self.captured
            .borrow()
            .infos
            .iter()
            .filter(|line| line.contains(needle))
            .count()
    }

    /// Drop everything captured so far.
    pub fn clear(&self) {
        let mut captured = self.captured.borrow_mut();
        captured.infos.clear();
        captured.errors.clear();
    }
}

impl StaircaseLogger for MockLogger {
    fn info(&mut self, msg: &str) {
        self.captured.borrow_mut().infos.push(msg.to_string());
    }

    fn error(&mut self, msg: &str) {
        self.captured.borrow_mut().errors.push(msg.to_string());
    }
}

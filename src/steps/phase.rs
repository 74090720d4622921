//! Step kinds and the flights they run in.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of a registered step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Prepares the main flight. Always runs, regardless of the step window.
    Setup,
    /// Main-flight work that is not itself a test.
    Task,
    /// Main-flight check; the only kind shown in results-only reports.
    Test,
    /// Cleans up after the main flight. Always runs, regardless of the step window.
    Teardown,
}

/// A group of steps executed together, in sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Flight {
    Setup,
    Main,
    Teardown,
}

impl Phase {
    /// The flight this kind of step belongs to.
    pub fn flight(&self) -> Flight {
        match self {
            Phase::Setup => Flight::Setup,
            Phase::Task | Phase::Test => Flight::Main,
            Phase::Teardown => Flight::Teardown,
        }
    }

    /// Setup and teardown steps are structural and ignore the run window.
    pub fn is_structural(&self) -> bool {
        matches!(self.flight(), Flight::Setup | Flight::Teardown)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Phase::Setup => "Setup",
            Phase::Task => "Task",
            Phase::Test => "Test",
            Phase::Teardown => "Teardown",
        };
        write!(f, "{}", s)
    }
}

impl fmt::Display for Flight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Flight::Setup => "Setup",
            Flight::Main => "Main",
            Flight::Teardown => "Teardown",
        };
        write!(f, "{}", s)
    }
}

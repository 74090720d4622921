//! Built-in logging sinks.

use super::StaircaseLogger;

/// Writes info lines to stdout and error lines to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleLogger;

impl ConsoleLogger {
    pub fn new() -> Self {
        Self
    }
}

impl StaircaseLogger for ConsoleLogger {
    fn info(&mut self, msg: &str) {
        println!("{}", msg);
    }

    fn error(&mut self, msg: &str) {
        eprintln!("{}", msg);
    }
}

/// Forwards lines into the `tracing` subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl TracingLogger {
    pub fn new() -> Self {
        Self
    }
}

impl StaircaseLogger for TracingLogger {
    fn info(&mut self, msg: &str) {
        tracing::info!(target: "staircase::report", "{}", msg);
    }

    fn error(&mut self, msg: &str) {
        tracing::error!(target: "staircase::report", "{}", msg);
    }
}

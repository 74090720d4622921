//! Error types for Staircase operations.
//!
//! This module defines [`StaircaseError`], the primary error type used
//! throughout the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Registration and ordering problems fail fast in
//!   [`StaircaseBuilder::build`](crate::runner::StaircaseBuilder::build),
//!   before any step executes
//! - Step bodies return `anyhow::Result`; an `Err` aborts the current attempt
//!   and surfaces as [`StaircaseError::StepFailed`]
//! - Gate failures are never errors, they produce a skipped outcome

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for Staircase operations.
#[derive(Debug, Error)]
pub enum StaircaseError {
    /// Invalid step or substep declaration.
    #[error("Invalid configuration: {message}")]
    Configuration { message: String },

    /// Two steps were registered under the same name.
    #[error("Step '{name}' is already registered")]
    DuplicateStep { name: String },

    /// The on_pass/on_fail graph contains a cycle.
    #[error("Circular dependency detected: {}", .cycle.join(" -> "))]
    DependencyCycle { cycle: Vec<String> },

    /// A step or substep name is not known to the directory.
    #[error("Step '{name}' not found")]
    StepNotFound { name: String },

    /// `run` was called with a window outside `1..=total`.
    #[error("Invalid step window {first}..={last} (suite has {total} steps)")]
    InvalidRange {
        first: usize,
        last: usize,
        total: usize,
    },

    /// A step returned a sequence that is neither one nor two elements long.
    #[error("Step '{step}' returned a sequence of {len} elements; expected (passed) or (passed, value)")]
    ResultFormat { step: String, len: usize },

    /// A result was queried before the step was attempted.
    #[error("Step '{name}' has not run yet")]
    NotYetRun { name: String },

    /// A step body returned an error.
    #[error("Step '{step}' raised an error: {source}")]
    StepFailed {
        step: String,
        #[source]
        source: anyhow::Error,
    },

    /// The engine left a step in a state it must never be in.
    #[error("Internal invariant violated for step '{step}': {message}")]
    InvariantViolation { step: String, message: String },

    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StaircaseError {
    /// Whether this error belongs to the configuration class raised at build time.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            StaircaseError::Configuration { .. } | StaircaseError::DuplicateStep { .. }
        )
    }

    pub(crate) fn config(message: impl Into<String>) -> Self {
        StaircaseError::Configuration {
            message: message.into(),
        }
    }
}

/// Result type alias for Staircase operations.
pub type Result<T> = std::result::Result<T, StaircaseError>;

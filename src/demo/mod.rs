//! Built-in demonstration suites driven by the `staircase` binary.
//!
//! - `demo`: a processing pipeline with a failing task, a cleanup branch and
//!   gated teardown.
//! - `dat`: a data-file check with looped substeps and cross-step values.

mod dat;
mod processing;

use crate::error::{Result, StaircaseError};
use crate::runner::StaircaseBuilder;

/// A built-in suite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuiteInfo {
    pub name: &'static str,
    pub description: &'static str,
}

/// Every built-in suite, in listing order.
pub const SUITES: [SuiteInfo; 2] = [
    SuiteInfo {
        name: "demo",
        description: "Processing pipeline with cleanup on failure",
    },
    SuiteInfo {
        name: "dat",
        description: "Data file checks with looped substeps",
    },
];

/// Suite used when none is named.
pub const DEFAULT_SUITE: &str = "demo";

/// The step declarations of a built-in suite, ready for config and logger.
pub fn suite(name: &str) -> Result<StaircaseBuilder<()>> {
    match name {
        "demo" => Ok(processing::suite()),
        "dat" => Ok(dat::suite()),
        other => Err(StaircaseError::config(format!(
            "Unknown suite '{}'. Available: {}",
            other,
            SUITES.iter().map(|s| s.name).collect::<Vec<_>>().join(", ")
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_listed_suite_builds() {
        for info in SUITES {
            assert!(suite(info.name).unwrap().build().is_ok(), "{}", info.name);
        }
    }

    #[test]
    fn unknown_suite_lists_available() {
        let err = suite("nope").unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("demo, dat"));
    }
}

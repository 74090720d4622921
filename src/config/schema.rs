//! Configuration schema for staircase suites.
//!
//! Maps to the YAML file accepted by `--config`:
//!
//! ```yaml
//! restart_retries: 2
//! verbose: false
//! color: never
//! ```

use serde::{Deserialize, Serialize};

use crate::runner::DEFAULT_RESTART_RETRIES;
use crate::ui::StaircaseTheme;

/// Suite-wide settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StaircaseConfig {
    /// Restarts a suite may grant over its lifetime
    #[serde(default = "default_restart_retries")]
    pub restart_retries: u32,

    /// Full summary after a run (true) or test results only (false)
    #[serde(default = "default_verbose")]
    pub verbose: bool,

    /// Report coloring
    pub color: ColorMode,
}

impl Default for StaircaseConfig {
    fn default() -> Self {
        Self {
            restart_retries: default_restart_retries(),
            verbose: default_verbose(),
            color: ColorMode::default(),
        }
    }
}

fn default_restart_retries() -> u32 {
    DEFAULT_RESTART_RETRIES
}

fn default_verbose() -> bool {
    true
}

/// When reports use color.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Color when stdout is a terminal and `NO_COLOR` is unset
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    pub fn theme(&self) -> StaircaseTheme {
        match self {
            ColorMode::Auto => StaircaseTheme::detect(),
            ColorMode::Always => StaircaseTheme::new(),
            ColorMode::Never => StaircaseTheme::plain(),
        }
    }
}

//! List command implementation.
//!
//! The `staircase list` command lists the built-in suites.

use crate::demo::SUITES;
use crate::error::Result;
use crate::ui::StaircaseLogger;

use super::dispatcher::{Command, CommandResult};

/// The list command implementation.
#[derive(Debug, Default)]
pub struct ListCommand;

impl ListCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for ListCommand {
    fn execute(&self, logger: &mut dyn StaircaseLogger) -> Result<CommandResult> {
        logger.info("Suites:");
        for suite in SUITES {
            logger.info(&format!("  {:<8}{}", suite.name, suite.description));
        }
        Ok(CommandResult::success())
    }
}

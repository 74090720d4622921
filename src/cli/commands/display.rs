//! Display command implementation.
//!
//! The `staircase display` command previews a suite's execution order.

use crate::cli::args::DisplayArgs;
use crate::error::Result;
use crate::ui::{StaircaseLogger, TracingLogger};

use super::dispatcher::{Command, CommandContext, CommandResult};

/// The display command implementation.
pub struct DisplayCommand {
    context: CommandContext,
    args: DisplayArgs,
}

impl DisplayCommand {
    pub fn new(context: CommandContext, args: DisplayArgs) -> Self {
        Self { context, args }
    }

    pub fn args(&self) -> &DisplayArgs {
        &self.args
    }
}

impl Command for DisplayCommand {
    fn execute(&self, logger: &mut dyn StaircaseLogger) -> Result<CommandResult> {
        let suite = self.context.build_suite(&self.args.suite, TracingLogger::new())?;
        suite.display_to(logger)?;
        Ok(CommandResult::success())
    }
}

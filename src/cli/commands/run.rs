//! Run command implementation.
//!
//! The `staircase run` command executes a built-in suite and reports results,
//! either as the report table or as JSON.

use tracing::info;

use crate::cli::args::RunArgs;
use crate::error::{Result, StaircaseError};
use crate::runner::RunOptions;
use crate::ui::{ConsoleLogger, StaircaseLogger, TracingLogger};

use super::dispatcher::{Command, CommandContext, CommandResult};

/// The run command implementation.
pub struct RunCommand {
    context: CommandContext,
    args: RunArgs,
}

impl RunCommand {
    pub fn new(context: CommandContext, args: RunArgs) -> Self {
        Self { context, args }
    }

    pub fn args(&self) -> &RunArgs {
        &self.args
    }

    /// Translate CLI flags into run options.
    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            first_step: self.args.first.unwrap_or(1),
            last_step: self.args.last,
            verbose: self.args.results_only.then_some(false),
        }
    }
}

impl Command for RunCommand {
    fn execute(&self, logger: &mut dyn StaircaseLogger) -> Result<CommandResult> {
        let options = self.run_options();
        info!("Running suite '{}'", self.args.suite);

        if self.args.json {
            // Keep stdout for the JSON document; the table goes to the log.
            let mut suite = self
                .context
                .build_suite(&self.args.suite, TracingLogger::new())?;
            suite.run(&options)?;
            let report = suite.report_json()?;
            let rendered = serde_json::to_string_pretty(&report)
                .map_err(|e| StaircaseError::Other(e.into()))?;
            logger.info(&rendered);
        } else {
            let mut suite = self
                .context
                .build_suite(&self.args.suite, ConsoleLogger::new())?;
            suite.run(&options)?;
        }

        Ok(CommandResult::success())
    }
}

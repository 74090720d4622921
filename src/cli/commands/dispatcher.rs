//! Command dispatching.
//!
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandContext`] for settings shared by every command
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::cli::args::{Cli, Commands, RunArgs};
use crate::config::{load_config, StaircaseConfig};
use crate::demo;
use crate::error::Result;
use crate::runner::Staircase;
use crate::ui::{StaircaseLogger, StaircaseTheme};

/// Trait for command implementations.
pub trait Command {
    /// Execute the command, writing user-facing output through `logger`.
    fn execute(&self, logger: &mut dyn StaircaseLogger) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Settings every command needs to build a suite.
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub project_root: PathBuf,
    pub config_path: Option<PathBuf>,
    pub no_color: bool,
}

impl CommandContext {
    pub fn new(project_root: PathBuf) -> Self {
        Self {
            project_root,
            config_path: None,
            no_color: false,
        }
    }

    /// The explicit config file, or the one discovered in the project root.
    pub fn load_config(&self) -> Result<StaircaseConfig> {
        load_config(self.config_path.as_deref(), &self.project_root)
    }

    /// Build a built-in suite with config applied, reporting through `logger`.
    pub fn build_suite(
        &self,
        name: &str,
        logger: impl StaircaseLogger + 'static,
    ) -> Result<Staircase> {
        let config = self.load_config()?;
        debug!("Building suite '{}' with {:?}", name, config);
        let mut builder = demo::suite(name)?.config(&config).logger(logger);
        if self.no_color {
            builder = builder.theme(StaircaseTheme::plain());
        }
        builder.build()
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    context: CommandContext,
}

impl CommandDispatcher {
    pub fn new(context: CommandContext) -> Self {
        Self { context }
    }

    /// Dispatcher configured from parsed global flags.
    pub fn from_cli(cli: &Cli, project_root: PathBuf) -> Self {
        Self::new(CommandContext {
            project_root,
            config_path: cli.config.clone(),
            no_color: cli.no_color,
        })
    }

    pub fn project_root(&self) -> &Path {
        &self.context.project_root
    }

    /// Route the CLI subcommand to its implementation and execute it.
    pub fn dispatch(
        &self,
        command: Option<&Commands>,
        logger: &mut dyn StaircaseLogger,
    ) -> Result<CommandResult> {
        match command {
            Some(Commands::Run(args)) => {
                let cmd = super::run::RunCommand::new(self.context.clone(), args.clone());
                cmd.execute(logger)
            }
            Some(Commands::Display(args)) => {
                let cmd = super::display::DisplayCommand::new(self.context.clone(), args.clone());
                cmd.execute(logger)
            }
            Some(Commands::List) => super::list::ListCommand::new().execute(logger),
            None => {
                // Default to run command with default args
                let cmd = super::run::RunCommand::new(self.context.clone(), RunArgs::default());
                cmd.execute(logger)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockLogger;

    #[test]
    fn command_result_success() {
        let result = CommandResult::success();
        assert!(result.success);
        assert_eq!(result.exit_code, 0);
    }

    #[test]
    fn command_result_failure() {
        let result = CommandResult::failure(1);
        assert!(!result.success);
        assert_eq!(result.exit_code, 1);
    }

    #[test]
    fn dispatcher_creation() {
        let dispatcher = CommandDispatcher::new(CommandContext::new(PathBuf::from("/test")));
        assert_eq!(dispatcher.project_root(), Path::new("/test"));
    }

    #[test]
    fn list_dispatches_without_config() {
        let dispatcher = CommandDispatcher::new(CommandContext::new(PathBuf::from("/nonexistent")));
        let mut logger = MockLogger::new();
        let result = dispatcher
            .dispatch(Some(&Commands::List), &mut logger)
            .unwrap();
        assert!(result.success);
        assert!(logger.contains("dat"));
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let mut context = CommandContext::new(std::env::temp_dir());
        context.config_path = Some(PathBuf::from("/nonexistent/staircase.yml"));
        assert!(context.build_suite("demo", MockLogger::new()).is_err());
    }
}

//! Command-line interface for the `staircase` binary.
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{Cli, Commands, DisplayArgs, RunArgs};
pub use commands::{Command, CommandContext, CommandDispatcher, CommandResult};

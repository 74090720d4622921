//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait and is routed by
//! [`CommandDispatcher`].

pub mod dispatcher;
pub mod display;
pub mod list;
pub mod run;

pub use dispatcher::{Command, CommandContext, CommandDispatcher, CommandResult};

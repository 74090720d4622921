//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::demo::DEFAULT_SUITE;

/// Staircase - ordered, dependency-gated test suites.
#[derive(Debug, Parser)]
#[command(name = "staircase")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (overrides discovered staircase.yml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run a suite (default if no command specified)
    Run(RunArgs),

    /// Preview a suite's execution order without running it
    Display(DisplayArgs),

    /// List built-in suites
    List,
}

/// Arguments for the `run` command.
#[derive(Debug, Clone, Args)]
pub struct RunArgs {
    /// Suite to run
    #[arg(short, long, default_value = DEFAULT_SUITE)]
    pub suite: String,

    /// First main step to run (1-based)
    #[arg(long)]
    pub first: Option<usize>,

    /// Last main step to run (inclusive)
    #[arg(long)]
    pub last: Option<usize>,

    /// Report only test steps
    #[arg(long)]
    pub results_only: bool,

    /// Print ordered results as JSON instead of the report table
    #[arg(long)]
    pub json: bool,
}

impl Default for RunArgs {
    fn default() -> Self {
        Self {
            suite: DEFAULT_SUITE.to_string(),
            first: None,
            last: None,
            results_only: false,
            json: false,
        }
    }
}

/// Arguments for the `display` command.
#[derive(Debug, Clone, Args)]
pub struct DisplayArgs {
    /// Suite to preview
    #[arg(short, long, default_value = DEFAULT_SUITE)]
    pub suite: String,
}

//! Staircase CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use staircase::cli::{Cli, CommandDispatcher};
use staircase::ui::{ConsoleLogger, StaircaseLogger};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is INFO
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("staircase=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("staircase=info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    tracing::debug!("Staircase starting with args: {:?}", cli);

    // Handle --no-color
    if cli.no_color {
        std::env::set_var("NO_COLOR", "1");
    }

    let project_root = std::env::current_dir().unwrap_or_default();
    let dispatcher = CommandDispatcher::from_cli(&cli, project_root);
    let mut logger = ConsoleLogger::new();

    match dispatcher.dispatch(cli.command.as_ref(), &mut logger) {
        Ok(result) => ExitCode::from(result.exit_code as u8),
        Err(e) => {
            logger.error(&format!("Error: {}", e));
            ExitCode::from(1)
        }
    }
}

//! Scour: remove build output directories and pattern-selected files.
//!
//! This is the main entry point for the `scour` CLI. It parses arguments,
//! installs the logger, runs the command, and maps errors to exit codes.

use scour::cli::Cli;
use scour::{commands, exit_codes};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse_args();

    let mut env = env_logger::Builder::new();
    env.filter_level(cli.log_level());
    if let Ok(filters) = std::env::var("RUST_LOG") {
        env.parse_filters(&filters);
    }
    env.init();

    match commands::dispatch(cli) {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            // Print user-actionable error message to stderr
            eprintln!("Error: {}", err);

            ExitCode::from(err.exit_code() as u8)
        }
    }
}

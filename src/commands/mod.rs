//! Command implementations for scour.
//!
//! `scour` has a single command: build a cleanup request from the config file
//! and flags, then print its plan or carry it out.

mod clean;

use crate::cli::Cli;
use crate::error::Result;

/// Run the command described by the parsed arguments.
pub fn dispatch(cli: Cli) -> Result<()> {
    clean::cmd_clean(&cli)
}

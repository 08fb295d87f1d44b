//! CLI argument parsing for scour.
//!
//! Uses clap derive macros for declarative argument definitions.
//! Turning the parsed flags into a `CleanupRequest` happens in the `commands`
//! module.

use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Scour: remove build output directories and pattern-selected files.
///
/// Default targets are deleted whole. Filesets select files and directories
/// under a root with Ant-style include/exclude globs; everything a fileset does
/// not select is preserved.
///
/// Without `--yes` the deletion plan is printed and nothing is touched.
#[derive(Parser, Debug)]
#[command(name = "scour")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// YAML file holding a cleanup request.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory to delete entirely (repeatable).
    #[arg(short, long = "target", value_name = "DIR")]
    pub targets: Vec<PathBuf>,

    /// Fileset root directory (repeatable).
    #[arg(short, long = "fileset", value_name = "DIR")]
    pub filesets: Vec<PathBuf>,

    /// Include pattern for command-line filesets (repeatable).
    #[arg(short, long = "include", value_name = "GLOB")]
    pub includes: Vec<String>,

    /// Exclude pattern for command-line filesets (repeatable).
    #[arg(short, long = "exclude", value_name = "GLOB")]
    pub excludes: Vec<String>,

    /// Do not add the standard VCS and editor exclusions to command-line filesets.
    #[arg(long)]
    pub no_default_excludes: bool,

    /// Descend through symbolic links.
    #[arg(long)]
    pub follow_symlinks: bool,

    /// Ignore default targets; only filesets are cleaned.
    #[arg(long)]
    pub exclude_default_directories: bool,

    /// Report failed paths without failing the run.
    #[arg(long)]
    pub no_fail_on_error: bool,

    /// Do not retry locked or busy paths.
    #[arg(long)]
    pub no_retry: bool,

    /// Number of deletion workers.
    #[arg(short, long, value_name = "N")]
    pub jobs: Option<usize>,

    /// Perform the deletion instead of printing the plan.
    #[arg(short, long)]
    pub yes: bool,

    /// Print the plan or result as JSON.
    #[arg(long)]
    pub json: bool,

    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    /// Log level implied by `-v` flags.
    pub fn log_level(&self) -> log::LevelFilter {
        match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            _ => log::LevelFilter::Debug,
        }
    }
}

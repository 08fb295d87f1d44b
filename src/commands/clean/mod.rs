//! Implementation of the `scour` command.
//!
//! # Safety
//!
//! - Default behavior is dry-run (prints what would be removed)
//! - Requires `--yes` to actually perform deletions
//! - Everything a fileset does not select is preserved

mod display;


use crate::cli::Cli;
use crate::engine::CleanupEngine;
use crate::error::{Result, ScourError};
use crate::request::{CleanupRequest, FilesetSpec};
use log::info;

use display::{format_plan, format_result, print_json};

/// Execute the `scour` command.
///
/// # Behavior
///
/// - Without `--yes`: dry-run mode, prints the deletion plan
/// - With `--yes`: performs the deletion and prints a summary
/// - `--json`: prints the plan or result as JSON instead
pub fn cmd_clean(cli: &Cli) -> Result<()> {
    let request = build_request(cli)?;
    let engine = CleanupEngine::new();
    let base = std::env::current_dir().unwrap_or_default();

    if request.skip {
        println!("Clean skipped.");
        return Ok(());
    }

    if !cli.yes {
        let plan = engine.plan(&request)?;

        if cli.json {
            return print_json(&plan);
        }
        if plan.is_empty() {
            println!("Nothing to clean.");
            return Ok(());
        }

        print!("{}", format_plan(&plan, &base));
        println!();
        println!("Dry-run mode: no changes made.");
        println!("Run with --yes to perform the cleanup.");
        return Ok(());
    }

    match engine.run(&request) {
        Ok(result) => {
            if cli.json {
                print_json(&result)
            } else {
                print!("{}", format_result(&result, &base));
                Ok(())
            }
        }
        Err(err) => {
            // The error message lists the failures; JSON consumers still get
            // the full result on stdout.
            if cli.json
                && let Some(result) = err.result()
            {
                print_json(result)?;
            }
            Err(err)
        }
    }
}

/// Merge the config file (if any) with command-line flags.
///
/// Flags only ever add targets and filesets or tighten the defaults; they never
/// remove anything the config file asked for.
pub(crate) fn build_request(cli: &Cli) -> Result<CleanupRequest> {
    let mut request = match &cli.config {
        Some(path) => {
            info!("loading cleanup request from {}", path.display());
            CleanupRequest::load(path)?
        }
        None => CleanupRequest::new(),
    };

    if cli.filesets.is_empty() && (!cli.includes.is_empty() || !cli.excludes.is_empty()) {
        return Err(ScourError::UserError(
            "--include and --exclude apply to command-line filesets.\n\n\
             Name the fileset root with --fileset <DIR>."
                .to_string(),
        ));
    }

    request.default_targets.extend(cli.targets.iter().cloned());

    for directory in &cli.filesets {
        let mut fileset = FilesetSpec::new(directory)
            .follow_symlinks(cli.follow_symlinks)
            .use_default_excludes(!cli.no_default_excludes);
        fileset.includes.extend(cli.includes.iter().cloned());
        fileset.excludes.extend(cli.excludes.iter().cloned());
        request.filesets.push(fileset);
    }

    if cli.follow_symlinks {
        request.follow_symlinks = true;
    }
    if cli.exclude_default_directories {
        request.exclude_default_directories = true;
    }
    if cli.no_fail_on_error {
        request.fail_on_error = false;
    }
    if cli.no_retry {
        request.retry_on_error = false;
    }
    if let Some(jobs) = cli.jobs {
        request.parallelism = Some(jobs);
    }

    request.validate()?;
    Ok(request)
}

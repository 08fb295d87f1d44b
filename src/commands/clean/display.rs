//! Display and formatting utilities for plan and result output.

use crate::delete::DeletionResult;
use crate::error::{Result, ScourError};
use crate::plan::{DeleteMode, DeletionPlan, EntryKind};
use serde::Serialize;
use std::fmt::Write;
use std::path::Path;

/// Render the deletion plan, one path per line in execution order.
pub fn format_plan(plan: &DeletionPlan, base: &Path) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Deletion plan ({} path(s)):", plan.len());

    for entry in plan.iter() {
        let rel_path = make_relative(&entry.path, base);
        let suffix = match (entry.kind, entry.mode) {
            (EntryKind::File, _) => "",
            (EntryKind::Directory, DeleteMode::DeleteWhole) => "/  (whole)",
            (EntryKind::Directory, DeleteMode::DeleteContentsOnly) => "/  (once empty)",
        };
        let _ = writeln!(out, "  - {}{}", rel_path, suffix);
    }

    out
}

/// Render the summary of a completed run.
pub fn format_result(result: &DeletionResult, base: &Path) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Cleanup complete:");
    let _ = writeln!(out, "  Deleted: {} path(s)", result.deleted.len());

    if !result.skipped.is_empty() {
        let _ = writeln!(
            out,
            "  Skipped: {} path(s) (already gone)",
            result.skipped.len()
        );
    }

    if !result.failures.is_empty() {
        let _ = writeln!(out, "  Failed:  {} path(s)", result.failures.len());
        for failure in &result.failures {
            let _ = writeln!(
                out,
                "    - {}: {} ({} attempt(s))",
                make_relative(&failure.path, base),
                failure.cause,
                failure.attempts
            );
        }
    }

    out
}

/// Print any serializable value as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| ScourError::UserError(format!("failed to render JSON: {}", e)))?;
    println!("{}", json);
    Ok(())
}

/// Make a path relative to `base` for display.
pub fn make_relative(path: &Path, base: &Path) -> String {
    path.strip_prefix(base)
        .map(|p| p.display().to_string())
        .unwrap_or_else(|_| path.display().to_string())
}

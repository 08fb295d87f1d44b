//! Cleanup orchestration.
//!
//! `CleanupEngine::run` takes a request through
//! `Planning -> Executing -> {Completed, Failed}`. Structural problems are
//! reported during planning, before anything is deleted. Nothing carries over
//! from one run to the next.

use crate::delete::{DeletePolicy, Deleter, DeletionResult};
use crate::error::{Result, ScourError};
use crate::fileset::{self, ResolvedFileset};
use crate::pattern::PatternMatcher;
use crate::plan::{self, DeletionPlan};
use crate::request::{CleanupRequest, FilesetSpec};
use log::{debug, info, warn};
use std::fmt;
use std::path::PathBuf;

/// Lifecycle of one `run`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Planning,
    Executing,
    Completed,
    Failed,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Planning => write!(f, "planning"),
            Phase::Executing => write!(f, "executing"),
            Phase::Completed => write!(f, "completed"),
            Phase::Failed => write!(f, "failed"),
        }
    }
}

/// Composes resolution, planning, and deletion.
#[derive(Debug, Clone, Copy, Default)]
pub struct CleanupEngine;

impl CleanupEngine {
    pub fn new() -> Self {
        Self
    }

    /// Validate the request and compute its deletion plan without deleting.
    ///
    /// # Errors
    ///
    /// * `InvalidRequest` - malformed request, bad glob, or a fileset directory
    ///   that is a regular file
    /// * `InvalidTarget` - a default target that exists but is not a directory
    pub fn plan(&self, request: &CleanupRequest) -> Result<DeletionPlan> {
        request.validate()?;

        let targets = request.active_default_targets();
        let targets = check_default_targets(&targets)?;
        let matchers = check_filesets(&request.filesets)?;

        let resolved = request
            .filesets
            .iter()
            .zip(&matchers)
            .map(|(spec, matcher)| fileset::resolve_with(spec, matcher))
            .collect::<Result<Vec<ResolvedFileset>>>()?;

        let plan = plan::plan(&targets, request.follow_symlinks, &resolved);
        debug!(
            "planned {} entr(ies) in {} independent subtree(s)",
            plan.len(),
            plan.subtree_count()
        );
        Ok(plan)
    }

    /// Clean everything the request selects.
    ///
    /// Returns the per-path result. With `fail_on_error` set, any failed path
    /// turns into `ScourError::DeletionFailed` once the whole plan has been
    /// attempted.
    pub fn run(&self, request: &CleanupRequest) -> Result<DeletionResult> {
        if request.skip {
            info!("clean skipped");
            return Ok(DeletionResult::default());
        }

        log_phase(Phase::Planning);
        let plan = match self.plan(request) {
            Ok(plan) => plan,
            Err(err) => {
                log_phase(Phase::Failed);
                return Err(err);
            }
        };

        log_phase(Phase::Executing);
        let deleter = Deleter::new(DeletePolicy::from(request));
        let outcome = deleter.execute(&plan);

        match &outcome {
            Ok(result) => {
                if !result.failures.is_empty() {
                    warn!(
                        "{} path(s) could not be deleted (best-effort mode)",
                        result.failures.len()
                    );
                }
                info!(
                    "deleted {}, skipped {}, failed {}",
                    result.deleted.len(),
                    result.skipped.len(),
                    result.failures.len()
                );
                log_phase(Phase::Completed);
            }
            Err(_) => log_phase(Phase::Failed),
        }

        outcome
    }
}

fn log_phase(phase: Phase) {
    info!("cleanup {}", phase);
}

/// Keep default targets that exist; reject any that are not directories.
fn check_default_targets(targets: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut existing = Vec::with_capacity(targets.len());
    for target in targets {
        let target = fileset::normalize(target);
        if fileset::ensure_directory(&target)? {
            existing.push(target);
        } else {
            debug!("default target {} does not exist", target.display());
        }
    }
    Ok(existing)
}

/// Reject fileset roots that are files and compile every pattern up front.
fn check_filesets(filesets: &[FilesetSpec]) -> Result<Vec<PatternMatcher>> {
    filesets
        .iter()
        .map(|spec| {
            fileset::ensure_directory(&spec.directory).map_err(|e| match e {
                ScourError::InvalidTarget(msg) => {
                    ScourError::InvalidRequest(format!("fileset directory {}", msg))
                }
                other => other,
            })?;
            PatternMatcher::new(&spec.includes, &spec.excludes, spec.use_default_excludes)
        })
        .collect()
}

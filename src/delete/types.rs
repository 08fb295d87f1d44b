//! Types for deletion execution.

use crate::error::ErrorKind;
use crate::request::CleanupRequest;
use serde::Serialize;
use std::path::PathBuf;

/// A path that could not be deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Failure {
    pub path: PathBuf,
    pub cause: ErrorKind,
    /// How many removal attempts were made, including the first.
    pub attempts: u32,
}

/// Per-path outcomes of one cleanup run.
///
/// Within one independent subtree, paths appear in the order they were
/// processed. Across subtrees the order is unspecified when deletion ran on
/// several workers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeletionResult {
    /// Paths that were removed.
    pub deleted: Vec<PathBuf>,
    /// Paths that were already gone when their turn came.
    pub skipped: Vec<PathBuf>,
    /// Paths that survived.
    pub failures: Vec<Failure>,
}

impl DeletionResult {
    /// Whether nothing was deleted, skipped, or failed.
    pub fn is_empty(&self) -> bool {
        self.deleted.is_empty() && self.skipped.is_empty() && self.failures.is_empty()
    }

    /// Whether every plan entry was either deleted or already gone.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Append another result's outcomes after this one's.
    pub fn merge(&mut self, other: DeletionResult) {
        self.deleted.extend(other.deleted);
        self.skipped.extend(other.skipped);
        self.failures.extend(other.failures);
    }
}

/// How the deleter reacts to failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeletePolicy {
    /// Raise `DeletionFailed` after the run if anything failed.
    pub fail_on_error: bool,
    /// Retry transient failures up to `MAX_ATTEMPTS`.
    pub retry_on_error: bool,
    /// Number of workers for independent subtrees.
    pub parallelism: usize,
}

impl Default for DeletePolicy {
    fn default() -> Self {
        Self {
            fail_on_error: true,
            retry_on_error: true,
            parallelism: 1,
        }
    }
}

impl From<&CleanupRequest> for DeletePolicy {
    fn from(request: &CleanupRequest) -> Self {
        Self {
            fail_on_error: request.fail_on_error,
            retry_on_error: request.retry_on_error,
            parallelism: request.effective_parallelism(),
        }
    }
}

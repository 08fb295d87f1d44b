//! Deletion execution.
//!
//! The deleter walks a `DeletionPlan` entry by entry and records what happened
//! to every path. Independent subtrees may run on separate workers; entries
//! within one subtree always run in plan order on a single worker.
//!
//! # Failure handling
//!
//! - A path that is already gone is recorded as skipped.
//! - Locked or busy paths are retried up to [`MAX_ATTEMPTS`] times,
//!   [`RETRY_DELAY`] apart, when `retry_on_error` is set.
//! - Permission errors and type mismatches fail on the first attempt.
//! - A contents-only directory that still has children fails with `NotEmpty`.
//! - Nothing aborts the run early.

mod execution;
mod removal;
mod types;


use std::time::Duration;

pub use execution::Deleter;
pub use types::{DeletePolicy, DeletionResult, Failure};

/// Upper bound on removal attempts per path, including the first.
pub const MAX_ATTEMPTS: u32 = 3;

/// Pause between attempts.
pub const RETRY_DELAY: Duration = Duration::from_millis(50);

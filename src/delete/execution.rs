//! Plan execution.

use super::removal::{Removal, remove_entry};
use super::types::{DeletePolicy, DeletionResult, Failure};
use super::{MAX_ATTEMPTS, RETRY_DELAY};
use crate::error::{ErrorKind, Result, ScourError};
use crate::plan::{DeleteMode, DeletionPlan, EntryKind, PlanEntry};
use log::{debug, info, warn};
use std::io;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

/// Outcome of one plan entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Deleted { attempts: u32 },
    Skipped,
    Failed { cause: ErrorKind, attempts: u32 },
}

/// One removal attempt against the filesystem.
pub(crate) type RemoveFn = fn(&PlanEntry) -> io::Result<Removal>;

/// Executes deletion plans under a failure policy.
#[derive(Debug, Clone)]
pub struct Deleter {
    policy: DeletePolicy,
    remove: RemoveFn,
}

impl Default for Deleter {
    fn default() -> Self {
        Self::new(DeletePolicy::default())
    }
}

impl Deleter {
    pub fn new(policy: DeletePolicy) -> Self {
        Self::with_remover(policy, remove_entry)
    }

    /// A deleter whose removal attempts go through `remove`.
    pub(crate) fn with_remover(policy: DeletePolicy, remove: RemoveFn) -> Self {
        Self { policy, remove }
    }

    /// Execute every entry, then apply the fail-fast policy.
    ///
    /// Per-path failures never stop the run. Once the whole plan has been
    /// attempted, `fail_on_error` turns a non-empty failure list into
    /// `ScourError::DeletionFailed` carrying the complete result.
    pub fn execute(&self, plan: &DeletionPlan) -> Result<DeletionResult> {
        let result = self.execute_all(plan);

        if self.policy.fail_on_error && !result.failures.is_empty() {
            return Err(ScourError::DeletionFailed(Box::new(result)));
        }
        Ok(result)
    }

    /// Execute every entry and report outcomes. Never fails.
    pub fn execute_all(&self, plan: &DeletionPlan) -> DeletionResult {
        let subtrees: Vec<&[PlanEntry]> = plan.subtrees().collect();
        let workers = self.policy.parallelism.clamp(1, subtrees.len().max(1));

        if workers == 1 {
            let mut result = DeletionResult::default();
            for subtree in &subtrees {
                result.merge(self.run_subtree(subtree));
            }
            return result;
        }

        info!(
            "deleting {} path(s) in {} subtree(s) with {} workers",
            plan.len(),
            subtrees.len(),
            workers
        );

        let next = AtomicUsize::new(0);
        let sink = Mutex::new(DeletionResult::default());
        let work = || {
            while let Some(subtree) = subtrees.get(next.fetch_add(1, Ordering::Relaxed)) {
                let outcome = self.run_subtree(subtree);
                sink.lock()
                    .unwrap_or_else(|poison| poison.into_inner())
                    .merge(outcome);
            }
        };

        thread::scope(|scope| {
            for i in 1..workers {
                let spawned = thread::Builder::new()
                    .name(format!("scour-worker-{i}"))
                    .spawn_scoped(scope, work);
                if let Err(e) = spawned {
                    warn!("failed to start deletion worker {i}: {e}");
                }
            }
            // The calling thread drains the queue too, so a failed spawn only
            // costs throughput.
            work();
        });

        sink.into_inner()
            .unwrap_or_else(|poison| poison.into_inner())
    }

    /// Process one independent subtree in plan order.
    fn run_subtree(&self, entries: &[PlanEntry]) -> DeletionResult {
        let mut result = DeletionResult::default();

        for entry in entries {
            match self.delete_entry(entry) {
                Outcome::Deleted { attempts } => {
                    debug!(
                        "deleted {} after {} attempt(s)",
                        entry.path.display(),
                        attempts
                    );
                    result.deleted.push(entry.path.clone());
                }
                Outcome::Skipped => {
                    debug!("skipped {} (already gone)", entry.path.display());
                    result.skipped.push(entry.path.clone());
                }
                Outcome::Failed { cause, attempts } => {
                    warn!(
                        "failed to delete {}: {} ({} attempt(s))",
                        entry.path.display(),
                        cause,
                        attempts
                    );
                    result.failures.push(Failure {
                        path: entry.path.clone(),
                        cause,
                        attempts,
                    });
                }
            }
        }

        result
    }

    /// Remove one entry, retrying transient failures when allowed.
    fn delete_entry(&self, entry: &PlanEntry) -> Outcome {
        let mut attempts = 0;

        loop {
            attempts += 1;

            let err = match (self.remove)(entry) {
                Ok(Removal::Removed) => return Outcome::Deleted { attempts },
                Ok(Removal::Missing) if attempts == 1 => return Outcome::Skipped,
                // Gone after an earlier partial attempt.
                Ok(Removal::Missing) => return Outcome::Deleted { attempts },
                Err(err) => err,
            };

            let cause = ErrorKind::from_io(&err);
            let may_retry = self.policy.retry_on_error
                && attempts < MAX_ATTEMPTS
                && is_retryable(entry, cause);

            if !may_retry {
                debug!("removing {} failed: {}", entry.path.display(), err);
                return Outcome::Failed { cause, attempts };
            }

            debug!(
                "removing {} failed ({}), retrying in {}ms",
                entry.path.display(),
                err,
                RETRY_DELAY.as_millis()
            );
            thread::sleep(RETRY_DELAY);
        }
    }
}

/// Locked paths may free up; a recursive removal racing with new files may
/// succeed on a second pass. Everything else is permanent.
fn is_retryable(entry: &PlanEntry, cause: ErrorKind) -> bool {
    cause.is_transient()
        || (cause == ErrorKind::NotEmpty
            && entry.kind == EntryKind::Directory
            && entry.mode == DeleteMode::DeleteWhole)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicU32;

    fn busy() -> io::Error {
        io::Error::from(io::ErrorKind::ResourceBusy)
    }

    fn policy(retry_on_error: bool) -> DeletePolicy {
        DeletePolicy {
            fail_on_error: false,
            retry_on_error,
            parallelism: 1,
        }
    }

    fn single_file() -> DeletionPlan {
        DeletionPlan::from_entries(vec![PlanEntry::file("locked.o")])
    }

    #[test]
    fn test_locked_path_is_deleted_once_released() {
        static CALLS: AtomicU32 = AtomicU32::new(0);
        fn busy_twice(_: &PlanEntry) -> io::Result<Removal> {
            if CALLS.fetch_add(1, Ordering::SeqCst) < 2 {
                Err(busy())
            } else {
                Ok(Removal::Removed)
            }
        }

        let deleter = Deleter::with_remover(policy(true), busy_twice);
        let entry = PlanEntry::file("locked.o");

        assert_eq!(deleter.delete_entry(&entry), Outcome::Deleted { attempts: 3 });
        assert_eq!(CALLS.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_path_locked_throughout_fails_after_max_attempts() {
        static CALLS: AtomicU32 = AtomicU32::new(0);
        fn always_busy(_: &PlanEntry) -> io::Result<Removal> {
            CALLS.fetch_add(1, Ordering::SeqCst);
            Err(busy())
        }

        let deleter = Deleter::with_remover(policy(true), always_busy);
        let result = deleter.execute_all(&single_file());

        assert!(result.deleted.is_empty());
        assert_eq!(
            result.failures,
            vec![Failure {
                path: "locked.o".into(),
                cause: ErrorKind::LockedOrBusy,
                attempts: MAX_ATTEMPTS,
            }]
        );
        assert_eq!(CALLS.load(Ordering::SeqCst), MAX_ATTEMPTS);
    }

    #[test]
    fn test_locked_path_is_not_retried_when_retry_disabled() {
        static CALLS: AtomicU32 = AtomicU32::new(0);
        fn always_busy(_: &PlanEntry) -> io::Result<Removal> {
            CALLS.fetch_add(1, Ordering::SeqCst);
            Err(busy())
        }

        let deleter = Deleter::with_remover(policy(false), always_busy);
        let result = deleter.execute_all(&single_file());

        assert_eq!(result.failures.len(), 1);
        assert_eq!(result.failures[0].cause, ErrorKind::LockedOrBusy);
        assert_eq!(result.failures[0].attempts, 1);
        assert_eq!(CALLS.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_path_gone_after_retry_counts_as_deleted() {
        static CALLS: AtomicU32 = AtomicU32::new(0);
        fn busy_then_gone(_: &PlanEntry) -> io::Result<Removal> {
            if CALLS.fetch_add(1, Ordering::SeqCst) == 0 {
                Err(busy())
            } else {
                Ok(Removal::Missing)
            }
        }

        let deleter = Deleter::with_remover(policy(true), busy_then_gone);
        let result = deleter.execute_all(&single_file());

        assert_eq!(result.deleted, vec![std::path::PathBuf::from("locked.o")]);
        assert!(result.skipped.is_empty());
    }

    #[test]
    fn test_permanent_failure_is_not_retried() {
        static CALLS: AtomicU32 = AtomicU32::new(0);
        fn denied(_: &PlanEntry) -> io::Result<Removal> {
            CALLS.fetch_add(1, Ordering::SeqCst);
            Err(io::Error::from(io::ErrorKind::PermissionDenied))
        }

        let deleter = Deleter::with_remover(policy(true), denied);

        assert_eq!(
            deleter.delete_entry(&PlanEntry::file("ro.o")),
            Outcome::Failed {
                cause: ErrorKind::PermissionDenied,
                attempts: 1
            }
        );
        assert_eq!(CALLS.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_locked_is_retryable_for_any_entry() {
        assert!(is_retryable(&PlanEntry::file("a"), ErrorKind::LockedOrBusy));
        assert!(is_retryable(
            &PlanEntry::directory("d", DeleteMode::DeleteContentsOnly),
            ErrorKind::LockedOrBusy
        ));
    }

    #[test]
    fn test_not_empty_is_retryable_only_for_whole_directories() {
        let whole = PlanEntry::directory("d", DeleteMode::DeleteWhole);
        let contents_only = PlanEntry::directory("d", DeleteMode::DeleteContentsOnly);

        assert!(is_retryable(&whole, ErrorKind::NotEmpty));
        assert!(!is_retryable(&contents_only, ErrorKind::NotEmpty));
    }

    #[test]
    fn test_permission_denied_is_never_retried() {
        assert!(!is_retryable(
            &PlanEntry::file("a"),
            ErrorKind::PermissionDenied
        ));
        assert!(!is_retryable(
            &PlanEntry::directory("d", DeleteMode::DeleteWhole),
            ErrorKind::PermissionDenied
        ));
    }

    #[test]
    fn test_retry_budget_is_bounded() {
        assert_eq!(MAX_ATTEMPTS, 3);
        assert!(RETRY_DELAY.as_millis() >= 10 && RETRY_DELAY.as_millis() <= 100);
    }
}

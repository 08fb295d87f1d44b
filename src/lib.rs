//! Scour: a fileset cleanup engine.
//!
//! Deletes build output directories wholesale and pattern-selected files under
//! fileset roots, preserving everything the patterns do not select. Deletion
//! runs bottom-up over a precomputed plan, with bounded retries for locked
//! paths and a choice between fail-fast and best-effort reporting.
//!
//! ```no_run
//! use scour::{CleanupEngine, CleanupRequest, FilesetSpec};
//!
//! let request = CleanupRequest::new()
//!     .with_default_target("target")
//!     .with_fileset(FilesetSpec::new("out").include("**/*.class"));
//! let result = CleanupEngine::new().run(&request)?;
//! println!("deleted {} path(s)", result.deleted.len());
//! # Ok::<(), scour::ScourError>(())
//! ```

pub mod cli;
pub mod commands;
pub mod delete;
pub mod engine;
pub mod error;
pub mod exit_codes;
pub mod fileset;
pub mod pattern;
pub mod plan;
pub mod request;

#[cfg(test)]
mod test_support;

pub use delete::{DeletePolicy, Deleter, DeletionResult, Failure};
pub use engine::{CleanupEngine, Phase};
pub use error::{ErrorKind, Result, ScourError};
pub use fileset::ResolvedFileset;
pub use pattern::PatternMatcher;
pub use plan::{DeleteMode, DeletionPlan, EntryKind, PlanEntry};
pub use request::{CleanupRequest, FilesetSpec};

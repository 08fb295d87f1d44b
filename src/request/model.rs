//! Request struct definitions and defaults.

use super::types::default_true;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One fileset: a root directory plus include/exclude patterns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilesetSpec {
    /// Root of the fileset. The root itself is never deleted.
    pub directory: PathBuf,

    /// Include patterns. Empty means "everything under `directory`".
    pub includes: Vec<String>,

    /// Exclude patterns.
    pub excludes: Vec<String>,

    /// Descend through symbolic links while walking.
    pub follow_symlinks: bool,

    /// Append the built-in VCS/editor excludes to `excludes`.
    #[serde(default = "default_true")]
    pub use_default_excludes: bool,
}

impl Default for FilesetSpec {
    fn default() -> Self {
        Self {
            directory: PathBuf::new(),
            includes: Vec::new(),
            excludes: Vec::new(),
            follow_symlinks: false,
            use_default_excludes: true,
        }
    }
}

/// Everything the engine needs for one cleanup run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanupRequest {
    // =========================================================================
    // Targets
    // =========================================================================
    /// Directories deleted wholesale. Empty entries are ignored.
    pub default_targets: Vec<PathBuf>,

    /// Pattern-filtered filesets, in declaration order.
    pub filesets: Vec<FilesetSpec>,

    /// Skip `default_targets` and only process `filesets`.
    pub exclude_default_directories: bool,

    // =========================================================================
    // Policy
    // =========================================================================
    /// Raise `DeletionFailed` after the run if any path could not be deleted.
    #[serde(default = "default_true")]
    pub fail_on_error: bool,

    /// Retry transient failures a bounded number of times.
    #[serde(default = "default_true")]
    pub retry_on_error: bool,

    /// Follow symbolic links when deleting default targets.
    pub follow_symlinks: bool,

    /// Do nothing at all.
    pub skip: bool,

    /// Number of deletion workers. `None` picks a default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parallelism: Option<usize>,
}

impl Default for CleanupRequest {
    fn default() -> Self {
        Self {
            default_targets: Vec::new(),
            filesets: Vec::new(),
            exclude_default_directories: false,
            fail_on_error: default_true(),
            retry_on_error: default_true(),
            follow_symlinks: false,
            skip: false,
            parallelism: None,
        }
    }
}

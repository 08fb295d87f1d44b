//! Resolved fileset data.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// The concrete selection for one fileset, discarded after planning.
///
/// All paths are full paths (root joined with the walked relative path).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedFileset {
    /// The fileset root. Never itself a deletion candidate.
    pub root: PathBuf,
    /// Non-directory entries that matched.
    pub matched_files: BTreeSet<PathBuf>,
    /// Directories that matched.
    pub matched_dirs: BTreeSet<PathBuf>,
    /// Non-directory entries to preserve, including unreadable paths.
    pub untouched_files: BTreeSet<PathBuf>,
    /// Directories that did not match. They may still be emptied.
    pub untouched_dirs: BTreeSet<PathBuf>,
    /// Directories hit by an exclude pattern; never removed even if emptied.
    pub protected_dirs: BTreeSet<PathBuf>,
    /// Whether traversal followed symbolic links.
    pub follow_symlinks: bool,
    /// Nothing matched although the root has content.
    pub preserve_all: bool,
}

impl ResolvedFileset {
    /// An empty selection rooted at `root`.
    pub fn empty(root: &Path, follow_symlinks: bool) -> Self {
        Self {
            root: root.to_path_buf(),
            follow_symlinks,
            ..Default::default()
        }
    }

    /// Whether anything at all was found beneath the root.
    pub fn has_descendants(&self) -> bool {
        !(self.matched_files.is_empty()
            && self.matched_dirs.is_empty()
            && self.untouched_files.is_empty()
            && self.untouched_dirs.is_empty())
    }

    /// Whether nothing was selected for deletion.
    pub fn is_empty(&self) -> bool {
        self.matched_files.is_empty() && self.matched_dirs.is_empty()
    }

    /// Every walked directory, matched or not.
    pub fn all_dirs(&self) -> impl Iterator<Item = &PathBuf> {
        self.matched_dirs.iter().chain(self.untouched_dirs.iter())
    }
}

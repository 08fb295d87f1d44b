//! Types for deletion plans.

use serde::Serialize;
use std::collections::HashMap;
use std::ops::Range;
use std::path::{Path, PathBuf};

/// What a plan entry points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    File,
    Directory,
}

/// How a directory entry is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeleteMode {
    /// Remove the path and anything still inside it.
    DeleteWhole,
    /// Remove a directory that must already be empty.
    DeleteContentsOnly,
}

/// One unit of work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanEntry {
    pub path: PathBuf,
    pub kind: EntryKind,
    pub mode: DeleteMode,
    /// Remove linked directory contents instead of just the link.
    #[serde(skip)]
    pub follow_symlinks: bool,
}

impl PlanEntry {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            kind: EntryKind::File,
            mode: DeleteMode::DeleteWhole,
            follow_symlinks: false,
        }
    }

    pub fn directory(path: impl Into<PathBuf>, mode: DeleteMode) -> Self {
        Self {
            path: path.into(),
            kind: EntryKind::Directory,
            mode,
            follow_symlinks: false,
        }
    }

    pub fn with_follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }
}

/// An ordered, bottom-up sequence of plan entries.
///
/// Every entry appears before any entry whose path is a strict ancestor of it.
/// The sequence is partitioned into independent subtrees: contiguous runs that
/// share no ancestor relation with any other run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeletionPlan {
    entries: Vec<PlanEntry>,
    #[serde(skip)]
    subtrees: Vec<Range<usize>>,
}

impl DeletionPlan {
    /// Build a plan from entries in declaration order.
    ///
    /// Duplicate paths collapse into the first occurrence (upgraded to
    /// `DeleteWhole` if any duplicate asked for it). Entries are then reordered
    /// children-first; unrelated subtrees keep declaration order.
    pub fn from_entries(entries: Vec<PlanEntry>) -> Self {
        let entries = dedupe(entries);

        let index: HashMap<&Path, usize> = entries
            .iter()
            .enumerate()
            .map(|(i, e)| (e.path.as_path(), i))
            .collect();

        let mut children: Vec<Vec<usize>> = vec![Vec::new(); entries.len()];
        let mut roots = Vec::new();
        for (i, entry) in entries.iter().enumerate() {
            let parent = entry
                .path
                .ancestors()
                .skip(1)
                .find_map(|ancestor| index.get(ancestor).copied());
            match parent {
                Some(parent) => children[parent].push(i),
                None => roots.push(i),
            }
        }

        let mut order = Vec::with_capacity(entries.len());
        let mut subtrees = Vec::with_capacity(roots.len());
        for root in roots {
            let start = order.len();
            post_order(root, &children, &mut order);
            subtrees.push(start..order.len());
        }

        let mut slots: Vec<Option<PlanEntry>> = entries.into_iter().map(Some).collect();
        let entries = order
            .into_iter()
            .filter_map(|i| slots[i].take())
            .collect();

        Self { entries, subtrees }
    }

    pub fn entries(&self) -> &[PlanEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlanEntry> {
        self.entries.iter()
    }

    /// Independent subtrees, each in bottom-up order.
    pub fn subtrees(&self) -> impl Iterator<Item = &[PlanEntry]> {
        self.subtrees.iter().map(|range| &self.entries[range.clone()])
    }

    pub fn subtree_count(&self) -> usize {
        self.subtrees.len()
    }

    /// Look up the entry for `path`.
    pub fn get(&self, path: &Path) -> Option<&PlanEntry> {
        self.entries.iter().find(|e| e.path == path)
    }

    /// Position of `path` in execution order.
    pub fn position(&self, path: &Path) -> Option<usize> {
        self.entries.iter().position(|e| e.path == path)
    }
}

fn dedupe(entries: Vec<PlanEntry>) -> Vec<PlanEntry> {
    let mut seen: HashMap<PathBuf, usize> = HashMap::new();
    let mut unique: Vec<PlanEntry> = Vec::with_capacity(entries.len());

    for entry in entries {
        match seen.get(&entry.path) {
            Some(&i) => {
                let existing = &mut unique[i];
                if entry.mode == DeleteMode::DeleteWhole {
                    existing.mode = DeleteMode::DeleteWhole;
                }
                existing.follow_symlinks |= entry.follow_symlinks;
            }
            None => {
                seen.insert(entry.path.clone(), unique.len());
                unique.push(entry);
            }
        }
    }

    unique
}

/// Iterative post-order walk so deep trees don't blow the stack.
fn post_order(root: usize, children: &[Vec<usize>], out: &mut Vec<usize>) {
    let mut stack = vec![(root, 0usize)];
    while let Some((node, next_child)) = stack.pop() {
        if let Some(&child) = children[node].get(next_child) {
            stack.push((node, next_child + 1));
            stack.push((child, 0));
        } else {
            out.push(node);
        }
    }
}

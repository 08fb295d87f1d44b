//! Deletion planning.

use super::types::{DeleteMode, DeletionPlan, PlanEntry};
use crate::fileset::ResolvedFileset;
use log::debug;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

/// Build a deletion plan from default targets and resolved filesets.
///
/// Default targets that exist are removed whole. Each fileset contributes its
/// matched files, the matched directories that end up with nothing left in them,
/// and any unmatched directories emptied as a side effect.
pub fn plan(
    default_targets: &[PathBuf],
    follow_symlinks: bool,
    filesets: &[ResolvedFileset],
) -> DeletionPlan {
    let mut entries = Vec::new();

    for target in default_targets {
        if fs::symlink_metadata(target).is_ok() {
            entries.push(
                PlanEntry::directory(target, DeleteMode::DeleteWhole)
                    .with_follow_symlinks(follow_symlinks),
            );
        } else {
            debug!("default target {} does not exist", target.display());
        }
    }

    for fileset in filesets {
        if fileset.preserve_all {
            debug!(
                "everything under {} is excluded, leaving it untouched",
                fileset.root.display()
            );
            continue;
        }
        entries.extend(plan_fileset(fileset));
    }

    DeletionPlan::from_entries(entries)
}

/// Plan one fileset, children before parents.
pub fn plan_fileset(fileset: &ResolvedFileset) -> Vec<PlanEntry> {
    if fileset.is_empty() {
        return Vec::new();
    }

    let tree = Tree::build(fileset);
    let removals = tree.removals(fileset);

    let mut entries = Vec::new();
    tree.walk_post_order(&fileset.root, &mut |path: &Path| {
        if fileset.matched_files.contains(path) {
            entries.push(PlanEntry::file(path));
        } else if let Some(&mode) = removals.get(path) {
            entries.push(
                PlanEntry::directory(path, mode).with_follow_symlinks(fileset.follow_symlinks),
            );
        }
    });
    entries
}

/// Parent-to-children view of every walked path.
struct Tree<'a> {
    children: BTreeMap<&'a Path, Vec<&'a Path>>,
}

impl<'a> Tree<'a> {
    fn build(fileset: &'a ResolvedFileset) -> Self {
        let mut children: BTreeMap<&Path, Vec<&Path>> = BTreeMap::new();
        let all = fileset
            .matched_files
            .iter()
            .chain(fileset.untouched_files.iter())
            .chain(fileset.all_dirs());

        for path in all {
            // Entries directly under a `.` root have an empty parent.
            let parent = match path.parent() {
                Some(parent) if parent.as_os_str().is_empty() => fileset.root.as_path(),
                Some(parent) => parent,
                None => continue,
            };
            children.entry(parent).or_default().push(path.as_path());
        }
        for kids in children.values_mut() {
            kids.sort();
        }

        Self { children }
    }

    fn children_of(&self, path: &Path) -> &[&'a Path] {
        self.children.get(path).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Decide which directories disappear, deepest first.
    ///
    /// A matched directory is removed whole when nothing beneath it survives.
    /// An unmatched directory is removed once it has been emptied by deleting
    /// at least one child, unless an exclude pattern protects it.
    fn removals(&self, fileset: &ResolvedFileset) -> HashMap<PathBuf, DeleteMode> {
        let mut dirs: Vec<&PathBuf> = fileset.all_dirs().collect();
        dirs.sort_by_key(|p| std::cmp::Reverse(p.components().count()));

        let mut removed: BTreeSet<&Path> =
            fileset.matched_files.iter().map(PathBuf::as_path).collect();
        let mut modes = HashMap::new();

        for dir in dirs {
            let kids = self.children_of(dir);
            let emptied = kids.iter().all(|kid| removed.contains(kid));

            let mode = if fileset.matched_dirs.contains(dir) {
                emptied.then_some(DeleteMode::DeleteWhole)
            } else if !fileset.protected_dirs.contains(dir) && !kids.is_empty() && emptied {
                Some(DeleteMode::DeleteContentsOnly)
            } else {
                None
            };

            if let Some(mode) = mode {
                removed.insert(dir.as_path());
                modes.insert(dir.clone(), mode);
            }
        }

        modes
    }

    fn walk_post_order(&self, path: &Path, visit: &mut impl FnMut(&Path)) {
        let mut stack: Vec<(&Path, usize)> = vec![(path, 0)];
        while let Some((node, next_child)) = stack.pop() {
            if let Some(&child) = self.children_of(node).get(next_child) {
                stack.push((node, next_child + 1));
                stack.push((child, 0));
            } else if node != path {
                visit(node);
            }
        }
    }
}

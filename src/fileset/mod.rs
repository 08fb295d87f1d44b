//! Fileset resolution: walks a root directory and sorts every descendant into
//! matched and untouched sets.
//!
//! Resolution is read-only. Inclusion is decided per entry; a directory is not
//! selected just because something beneath it matched. Whether a directory ends
//! up empty is the planner's business.

mod types;


pub use types::ResolvedFileset;

use crate::error::{Result, ScourError};
use crate::pattern::PatternMatcher;
use crate::request::FilesetSpec;
use log::{debug, warn};
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

/// Resolve a fileset specification against the filesystem.
///
/// A missing root resolves to an empty fileset. A root that exists but is not
/// a directory is an `InvalidTarget`.
pub fn resolve(spec: &FilesetSpec) -> Result<ResolvedFileset> {
    let matcher = PatternMatcher::new(&spec.includes, &spec.excludes, spec.use_default_excludes)?;
    resolve_with(spec, &matcher)
}

/// Resolve with an already compiled matcher.
pub fn resolve_with(spec: &FilesetSpec, matcher: &PatternMatcher) -> Result<ResolvedFileset> {
    let root = normalize(&spec.directory);
    let mut resolved = ResolvedFileset::empty(&root, spec.follow_symlinks);

    if !ensure_directory(&root)? {
        debug!("fileset root {} does not exist", root.display());
        return Ok(resolved);
    }

    let walker = WalkDir::new(&root)
        .min_depth(1)
        .follow_links(spec.follow_symlinks)
        .sort_by_file_name();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                record_walk_error(&mut resolved, &root, err);
                continue;
            }
        };

        let Some((path, relative)) = rebase(&root, entry.path()) else {
            continue;
        };
        let is_dir = entry.file_type().is_dir();

        if matcher.matches(&relative) {
            if is_dir {
                resolved.matched_dirs.insert(path);
            } else {
                resolved.matched_files.insert(path);
            }
        } else if is_dir {
            if matcher.is_excluded(&relative) {
                resolved.protected_dirs.insert(path.clone());
            }
            resolved.untouched_dirs.insert(path);
        } else {
            resolved.untouched_files.insert(path);
        }
    }

    resolved.preserve_all = resolved.matched_files.is_empty()
        && resolved.matched_dirs.is_empty()
        && resolved.has_descendants();

    debug!(
        "resolved {}: {} file(s), {} dir(s) matched, {} path(s) untouched",
        root.display(),
        resolved.matched_files.len(),
        resolved.matched_dirs.len(),
        resolved.untouched_files.len() + resolved.untouched_dirs.len()
    );

    Ok(resolved)
}

/// Check that `path` is a directory if it exists.
///
/// Returns `Ok(false)` when the path does not exist.
pub fn ensure_directory(path: &Path) -> Result<bool> {
    match fs::metadata(path) {
        Ok(meta) if meta.is_dir() => Ok(true),
        Ok(_) => Err(ScourError::InvalidTarget(format!(
            "'{}' exists but is not a directory",
            path.display()
        ))),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(ScourError::InvalidTarget(format!(
            "failed to inspect '{}': {}",
            path.display(),
            e
        ))),
    }
}

/// Drop `.` components and trailing separators so prefix checks line up.
pub fn normalize(path: &Path) -> PathBuf {
    let normalized: PathBuf = path
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();
    if normalized.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        normalized
    }
}

/// Split a walked path into the path recorded for it and its root-relative part.
///
/// Under a `.` root the walker yields `./a/b`; that is recorded as `a/b` so it
/// lines up with default targets and other filesets given without the prefix.
fn rebase(root: &Path, walked: &Path) -> Option<(PathBuf, PathBuf)> {
    let relative = walked.strip_prefix(root).ok()?.to_path_buf();
    let path = if root == Path::new(".") {
        relative.clone()
    } else {
        root.join(&relative)
    };
    Some((path, relative))
}

/// Unreadable entries and symlink loops are kept, never deleted.
fn record_walk_error(resolved: &mut ResolvedFileset, root: &Path, err: walkdir::Error) {
    if let Some(ancestor) = err.loop_ancestor() {
        warn!(
            "symlink loop at {} (points back to {}), leaving it in place",
            err.path().map(|p| p.display().to_string()).unwrap_or_default(),
            ancestor.display()
        );
    } else {
        warn!("failed to read fileset entry: {}", err);
    }

    let Some((path, _)) = err.path().and_then(|p| rebase(root, p)) else {
        return;
    };

    // A directory that was listed but could not be read keeps its unknown
    // contents; neither it nor any ancestor may be removed.
    if resolved.matched_dirs.remove(&path) || resolved.untouched_dirs.contains(&path) {
        resolved.untouched_dirs.insert(path.clone());
        resolved.protected_dirs.insert(path);
    } else {
        resolved.untouched_files.insert(path);
    }
}

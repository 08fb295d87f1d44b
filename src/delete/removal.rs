//! Filesystem removal primitives.
//!
//! These return raw `io::Error`s; classification and retry happen in the
//! executor.

use crate::plan::{DeleteMode, EntryKind, PlanEntry};
use log::warn;
use std::fs;
use std::io;
use std::path::Path;
use walkdir::WalkDir;

/// What a single removal attempt found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Removal {
    Removed,
    /// Nothing was there to remove.
    Missing,
}

/// Remove the path behind one plan entry.
pub(crate) fn remove_entry(entry: &PlanEntry) -> io::Result<Removal> {
    let path = entry.path.as_path();
    let metadata = match fs::symlink_metadata(path) {
        Ok(metadata) => metadata,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Removal::Missing),
        Err(err) => return Err(err),
    };

    if metadata.file_type().is_symlink() {
        let through = entry.follow_symlinks
            && entry.kind == EntryKind::Directory
            && entry.mode == DeleteMode::DeleteWhole
            && path.is_dir();
        if through {
            remove_contents_following(path)?;
        }
        remove_link(path)?;
        return Ok(Removal::Removed);
    }

    match (entry.kind, metadata.is_dir()) {
        (EntryKind::File, false) => remove_file(path)?,
        (EntryKind::File, true) => {
            return Err(io::Error::new(
                io::ErrorKind::IsADirectory,
                format!("expected a file but found a directory: {}", path.display()),
            ));
        }
        (EntryKind::Directory, false) => {
            return Err(io::Error::new(
                io::ErrorKind::NotADirectory,
                format!("expected a directory but found a file: {}", path.display()),
            ));
        }
        (EntryKind::Directory, true) => match entry.mode {
            DeleteMode::DeleteContentsOnly => fs::remove_dir(path)?,
            DeleteMode::DeleteWhole if entry.follow_symlinks => {
                remove_contents_following(path)?;
                fs::remove_dir(path)?;
            }
            DeleteMode::DeleteWhole => fs::remove_dir_all(path)?,
        },
    }

    Ok(Removal::Removed)
}

/// Remove everything reachable under `dir`, descending through links.
///
/// Linked directories lose their contents and then the link itself; the
/// link targets stay behind empty. Links that loop back to an ancestor are
/// only unlinked.
fn remove_contents_following(dir: &Path) -> io::Result<()> {
    let walker = WalkDir::new(dir)
        .min_depth(1)
        .follow_links(true)
        .contents_first(true);

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            // A link back to an ancestor: drop the link, never descend.
            Err(err) if err.loop_ancestor().is_some() => {
                if let Some(link) = err.path() {
                    warn!("unlinking symlink loop at {}", link.display());
                    remove_link(link)?;
                }
                continue;
            }
            Err(err) => return Err(io::Error::from(err)),
        };
        if entry.path_is_symlink() {
            remove_link(entry.path())?;
        } else if entry.file_type().is_dir() {
            fs::remove_dir(entry.path())?;
        } else {
            remove_file(entry.path())?;
        }
    }

    Ok(())
}

/// Unlink a symbolic link without touching its target.
fn remove_link(path: &Path) -> io::Result<()> {
    match fs::remove_file(path) {
        // Directory symlinks and junctions on Windows are removed like directories.
        Err(err) if cfg!(windows) => fs::remove_dir(path).map_err(|_| err),
        other => other,
    }
}

/// Like `fs::remove_file`, but clears the read-only attribute on Windows and
/// tries once more.
fn remove_file(path: &Path) -> io::Result<()> {
    /// If the file is readonly, change the permissions to make it _not_ readonly.
    fn set_not_readonly(path: &Path) -> io::Result<bool> {
        let mut perms = path.metadata()?.permissions();
        if !perms.readonly() {
            return Ok(false);
        }

        #[allow(clippy::permissions_set_readonly_false)]
        perms.set_readonly(false);

        fs::set_permissions(path, perms)?;

        Ok(true)
    }

    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(err)
            if cfg!(windows)
                && err.kind() == io::ErrorKind::PermissionDenied
                && set_not_readonly(path).unwrap_or(false) =>
        {
            fs::remove_file(path)
        }
        Err(err) => Err(err),
    }
}

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{LazyLock, Mutex, MutexGuard};
use tempfile::TempDir;

static CWD_LOCK: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

pub(crate) struct DirGuard {
    original: PathBuf,
    _lock: MutexGuard<'static, ()>,
}

impl DirGuard {
    pub(crate) fn new(new_dir: &Path) -> Self {
        // Changing the process current working directory is global and not thread-safe.
        // Lock it so tests don't race even if a #[serial] annotation is missed.
        let lock = CWD_LOCK.lock().unwrap_or_else(|poison| poison.into_inner());
        let original = std::env::current_dir().unwrap();
        std::env::set_current_dir(new_dir).unwrap();
        Self {
            original,
            _lock: lock,
        }
    }
}

impl Drop for DirGuard {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.original);
    }
}

/// Create a temp directory populated with `files` (relative, `/`-separated).
///
/// Entries ending in `/` become empty directories.
pub(crate) fn create_tree(files: &[&str]) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    for file in files {
        add(temp_dir.path(), file);
    }
    temp_dir
}

/// Add one file or (trailing `/`) directory under `root`.
pub(crate) fn add(root: &Path, relative: &str) -> PathBuf {
    let path = root.join(relative);
    if relative.ends_with('/') {
        fs::create_dir_all(&path).unwrap();
    } else {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, relative).unwrap();
    }
    path
}

/// True if the directory has no entries (or does not exist).
pub(crate) fn is_empty_dir(path: &Path) -> bool {
    fs::read_dir(path)
        .map(|mut entries| entries.next().is_none())
        .unwrap_or(true)
}

/// Make `dir` read-only so nothing inside it can be unlinked.
///
/// Returns `false` when the current user bypasses permission checks (root),
/// in which case permission-failure tests have nothing to observe.
#[cfg(unix)]
pub(crate) fn lock_down(dir: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(dir, fs::Permissions::from_mode(0o555)).unwrap();

    let probe = dir.join(".probe");
    if fs::write(&probe, b"").is_ok() {
        let _ = fs::remove_file(&probe);
        unlock(dir);
        return false;
    }
    true
}

/// Undo `lock_down` so the temp directory can be cleaned up.
#[cfg(unix)]
pub(crate) fn unlock(dir: &Path) {
    use std::os::unix::fs::PermissionsExt;

    let _ = fs::set_permissions(dir, fs::Permissions::from_mode(0o755));
}

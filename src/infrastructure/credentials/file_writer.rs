//! Owner-read-only credential file writes.

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock, Mutex, PoisonError};

use secrecy::{ExposeSecret, SecretString};
use tokio::sync::Mutex as AsyncMutex;
use tracing::debug;

/// Owner read, nothing else
#[cfg(unix)]
pub const CREDENTIAL_FILE_MODE: u32 = 0o400;

static PATH_LOCKS: LazyLock<Mutex<HashMap<PathBuf, Arc<AsyncMutex<()>>>>> =
    LazyLock::new(Mutex::default);

/// Process-wide lock serializing writers of one credential path.
fn path_lock(path: &Path) -> Arc<AsyncMutex<()>> {
    let mut locks = PATH_LOCKS.lock().unwrap_or_else(PoisonError::into_inner);
    Arc::clone(locks.entry(path.to_path_buf()).or_default())
}

/// A claim on a path's lock that drops the registry entry once nobody
/// else holds or waits on it.
struct PathLockLease {
    path: PathBuf,
    lock: Arc<AsyncMutex<()>>,
}

impl PathLockLease {
    fn acquire(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            lock: path_lock(path),
        }
    }
}

impl Drop for PathLockLease {
    fn drop(&mut self) {
        let mut locks = PATH_LOCKS.lock().unwrap_or_else(PoisonError::into_inner);
        // Held only by the registry and this lease.
        let unused = Arc::strong_count(&self.lock) == 2
            && locks
                .get(&self.path)
                .is_some_and(|lock| Arc::ptr_eq(lock, &self.lock));
        if unused {
            locks.remove(&self.path);
        }
    }
}

/// Write `contents` verbatim to `path` as an owner-read-only file.
///
/// The bytes go to a temporary file in the same directory that is owner-only
/// from the moment it is created, is narrowed to read-only, and is then
/// renamed over `path`. Readers see either the previous file or the complete
/// new one, and the file is never group/other accessible.
///
/// The work runs on a blocking task that finishes even if this future is
/// dropped, so cancellation cannot leave a half-written or
/// half-permissioned file behind. `contents` is zeroized once written.
pub async fn write_protected(path: &Path, contents: SecretString) -> io::Result<()> {
    let lease = PathLockLease::acquire(path);
    let guard = Arc::clone(&lease.lock).lock_owned().await;
    let target = path.to_path_buf();

    let written = tokio::task::spawn_blocking(move || {
        let _guard = guard;
        write_blocking(&target, contents.expose_secret().as_bytes())
    })
    .await
    .map_err(io::Error::other)?;

    drop(lease);
    written
}

fn write_blocking(path: &Path, contents: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = tempfile::Builder::new()
        .prefix(".vertex-credentials")
        .suffix(".tmp")
        .tempfile_in(dir)?;
    debug!(temp = %file.path().display(), "staging credential file");

    file.write_all(contents)?;
    file.as_file().sync_all()?;
    restrict_permissions(file.as_file())?;

    // On failure the PersistError still owns the temp file and deletes it on drop.
    file.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(unix)]
fn restrict_permissions(file: &File) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(fs::Permissions::from_mode(CREDENTIAL_FILE_MODE))
}

#[cfg(not(unix))]
fn restrict_permissions(file: &File) -> io::Result<()> {
    let mut permissions = file.metadata()?.permissions();
    permissions.set_readonly(true);
    file.set_permissions(permissions)
}

//! The marker file and the lock verdict derived from it.

use crate::error::{is_protection_denied, MarkerError};
use crate::store::{FsMarkerStore, MarkerStore};
use lockwatch_context::ScreenState;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// File name used inside the group directory unless configured otherwise.
pub const DEFAULT_MARKER_FILE_NAME: &str = ".lockwatch-protected";

/// Outcome of a successful creation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Creation {
    /// This call created the file; the device was unlocked at that moment.
    Created,
    /// The file was already there.
    AlreadyPresent,
}

/// Protected marker at a fixed path.
#[derive(Clone)]
pub struct MarkerFile {
    path: PathBuf,
    store: Arc<dyn MarkerStore>,
}

impl std::fmt::Debug for MarkerFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MarkerFile")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl MarkerFile {
    /// Marker on the real filesystem.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_store(path, Arc::new(FsMarkerStore))
    }

    pub fn with_store(path: impl Into<PathBuf>, store: Arc<dyn MarkerStore>) -> Self {
        Self {
            path: path.into(),
            store,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.store.exists(&self.path)
    }

    /// Ensure the marker exists. Must run while the device is unlocked.
    ///
    /// Returns whether the marker is now known to exist. Calling it again
    /// after success is a no-op that returns `true`.
    pub fn initialize(&self) -> bool {
        match self.try_initialize() {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "marker initialization failed"
                );
                false
            }
        }
    }

    /// Like [`initialize`](Self::initialize) but reports what happened.
    pub fn try_initialize(&self) -> Result<Creation, MarkerError> {
        if self.exists() {
            return Ok(Creation::AlreadyPresent);
        }

        match self.store.create_protected(&self.path) {
            Ok(()) => {
                tracing::info!(path = %self.path.display(), "created protected marker");
                Ok(Creation::Created)
            }
            Err(MarkerError::AlreadyExists(_)) => Ok(Creation::AlreadyPresent),
            Err(e) => Err(e),
        }
    }

    /// Derive the lock state from the marker.
    ///
    /// | Marker            | Result                         |
    /// |-------------------|--------------------------------|
    /// | absent, created   | `Unlocked`                     |
    /// | absent, failed    | `Unknown`                      |
    /// | readable          | `Unlocked`                     |
    /// | protection denied | `Locked`                       |
    /// | other read error  | `Unknown`                      |
    pub fn resolve(&self) -> ScreenState {
        if !self.exists() {
            match self.try_initialize() {
                Ok(Creation::Created) => return ScreenState::Unlocked,
                // Someone else created it in between; fall through and read.
                Ok(Creation::AlreadyPresent) => {}
                Err(e) => {
                    tracing::debug!(error = %e, "marker absent and not creatable");
                    return ScreenState::Unknown;
                }
            }
        }

        match self.store.read(&self.path) {
            Ok(_) => ScreenState::Unlocked,
            Err(e) if is_protection_denied(&e) => {
                tracing::debug!(
                    path = %self.path.display(),
                    "marker read denied by data protection"
                );
                ScreenState::Locked
            }
            Err(e) => {
                tracing::debug!(path = %self.path.display(), error = %e, "marker read failed");
                ScreenState::Unknown
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    /// In-memory store with a switchable "device locked" flag.
    #[derive(Default)]
    struct ScriptedStore {
        present: AtomicBool,
        locked: AtomicBool,
        read_error: Option<io::ErrorKind>,
        creations: AtomicUsize,
    }

    impl MarkerStore for ScriptedStore {
        fn exists(&self, _path: &Path) -> bool {
            self.present.load(Ordering::SeqCst)
        }

        fn create_protected(&self, path: &Path) -> Result<(), MarkerError> {
            if self.locked.load(Ordering::SeqCst) {
                return Err(MarkerError::ProtectionRejected(path.to_path_buf()));
            }
            if self.present.swap(true, Ordering::SeqCst) {
                return Err(MarkerError::AlreadyExists(path.to_path_buf()));
            }
            self.creations.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn read(&self, _path: &Path) -> io::Result<Vec<u8>> {
            if let Some(kind) = self.read_error {
                return Err(io::Error::from(kind));
            }
            if self.locked.load(Ordering::SeqCst) {
                return Err(io::Error::from(io::ErrorKind::PermissionDenied));
            }
            Ok(Vec::new())
        }
    }

    fn marker(store: Arc<ScriptedStore>) -> MarkerFile {
        MarkerFile::with_store("/group/.lockwatch-protected", store)
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let store = Arc::new(ScriptedStore::default());
        let marker = marker(Arc::clone(&store));

        assert!(marker.initialize());
        assert!(marker.initialize());
        assert!(marker.exists());
        assert_eq!(store.creations.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_initialize_fails_while_locked() {
        let store = Arc::new(ScriptedStore::default());
        store.locked.store(true, Ordering::SeqCst);
        let marker = marker(store);

        assert!(!marker.initialize());
        assert!(!marker.exists());
    }

    #[test]
    fn test_resolve_creates_missing_marker() {
        let store = Arc::new(ScriptedStore::default());
        let marker = marker(Arc::clone(&store));

        assert_eq!(marker.resolve(), ScreenState::Unlocked);
        assert!(marker.exists());
    }

    #[test]
    fn test_resolve_missing_marker_while_locked_is_unknown() {
        let store = Arc::new(ScriptedStore::default());
        store.locked.store(true, Ordering::SeqCst);

        assert_eq!(marker(store).resolve(), ScreenState::Unknown);
    }

    #[test]
    fn test_resolve_readable_marker_is_unlocked() {
        let store = Arc::new(ScriptedStore::default());
        store.present.store(true, Ordering::SeqCst);

        assert_eq!(marker(store).resolve(), ScreenState::Unlocked);
    }

    #[test]
    fn test_resolve_protection_denied_is_locked() {
        let store = Arc::new(ScriptedStore::default());
        store.present.store(true, Ordering::SeqCst);
        store.locked.store(true, Ordering::SeqCst);

        assert_eq!(marker(store).resolve(), ScreenState::Locked);
    }

    #[test]
    fn test_resolve_other_read_error_is_unknown() {
        let store = Arc::new(ScriptedStore {
            read_error: Some(io::ErrorKind::Other),
            ..Default::default()
        });
        store.present.store(true, Ordering::SeqCst);

        assert_eq!(marker(store).resolve(), ScreenState::Unknown);
    }

    #[test]
    fn test_resolve_after_unlock_recovers() {
        let store = Arc::new(ScriptedStore::default());
        let marker = marker(Arc::clone(&store));
        assert!(marker.initialize());

        store.locked.store(true, Ordering::SeqCst);
        assert_eq!(marker.resolve(), ScreenState::Locked);

        store.locked.store(false, Ordering::SeqCst);
        assert_eq!(marker.resolve(), ScreenState::Unlocked);
    }
}

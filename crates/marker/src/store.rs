//! Storage backend for the marker file.

use crate::error::MarkerError;
use std::io;
use std::path::Path;

/// Filesystem operations the oracle needs.
///
/// The default implementation talks to the real filesystem; tests inject
/// doubles that simulate a locked device.
pub trait MarkerStore: Send + Sync {
    fn exists(&self, path: &Path) -> bool;

    /// Create an empty file with unlock-gated protection.
    ///
    /// Must fail with [`MarkerError::AlreadyExists`] if the file exists.
    fn create_protected(&self, path: &Path) -> Result<(), MarkerError>;

    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;
}

/// Real filesystem store.
///
/// On iOS creation goes through NSFileManager with
/// `NSFileProtectionComplete`. Elsewhere a plain empty file is created;
/// those platforms have no unlock-gated protection, so reads never report
/// `locked`.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsMarkerStore;

impl MarkerStore for FsMarkerStore {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn create_protected(&self, path: &Path) -> Result<(), MarkerError> {
        let parent = path
            .parent()
            .ok_or_else(|| MarkerError::NoParent(path.to_path_buf()))?;
        std::fs::create_dir_all(parent)?;

        if path.exists() {
            return Err(MarkerError::AlreadyExists(path.to_path_buf()));
        }

        crate::platform::create_protected_file(path)
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        std::fs::read(path)
    }
}

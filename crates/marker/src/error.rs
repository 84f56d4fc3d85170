//! Error types for marker management.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while creating the marker file.
#[derive(Debug, Error)]
pub enum MarkerError {
    /// The marker path has no parent directory to create.
    #[error("marker path has no parent directory: {}", .0.display())]
    NoParent(PathBuf),

    /// The marker already exists (a concurrent creator won).
    #[error("marker already exists: {}", .0.display())]
    AlreadyExists(PathBuf),

    /// The OS refused to create a protected file (usually: device locked).
    #[error("protected marker creation rejected at {}", .0.display())]
    ProtectionRejected(PathBuf),

    /// Any other I/O failure.
    #[error("marker I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Whether a read error means "data protection denied access".
///
/// Only iOS has unlock-gated file protection: a complete-protection file
/// fails with `EPERM` while the device is locked. `EACCES` is an ordinary
/// permission problem and never counts. Elsewhere no OS error is a
/// protection denial. Errors without an OS code (synthesized by test
/// doubles) fall back to the error kind.
pub fn is_protection_denied(err: &io::Error) -> bool {
    match err.raw_os_error() {
        Some(code) => is_protection_errno(code),
        None => err.kind() == io::ErrorKind::PermissionDenied,
    }
}

#[cfg(target_os = "ios")]
fn is_protection_errno(code: i32) -> bool {
    code == libc::EPERM
}

#[cfg(not(target_os = "ios"))]
fn is_protection_errno(_code: i32) -> bool {
    false
}

//! Marker-file lock oracle.
//!
//! Extensions cannot ask the OS whether the device is locked. They can,
//! however, create a file whose data protection class makes it unreadable
//! while the device is locked. Reading that file tells us the lock state:
//!
//! - read succeeds -> unlocked
//! - read denied by data protection -> locked
//! - anything else -> unknown
//!
//! The marker is created empty and never rewritten or deleted.

mod error;
mod marker;
mod store;

pub mod platform;

pub use error::{is_protection_denied, MarkerError};
pub use marker::{Creation, MarkerFile, DEFAULT_MARKER_FILE_NAME};
pub use store::{FsMarkerStore, MarkerStore};

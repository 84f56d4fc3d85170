//! Platform-specific direct lock queries.

#[cfg(target_os = "macos")]
mod macos;

#[cfg(target_os = "ios")]
mod ios;

#[cfg(target_os = "macos")]
pub use macos::{copy_session_snapshot, SessionLockQuery};

#[cfg(target_os = "ios")]
pub use ios::ProtectedDataQuery;

// Re-export the appropriate query for the current platform
#[cfg(target_os = "macos")]
pub type PlatformLockQuery = SessionLockQuery;

#[cfg(target_os = "ios")]
pub type PlatformLockQuery = ProtectedDataQuery;

/// No lock API on this platform: always `Unknown`.
#[cfg(not(any(target_os = "macos", target_os = "ios")))]
#[derive(Debug, Default, Clone, Copy)]
pub struct UnsupportedLockQuery;

#[cfg(not(any(target_os = "macos", target_os = "ios")))]
impl crate::LockQuery for UnsupportedLockQuery {
    fn query(&self) -> lockwatch_context::ScreenState {
        lockwatch_context::ScreenState::Unknown
    }
}

#[cfg(not(any(target_os = "macos", target_os = "ios")))]
pub type PlatformLockQuery = UnsupportedLockQuery;

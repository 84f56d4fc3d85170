//! Platform notification centers.

#[cfg(any(target_os = "macos", target_os = "ios"))]
mod cf;

#[cfg(any(target_os = "macos", target_os = "ios"))]
pub use cf::CfNotificationCenter;

use crate::center::NotificationCenterRef;
use crate::observer::TransitionNames;
use std::sync::Arc;

#[cfg(target_os = "macos")]
pub const PLATFORM_TRANSITIONS: TransitionNames = crate::observer::DESKTOP_TRANSITIONS;

#[cfg(not(target_os = "macos"))]
pub const PLATFORM_TRANSITIONS: TransitionNames = crate::observer::MOBILE_TRANSITIONS;

/// The OS bus carrying lock transitions on this platform.
///
/// Platforms without one get an in-memory center nobody posts to.
pub fn platform_center() -> NotificationCenterRef {
    #[cfg(target_os = "macos")]
    {
        Arc::new(CfNotificationCenter::distributed())
    }
    #[cfg(target_os = "ios")]
    {
        Arc::new(CfNotificationCenter::local())
    }
    #[cfg(not(any(target_os = "macos", target_os = "ios")))]
    {
        Arc::new(crate::center::InMemoryNotificationCenter::new())
    }
}

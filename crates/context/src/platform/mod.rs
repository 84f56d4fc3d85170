//! Platform-specific implementations.

mod bundle;

pub use bundle::{find_enclosing_bundle, read_bundle_metadata, ExecutableBundleProvider};

// Re-export the appropriate provider for the current platform
#[cfg(any(target_os = "macos", target_os = "ios"))]
pub type PlatformBundleProvider = ExecutableBundleProvider;

#[cfg(not(any(target_os = "macos", target_os = "ios")))]
pub type PlatformBundleProvider = crate::provider::FixedBundleProvider;

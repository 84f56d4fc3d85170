//! Provider trait for packaging metadata.
//!
//! Abstracts where bundle metadata comes from so classification can be
//! tested with injected fake bundles.

use crate::context::{classify, BundleMetadata, ExecutionContext};

/// Source of the running process's packaging metadata.
pub trait BundleProvider: Send + Sync {
    /// Metadata of the enclosing bundle, or `None` when it is absent or
    /// cannot be read.
    fn bundle_metadata(&self) -> Option<BundleMetadata>;
}

/// Provider returning a fixed value. Used in tests and on platforms
/// without bundles.
#[derive(Debug, Clone, Default)]
pub struct FixedBundleProvider(pub Option<BundleMetadata>);

impl BundleProvider for FixedBundleProvider {
    fn bundle_metadata(&self) -> Option<BundleMetadata> {
        self.0.clone()
    }
}

/// Classify the current process using the given provider.
pub fn classify_with(provider: &dyn BundleProvider) -> ExecutionContext {
    let metadata = provider.bundle_metadata();
    let context = classify(metadata.as_ref());

    tracing::debug!(
        %context,
        bundle_id = ?metadata.as_ref().and_then(|m| m.bundle_id.as_deref()),
        extension_point = ?metadata.as_ref().and_then(|m| m.extension_point.as_deref()),
        "classified execution context"
    );

    context
}

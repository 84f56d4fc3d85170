//! Capability descriptor: which signal a context may use.

use crate::platform::PlatformLockQuery;
use crate::query::LockQuery;
use lockwatch_context::{ExecutionContext, ScreenState};
use lockwatch_marker::MarkerFile;
use std::sync::Arc;

/// The lock signal available to a process, resolved once at startup.
#[derive(Clone)]
pub enum Capability {
    /// The OS answers directly.
    Direct(Arc<dyn LockQuery>),
    /// Infer from the data-protected marker file.
    Marker(MarkerFile),
    /// No trustworthy signal.
    Unavailable,
}

impl Capability {
    /// Default capability for a context on this platform.
    ///
    /// The marker is only consulted for restricted extensions.
    pub fn for_context(context: ExecutionContext, marker: MarkerFile) -> Self {
        match context {
            ExecutionContext::RestrictedExtension => Capability::Marker(marker),
            other => Self::without_marker(other),
        }
    }

    /// Capability when no marker location is known.
    ///
    /// Restricted extensions have nothing else to go on and get
    /// [`Capability::Unavailable`].
    pub fn without_marker(context: ExecutionContext) -> Self {
        match context {
            ExecutionContext::MainProcess => {
                Capability::Direct(Arc::new(PlatformLockQuery::default()))
            }
            ExecutionContext::RestrictedExtension | ExecutionContext::UltraRestrictedExtension => {
                Capability::Unavailable
            }
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Capability::Direct(_) => "direct",
            Capability::Marker(_) => "marker",
            Capability::Unavailable => "unavailable",
        }
    }

    pub fn marker(&self) -> Option<&MarkerFile> {
        match self {
            Capability::Marker(marker) => Some(marker),
            _ => None,
        }
    }

    pub fn resolve(&self) -> ScreenState {
        match self {
            Capability::Direct(query) => query.query(),
            Capability::Marker(marker) => marker.resolve(),
            Capability::Unavailable => ScreenState::Unknown,
        }
    }
}

impl std::fmt::Debug for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Capability::Marker(marker) => f.debug_tuple("Marker").field(marker).finish(),
            other => f.write_str(other.label()),
        }
    }
}

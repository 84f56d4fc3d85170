//! State resolver - turns a context and capability into a verdict.

use crate::capability::Capability;
use crate::poller::StateSource;
use lockwatch_context::{ExecutionContext, ScreenState};
use lockwatch_marker::MarkerFile;

/// Produces the current [`ScreenState`] for one process.
#[derive(Debug, Clone)]
pub struct StateResolver {
    context: ExecutionContext,
    capability: Capability,
}

impl StateResolver {
    /// Resolver with an explicit capability (tests, custom platforms).
    pub fn new(context: ExecutionContext, capability: Capability) -> Self {
        Self {
            context,
            capability,
        }
    }

    /// Resolver using the platform default capability for `context`.
    pub fn for_context(context: ExecutionContext, marker: MarkerFile) -> Self {
        Self::new(context, Capability::for_context(context, marker))
    }

    pub fn context(&self) -> ExecutionContext {
        self.context
    }

    pub fn capability(&self) -> &Capability {
        &self.capability
    }

    /// Current lock state. Never fails.
    ///
    /// Widget extensions always get `Unknown`, whatever capability was
    /// injected.
    pub fn current_state(&self) -> ScreenState {
        if self.context == ExecutionContext::UltraRestrictedExtension {
            return ScreenState::Unknown;
        }

        let state = self.capability.resolve();
        tracing::trace!(
            context = %self.context,
            capability = self.capability.label(),
            %state,
            "resolved screen state"
        );
        state
    }
}

impl StateSource for StateResolver {
    fn current_state(&self) -> ScreenState {
        StateResolver::current_state(self)
    }
}

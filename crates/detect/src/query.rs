//! Direct lock-state queries.

use lockwatch_context::ScreenState;

/// A synchronous, authoritative lock-state query offered by the OS.
pub trait LockQuery: Send + Sync {
    fn query(&self) -> ScreenState;
}

/// Query that always answers the same. Used in tests and as the
/// fallback on platforms without a lock API.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedQuery(pub ScreenState);

impl LockQuery for FixedQuery {
    fn query(&self) -> ScreenState {
        self.0
    }
}

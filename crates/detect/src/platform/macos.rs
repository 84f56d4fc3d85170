//! macOS lock query through the CoreGraphics session dictionary.

use crate::query::LockQuery;
use crate::session::{session_verdict, SessionSnapshot, SESSION_LOCKED_KEY};
use core_foundation::base::{CFType, TCFType};
use core_foundation::boolean::CFBoolean;
use core_foundation::dictionary::{CFDictionary, CFDictionaryRef};
use core_foundation::string::CFString;
use lockwatch_context::ScreenState;

#[link(name = "CoreGraphics", kind = "framework")]
extern "C" {
    fn CGSessionCopyCurrentDictionary() -> CFDictionaryRef;
}

/// Reads `CGSSessionScreenIsLocked` from the current session.
#[derive(Debug, Default, Clone, Copy)]
pub struct SessionLockQuery;

impl LockQuery for SessionLockQuery {
    fn query(&self) -> ScreenState {
        session_verdict(copy_session_snapshot())
    }
}

/// Copy the lock flag out of the current session dictionary.
///
/// Returns `None` when the process has no GUI session (ssh, launchd daemon).
pub fn copy_session_snapshot() -> Option<SessionSnapshot> {
    let raw = unsafe { CGSessionCopyCurrentDictionary() };
    if raw.is_null() {
        return None;
    }

    // Follows the Create rule: we own the returned reference
    let session: CFDictionary<CFString, CFType> = unsafe { TCFType::wrap_under_create_rule(raw) };
    let key = CFString::from_static_string(SESSION_LOCKED_KEY);

    // A present key with a non-boolean value still means "locked"
    let screen_is_locked = session
        .find(&key)
        .map(|value| value.downcast::<CFBoolean>().map(bool::from).unwrap_or(true));

    Some(SessionSnapshot { screen_is_locked })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_query_smoke() {
        // Result depends on whether tests run inside a GUI session
        let state = SessionLockQuery.query();
        println!("Session lock state: {state}");
    }
}

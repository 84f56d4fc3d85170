//! Interpretation of raw platform lock signals.
//!
//! Pure functions so the rules can be tested on any host.

use lockwatch_context::ScreenState;

/// Session dictionary key set while the screen is locked.
pub const SESSION_LOCKED_KEY: &str = "CGSSessionScreenIsLocked";

/// The part of the macOS session dictionary we care about.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSnapshot {
    /// Value of `CGSSessionScreenIsLocked`; `None` when the key is absent
    pub screen_is_locked: Option<bool>,
}

/// Verdict from the session dictionary.
///
/// No dictionary at all means there is no GUI session, which is different
/// from a GUI session that is unlocked.
pub fn session_verdict(session: Option<SessionSnapshot>) -> ScreenState {
    match session {
        None => ScreenState::Unknown,
        Some(SessionSnapshot {
            screen_is_locked: Some(true),
        }) => ScreenState::Locked,
        Some(_) => ScreenState::Unlocked,
    }
}

/// Verdict from iOS's protected-data flag.
pub fn protected_data_verdict(protected_data_available: bool) -> ScreenState {
    if protected_data_available {
        ScreenState::Unlocked
    } else {
        ScreenState::Locked
    }
}

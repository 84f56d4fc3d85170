//! Screen lock state.

use serde::{Deserialize, Serialize};

/// Verdict about the device's display lock state.
///
/// `Unknown` is a first-class answer: it is returned whenever no
/// trustworthy signal is available rather than guessing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ScreenState {
    #[default]
    Unknown,
    Locked,
    Unlocked,
}

impl ScreenState {
    pub fn label(&self) -> &'static str {
        match self {
            ScreenState::Unknown => "unknown",
            ScreenState::Locked => "locked",
            ScreenState::Unlocked => "unlocked",
        }
    }

    pub fn is_locked(&self) -> bool {
        matches!(self, ScreenState::Locked)
    }

    /// False only for `Unknown`.
    pub fn is_known(&self) -> bool {
        !matches!(self, ScreenState::Unknown)
    }
}

impl std::fmt::Display for ScreenState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unknown() {
        assert_eq!(ScreenState::default(), ScreenState::Unknown);
        assert!(!ScreenState::Unknown.is_known());
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&ScreenState::Unlocked).unwrap();
        assert_eq!(json, "\"unlocked\"");
        let parsed: ScreenState = serde_json::from_str("\"locked\"").unwrap();
        assert!(parsed.is_locked());
    }
}

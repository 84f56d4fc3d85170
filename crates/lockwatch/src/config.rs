//! Process-wide lockwatch configuration.

use crate::error::{ConfigError, Result};
use lockwatch_marker::DEFAULT_MARKER_FILE_NAME;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable overriding the group directory.
pub const GROUP_DIR_ENV: &str = "LOCKWATCH_GROUP_DIR";

/// Default application-group name.
pub const DEFAULT_GROUP_ID: &str = "lockwatch";

/// Where the marker lives and how often to poll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LockWatchConfig {
    /// Writable directory shared by the app and its extensions
    /// (an app-group container on Apple platforms)
    pub group_dir: Option<PathBuf>,

    /// Group name used under the platform data directory when
    /// `group_dir` is unset
    pub group_id: String,

    /// File name of the protected marker
    pub marker_file_name: String,

    /// Interval for polling-based observation
    pub poll_interval_ms: u64,
}

impl Default for LockWatchConfig {
    fn default() -> Self {
        Self {
            group_dir: None,
            group_id: DEFAULT_GROUP_ID.to_string(),
            marker_file_name: DEFAULT_MARKER_FILE_NAME.to_string(),
            poll_interval_ms: 1000,
        }
    }
}

impl LockWatchConfig {
    /// Config rooted at an explicit group directory.
    pub fn with_group_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            group_dir: Some(dir.into()),
            ..Self::default()
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load from a JSON file. Missing keys take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Defaults, with `LOCKWATCH_GROUP_DIR` applied if set.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(dir) = std::env::var_os(GROUP_DIR_ENV).filter(|v| !v.is_empty()) {
            config.group_dir = Some(PathBuf::from(dir));
        }
        config
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }

    /// Directory holding the marker.
    pub fn group_directory(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.group_dir {
            return Ok(dir.clone());
        }

        dirs::data_local_dir()
            .map(|dir| dir.join(&self.group_id))
            .ok_or(ConfigError::NoGroupDirectory)
    }

    /// Full path of the marker file.
    pub fn marker_path(&self) -> Result<PathBuf> {
        let name = self.marker_file_name.as_str();
        if name.is_empty() || name.contains('/') || name.contains('\\') || name == ".." {
            return Err(ConfigError::InvalidMarkerName(name.to_string()));
        }

        Ok(self.group_directory()?.join(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LockWatchConfig::default();
        assert_eq!(config.group_id, "lockwatch");
        assert_eq!(config.marker_file_name, ".lockwatch-protected");
        assert_eq!(config.poll_interval(), Duration::from_secs(1));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config =
            LockWatchConfig::from_json_str(r#"{ "group_dir": "/shared/group" }"#).unwrap();
        assert_eq!(config.group_dir, Some(PathBuf::from("/shared/group")));
        assert_eq!(config.marker_file_name, ".lockwatch-protected");
        assert_eq!(
            config.marker_path().unwrap(),
            PathBuf::from("/shared/group/.lockwatch-protected")
        );
    }

    #[test]
    fn test_invalid_json() {
        let err = LockWatchConfig::from_json_str("{ nope").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_rejects_marker_name_with_separator() {
        let config = LockWatchConfig {
            marker_file_name: "../escape".to_string(),
            ..LockWatchConfig::with_group_dir("/shared")
        };
        assert!(matches!(
            config.marker_path(),
            Err(ConfigError::InvalidMarkerName(_))
        ));
    }

    #[test]
    fn test_zero_poll_interval_is_clamped() {
        let config = LockWatchConfig {
            poll_interval_ms: 0,
            ..Default::default()
        };
        assert_eq!(config.poll_interval(), Duration::from_millis(1));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lockwatch.json");
        std::fs::write(&path, r#"{ "group_id": "group.com.example", "poll_interval_ms": 250 }"#)
            .unwrap();

        let config = LockWatchConfig::load(&path).unwrap();
        assert_eq!(config.group_id, "group.com.example");
        assert_eq!(config.poll_interval(), Duration::from_millis(250));
    }

    // The only test touching GROUP_DIR_ENV; the environment is process-wide.
    #[test]
    fn test_from_env_group_dir() {
        std::env::set_var(GROUP_DIR_ENV, "/tmp/lockwatch-env-group");
        let config = LockWatchConfig::from_env();
        assert_eq!(config.group_dir, Some(PathBuf::from("/tmp/lockwatch-env-group")));
        assert_eq!(
            config.marker_path().unwrap(),
            PathBuf::from("/tmp/lockwatch-env-group/.lockwatch-protected")
        );

        std::env::set_var(GROUP_DIR_ENV, "");
        assert_eq!(LockWatchConfig::from_env().group_dir, None);

        std::env::remove_var(GROUP_DIR_ENV);
        let config = LockWatchConfig::from_env();
        assert_eq!(config.group_dir, None);
        assert_eq!(config.group_id, DEFAULT_GROUP_ID);
    }

    #[test]
    fn test_load_missing_file() {
        let err = LockWatchConfig::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}

//! Error types for configuration.

use thiserror::Error;

/// Errors that can occur while loading or resolving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading the config file failed.
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// The config file is not valid JSON for [`LockWatchConfig`](crate::LockWatchConfig).
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    /// Neither an explicit group directory nor a platform data directory exists.
    #[error("no writable group directory - set group_dir or LOCKWATCH_GROUP_DIR")]
    NoGroupDirectory,

    /// The marker file name is empty or contains a path separator.
    #[error("invalid marker file name: {0:?}")]
    InvalidMarkerName(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

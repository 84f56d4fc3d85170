//! Screen lock state detection for apps, app extensions and widgets.
//!
//! This crate ties the pieces together behind one value built once per
//! process:
//! - `lockwatch-context` - which kind of process is this?
//! - `lockwatch-detect`  - lock verdict for that kind of process
//! - `lockwatch-marker`  - data-protected marker file for extensions
//! - `lockwatch-events`  - push notifications on lock/unlock
//!
//! # Example
//!
//! ```ignore
//! use lockwatch::{LockWatch, LockWatchConfig};
//!
//! let watch = LockWatch::new(LockWatchConfig::from_env());
//! watch.initialize();
//!
//! println!("screen is {}", watch.current_state());
//!
//! let subscription = watch.observe_state_changes(|state| {
//!     println!("screen is now {state}");
//! });
//! ```

mod config;
mod error;
mod watch;

pub use config::{LockWatchConfig, DEFAULT_GROUP_ID, GROUP_DIR_ENV};
pub use error::{ConfigError, Result};
pub use watch::{LockWatch, LockWatchBuilder};

// Re-export the types callers need from the component crates
pub use lockwatch_context::{ExecutionContext, ScreenState};
pub use lockwatch_detect::{Capability, LockQuery, StateCallback, StatePoller, StateSource};
pub use lockwatch_events::{ChangeObserver, Subscription};
pub use lockwatch_marker::{MarkerFile, MarkerStore};

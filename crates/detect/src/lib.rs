//! Screen lock state resolution.
//!
//! Picks the best available signal for the current execution context:
//!
//! | Context                    | Signal                                   |
//! |----------------------------|------------------------------------------|
//! | main process (macOS)       | CGSession dictionary, `CGSSessionScreenIsLocked` |
//! | main process (iOS)         | `UIApplication.isProtectedDataAvailable` |
//! | restricted extension       | data-protected marker file               |
//! | ultra-restricted extension | none, always `Unknown`                   |
//!
//! Every failure resolves to a [`ScreenState`]; nothing here returns an error.

mod capability;
mod poller;
mod query;
mod resolver;
mod session;

pub mod platform;

pub use capability::Capability;
pub use poller::{StateCallback, StatePoller, StateSource, DEFAULT_POLL_INTERVAL};
pub use query::{FixedQuery, LockQuery};
pub use resolver::StateResolver;
pub use session::{protected_data_verdict, session_verdict, SessionSnapshot, SESSION_LOCKED_KEY};

pub use lockwatch_context::ScreenState;

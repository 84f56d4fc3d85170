//! Lock/unlock transition notifications.
//!
//! [`ChangeObserver::observe`] registers one listener per transition
//! direction on a [`NotificationCenter`] and hands back a [`Subscription`]
//! that owns both registrations. Dropping the subscription unregisters them.
//!
//! # Example
//!
//! ```ignore
//! use lockwatch_events::ChangeObserver;
//!
//! let observer = ChangeObserver::platform();
//! let subscription = observer.observe(|state| println!("screen {state}"));
//! // ... keep `subscription` alive for as long as you want events
//! subscription.release();
//! ```

mod center;
mod observer;
mod subscription;

pub mod platform;

pub use center::{
    InMemoryNotificationCenter, NotificationCenter, NotificationCenterRef, NotificationHandler,
    ObserverToken,
};
pub use observer::{ChangeObserver, TransitionNames, DESKTOP_TRANSITIONS, MOBILE_TRANSITIONS};
pub use subscription::Subscription;

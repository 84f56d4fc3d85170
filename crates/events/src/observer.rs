//! Change observer - maps transition notifications to screen states.

use crate::center::{NotificationCenterRef, NotificationHandler};
use crate::subscription::Subscription;
use lockwatch_context::ScreenState;
use std::sync::Arc;

/// Notification names for the two transition directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionNames {
    pub locked: &'static str,
    pub unlocked: &'static str,
}

/// Distributed notifications posted by macOS loginwindow.
pub const DESKTOP_TRANSITIONS: TransitionNames = TransitionNames {
    locked: "com.apple.screenIsLocked",
    unlocked: "com.apple.screenIsUnlocked",
};

/// UIKit protected-data notifications on iOS.
pub const MOBILE_TRANSITIONS: TransitionNames = TransitionNames {
    locked: "UIApplicationProtectedDataWillBecomeUnavailable",
    unlocked: "UIApplicationProtectedDataDidBecomeAvailable",
};

/// Subscribes to lock/unlock transitions on a notification center.
#[derive(Clone)]
pub struct ChangeObserver {
    center: NotificationCenterRef,
    names: TransitionNames,
}

impl ChangeObserver {
    pub fn new(center: NotificationCenterRef, names: TransitionNames) -> Self {
        Self { center, names }
    }

    /// Observer on this platform's OS notification bus.
    pub fn platform() -> Self {
        Self::new(
            crate::platform::platform_center(),
            crate::platform::PLATFORM_TRANSITIONS,
        )
    }

    pub fn names(&self) -> TransitionNames {
        self.names
    }

    /// Call `handler` with `Locked` or `Unlocked` on every transition.
    ///
    /// Registers exactly one listener per direction. Events are neither
    /// deduplicated nor reordered. Keep the returned subscription alive to
    /// keep observing.
    pub fn observe<F>(&self, handler: F) -> Subscription
    where
        F: Fn(ScreenState) + Send + Sync + 'static,
    {
        let handler = Arc::new(handler);
        let mut registrations = Vec::with_capacity(2);

        for (name, state) in [
            (self.names.locked, ScreenState::Locked),
            (self.names.unlocked, ScreenState::Unlocked),
        ] {
            let handler = Arc::clone(&handler);
            let listener: NotificationHandler = Arc::new(move || handler(state));

            match self.center.add_observer(name, listener) {
                Some(token) => registrations.push((Arc::clone(&self.center), token)),
                None => tracing::warn!(name, "failed to register lock observer"),
            }
        }

        tracing::debug!(count = registrations.len(), "registered lock observers");
        Subscription::new(registrations)
    }
}

impl std::fmt::Debug for ChangeObserver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeObserver")
            .field("names", &self.names)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::center::InMemoryNotificationCenter;
    use std::sync::Mutex;

    fn observer() -> (Arc<InMemoryNotificationCenter>, ChangeObserver) {
        let center = Arc::new(InMemoryNotificationCenter::new());
        let observer = ChangeObserver::new(center.clone(), DESKTOP_TRANSITIONS);
        (center, observer)
    }

    #[test]
    fn test_registers_one_listener_per_direction() {
        let (center, observer) = observer();
        let subscription = observer.observe(|_| {});

        assert_eq!(subscription.registration_count(), 2);
        assert_eq!(center.observer_count_for(DESKTOP_TRANSITIONS.locked), 1);
        assert_eq!(center.observer_count_for(DESKTOP_TRANSITIONS.unlocked), 1);
    }

    #[test]
    fn test_maps_names_to_states() {
        let (center, observer) = observer();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = Arc::clone(&seen);
        let _subscription = observer.observe(move |state| seen_clone.lock().unwrap().push(state));

        center.post(DESKTOP_TRANSITIONS.locked);
        center.post(DESKTOP_TRANSITIONS.unlocked);
        center.post(DESKTOP_TRANSITIONS.unlocked);

        assert_eq!(
            *seen.lock().unwrap(),
            vec![ScreenState::Locked, ScreenState::Unlocked, ScreenState::Unlocked]
        );
    }

    #[test]
    fn test_mobile_names() {
        let center = Arc::new(InMemoryNotificationCenter::new());
        let observer = ChangeObserver::new(center.clone(), MOBILE_TRANSITIONS);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = Arc::clone(&seen);
        let _subscription = observer.observe(move |state| seen_clone.lock().unwrap().push(state));

        center.post("UIApplicationProtectedDataWillBecomeUnavailable");
        assert_eq!(*seen.lock().unwrap(), vec![ScreenState::Locked]);
    }
}

//! Notification center abstraction.
//!
//! Decouples the observer from the OS notification machinery, enabling:
//! - Unit testing without a run loop
//! - Platforms with no lock notifications at all

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

/// Handler invoked when a named notification is delivered.
pub type NotificationHandler = Arc<dyn Fn() + Send + Sync + 'static>;

/// Opaque identifier of one observer registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverToken(pub(crate) u64);

impl ObserverToken {
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// A bus carrying named notifications.
pub trait NotificationCenter: Send + Sync {
    /// Register `handler` for notifications called `name`.
    ///
    /// Returns `None` if the registration could not be made.
    fn add_observer(&self, name: &str, handler: NotificationHandler) -> Option<ObserverToken>;

    /// Remove a registration. Unknown tokens are ignored.
    fn remove_observer(&self, token: ObserverToken);
}

/// Type alias for shared notification center reference.
pub type NotificationCenterRef = Arc<dyn NotificationCenter>;

struct Registration {
    token: ObserverToken,
    name: String,
    handler: NotificationHandler,
}

/// In-process notification center.
///
/// Notifications are delivered synchronously on the thread that calls
/// [`post`](Self::post). Used in tests and on platforms without an OS bus.
#[derive(Default)]
pub struct InMemoryNotificationCenter {
    registrations: Mutex<Vec<Registration>>,
    next_id: AtomicU64,
}

impl InMemoryNotificationCenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver `name` to every matching observer. Returns how many ran.
    pub fn post(&self, name: &str) -> usize {
        // Handlers run outside the lock so they may (un)register observers
        let handlers: Vec<NotificationHandler> = match self.registrations.lock() {
            Ok(guard) => guard
                .iter()
                .filter(|r| r.name == name)
                .map(|r| Arc::clone(&r.handler))
                .collect(),
            Err(_) => return 0,
        };

        for handler in &handlers {
            handler();
        }
        handlers.len()
    }

    /// Number of live registrations.
    pub fn observer_count(&self) -> usize {
        self.registrations.lock().map(|g| g.len()).unwrap_or(0)
    }

    pub fn observer_count_for(&self, name: &str) -> usize {
        self.registrations
            .lock()
            .map(|g| g.iter().filter(|r| r.name == name).count())
            .unwrap_or(0)
    }
}

impl NotificationCenter for InMemoryNotificationCenter {
    fn add_observer(&self, name: &str, handler: NotificationHandler) -> Option<ObserverToken> {
        let token = ObserverToken(self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        let mut guard = self.registrations.lock().ok()?;
        guard.push(Registration {
            token,
            name: name.to_string(),
            handler,
        });
        Some(token)
    }

    fn remove_observer(&self, token: ObserverToken) {
        if let Ok(mut guard) = self.registrations.lock() {
            guard.retain(|r| r.token != token);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn test_post_reaches_matching_observers() {
        let center = InMemoryNotificationCenter::new();
        let hits = Arc::new(AtomicUsize::new(0));

        let hits_clone = Arc::clone(&hits);
        center.add_observer(
            "a",
            Arc::new(move || {
                hits_clone.fetch_add(1, Ordering::SeqCst);
            }),
        );
        center.add_observer("b", Arc::new(|| {}));

        assert_eq!(center.post("a"), 1);
        assert_eq!(center.post("missing"), 0);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(center.observer_count(), 2);
        assert_eq!(center.observer_count_for("b"), 1);
    }

    #[test]
    fn test_remove_observer() {
        let center = InMemoryNotificationCenter::new();
        let token = center.add_observer("a", Arc::new(|| {})).unwrap();

        center.remove_observer(token);
        center.remove_observer(token);
        assert_eq!(center.observer_count(), 0);
        assert_eq!(center.post("a"), 0);
    }

    #[test]
    fn test_tokens_are_unique() {
        let center = InMemoryNotificationCenter::new();
        let a = center.add_observer("a", Arc::new(|| {})).unwrap();
        let b = center.add_observer("a", Arc::new(|| {})).unwrap();
        assert_ne!(a, b);
    }
}

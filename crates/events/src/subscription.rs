//! RAII handle over observer registrations.

use crate::center::{NotificationCenterRef, ObserverToken};
use std::sync::Mutex;

/// Owns zero or more observer registrations.
///
/// [`release`](Self::release) unregisters everything and is idempotent.
/// Dropping the subscription releases it, so registrations never leak.
pub struct Subscription {
    registrations: Mutex<Vec<(NotificationCenterRef, ObserverToken)>>,
}

impl Subscription {
    pub(crate) fn new(registrations: Vec<(NotificationCenterRef, ObserverToken)>) -> Self {
        Self {
            registrations: Mutex::new(registrations),
        }
    }

    /// A subscription that observes nothing.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Unregister all observers. Later calls do nothing.
    pub fn release(&self) {
        let registrations = match self.registrations.lock() {
            Ok(mut guard) => std::mem::take(&mut *guard),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        };

        if registrations.is_empty() {
            return;
        }

        for (center, token) in &registrations {
            center.remove_observer(*token);
        }
        tracing::debug!(count = registrations.len(), "released lock observers");
    }

    /// Whether any registration is still live.
    pub fn is_active(&self) -> bool {
        self.registration_count() > 0
    }

    pub fn registration_count(&self) -> usize {
        match self.registrations.lock() {
            Ok(guard) => guard.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("registrations", &self.registration_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::center::{InMemoryNotificationCenter, NotificationCenter};
    use std::sync::Arc;

    #[test]
    fn test_empty_subscription() {
        let subscription = Subscription::empty();
        assert!(!subscription.is_active());
        subscription.release();
    }

    #[test]
    fn test_release_is_idempotent() {
        let center = Arc::new(InMemoryNotificationCenter::new());
        let token = center.add_observer("a", Arc::new(|| {})).unwrap();
        let subscription =
            Subscription::new(vec![(center.clone() as NotificationCenterRef, token)]);

        assert!(subscription.is_active());
        subscription.release();
        subscription.release();
        subscription.release();
        assert!(!subscription.is_active());
        assert_eq!(center.observer_count(), 0);
    }

    #[test]
    fn test_drop_releases() {
        let center = Arc::new(InMemoryNotificationCenter::new());
        let token = center.add_observer("a", Arc::new(|| {})).unwrap();
        let subscription =
            Subscription::new(vec![(center.clone() as NotificationCenterRef, token)]);

        drop(subscription);
        assert_eq!(center.observer_count(), 0);
    }

    #[test]
    fn test_drop_after_release() {
        let center = Arc::new(InMemoryNotificationCenter::new());
        let token = center.add_observer("a", Arc::new(|| {})).unwrap();
        let subscription =
            Subscription::new(vec![(center.clone() as NotificationCenterRef, token)]);

        subscription.release();
        drop(subscription);
        assert_eq!(center.observer_count(), 0);
    }
}

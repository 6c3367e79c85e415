//! In-process publish/subscribe for session notifications.
//!
//! Multiple independent surfaces (profile screen, order history, cart) need
//! to learn about logout without polling the session. Subscribers are
//! invoked synchronously, in registration order, and are identified by the
//! `Subscription` handle returned at registration time.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

/// Events broadcast between session components. Only logout exists today;
/// subscribers re-derive any state they need, there is no payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionEvent {
    Logout,
}

/// Handle identifying a registered callback, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subscription(u64);

type Callback = Arc<dyn Fn() + Send + Sync>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    subscribers: HashMap<SessionEvent, Vec<(u64, Callback)>>,
}

/// Process-local event fan-out.
///
/// `publish` snapshots the subscriber list before invoking anything, so an
/// unsubscribe that happens during delivery takes effect on the next publish
/// rather than the one in flight. A panicking subscriber propagates to the
/// publisher; the registry itself survives and later publishes still
/// deliver.
#[derive(Default)]
pub struct EventBus {
    registry: Mutex<Registry>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Registry> {
        // Recover from poisoning left behind by a panicking subscriber
        self.registry
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Register a callback for `event`. Duplicate registrations are allowed
    /// and each copy is invoked once per publish.
    pub fn subscribe(
        &self,
        event: SessionEvent,
        callback: impl Fn() + Send + Sync + 'static,
    ) -> Subscription {
        let mut registry = self.lock();
        let id = registry.next_id;
        registry.next_id += 1;
        registry
            .subscribers
            .entry(event)
            .or_default()
            .push((id, Arc::new(callback)));
        Subscription(id)
    }

    /// Remove a previously registered callback. Unknown handles are ignored.
    pub fn unsubscribe(&self, event: SessionEvent, subscription: Subscription) {
        let mut registry = self.lock();
        if let Some(entries) = registry.subscribers.get_mut(&event) {
            entries.retain(|(id, _)| *id != subscription.0);
        }
    }

    /// Synchronously invoke every subscriber of `event` in registration
    /// order. Blocks until each callback has returned.
    pub fn publish(&self, event: SessionEvent) {
        let snapshot: Vec<Callback> = {
            let registry = self.lock();
            registry
                .subscribers
                .get(&event)
                .map(|entries| entries.iter().map(|(_, cb)| Arc::clone(cb)).collect())
                .unwrap_or_default()
        };
        for callback in snapshot {
            callback();
        }
    }

    pub fn subscriber_count(&self, event: SessionEvent) -> usize {
        self.lock()
            .subscribers
            .get(&event)
            .map_or(0, |entries| entries.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn publish_invokes_subscribers_in_registration_order() {
        let bus = EventBus::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        for label in ["first", "second", "third"] {
            let order = Arc::clone(&order);
            bus.subscribe(SessionEvent::Logout, move || {
                order.lock().unwrap().push(label);
            });
        }

        bus.publish(SessionEvent::Logout);

        assert_eq!(*order.lock().unwrap(), vec!["first", "second", "third"]);
    }

    #[test]
    fn duplicate_registrations_are_each_invoked() {
        let bus = EventBus::new();
        let count = Arc::new(Mutex::new(0));

        for _ in 0..2 {
            let count = Arc::clone(&count);
            bus.subscribe(SessionEvent::Logout, move || {
                *count.lock().unwrap() += 1;
            });
        }

        bus.publish(SessionEvent::Logout);

        assert_eq!(*count.lock().unwrap(), 2);
    }

    #[test]
    fn unsubscribe_stops_future_delivery() {
        let bus = EventBus::new();
        let count = Arc::new(Mutex::new(0));

        let observed = Arc::clone(&count);
        let subscription = bus.subscribe(SessionEvent::Logout, move || {
            *observed.lock().unwrap() += 1;
        });

        bus.publish(SessionEvent::Logout);
        bus.unsubscribe(SessionEvent::Logout, subscription);
        bus.publish(SessionEvent::Logout);

        assert_eq!(*count.lock().unwrap(), 1);
    }

    #[test]
    fn unsubscribe_of_unknown_handle_is_noop() {
        let bus = EventBus::new();
        bus.unsubscribe(SessionEvent::Logout, Subscription(999));
        assert_eq!(bus.subscriber_count(SessionEvent::Logout), 0);
    }

    #[test]
    fn unsubscribe_during_publish_does_not_affect_in_flight_delivery() {
        let bus = Arc::new(EventBus::new());
        let count = Arc::new(Mutex::new(0));

        // The first subscriber unsubscribes the second mid-publish; the
        // second must still run this round because delivery uses a snapshot.
        let bus_ref = Arc::clone(&bus);
        let slot: Arc<Mutex<Option<Subscription>>> = Arc::new(Mutex::new(None));
        let slot_ref = Arc::clone(&slot);
        bus.subscribe(SessionEvent::Logout, move || {
            if let Some(target) = *slot_ref.lock().unwrap() {
                bus_ref.unsubscribe(SessionEvent::Logout, target);
            }
        });
        let observed = Arc::clone(&count);
        let counter = bus.subscribe(SessionEvent::Logout, move || {
            *observed.lock().unwrap() += 1;
        });
        *slot.lock().unwrap() = Some(counter);

        bus.publish(SessionEvent::Logout);
        assert_eq!(*count.lock().unwrap(), 1, "snapshot keeps in-flight delivery");

        bus.publish(SessionEvent::Logout);
        assert_eq!(*count.lock().unwrap(), 1, "unsubscribe applies to later publishes");
    }
}

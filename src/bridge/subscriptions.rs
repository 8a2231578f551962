//! Field-change subscription registry
//!
//! A plain mapping from host field to an ordered list of callbacks. The host
//! broadcasts a mapping of changed fields; the registry fires the callbacks
//! registered for exactly those fields, in registration order, and nothing
//! else. Teardown is per subscription: dropping the [`Subscription`] guard
//! removes the callback with no further invocations.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Weak};

use serde_json::Value;

use super::host::HostField;

type FieldCallback = Arc<dyn Fn(&Value) + Send + Sync>;

struct FieldListener {
    id: u64,
    callback: FieldCallback,
}

/// Registry of per-field change listeners.
#[derive(Default)]
pub struct SubscriptionRegistry {
    listeners: Mutex<HashMap<HostField, Vec<FieldListener>>>,
    next_id: AtomicU64,
}

impl SubscriptionRegistry {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Registers a callback for one field and returns its teardown guard.
    pub fn subscribe<F>(self: &Arc<Self>, field: HostField, callback: F) -> Subscription
    where
        F: Fn(&Value) + Send + Sync + 'static,
    {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.listeners
            .lock()
            .unwrap()
            .entry(field)
            .or_default()
            .push(FieldListener {
                id,
                callback: Arc::new(callback),
            });

        Subscription {
            registry: Arc::downgrade(self),
            field,
            id,
        }
    }

    /// Fires every callback registered for `field`, in registration order.
    ///
    /// Callbacks run outside the registry lock, so a callback is free to
    /// drop its own (or another) subscription.
    pub fn notify(&self, field: HostField, value: &Value) {
        let callbacks: Vec<FieldCallback> = {
            let listeners = self.listeners.lock().unwrap();
            listeners
                .get(&field)
                .map(|entries| entries.iter().map(|l| Arc::clone(&l.callback)).collect())
                .unwrap_or_default()
        };

        for callback in callbacks {
            callback(value);
        }
    }

    fn unsubscribe(&self, field: HostField, id: u64) {
        let mut listeners = self.listeners.lock().unwrap();
        if let Some(entries) = listeners.get_mut(&field) {
            entries.retain(|l| l.id != id);
            if entries.is_empty() {
                listeners.remove(&field);
            }
        }
    }

    #[cfg(test)]
    fn listener_count(&self, field: HostField) -> usize {
        self.listeners
            .lock()
            .unwrap()
            .get(&field)
            .map_or(0, Vec::len)
    }
}

/// Teardown guard for one registered callback.
///
/// Dropping the guard removes the listener; after that the callback is never
/// invoked again. Holds only a weak registry reference, so an outliving
/// guard does not keep the registry alive.
pub struct Subscription {
    registry: Weak<SubscriptionRegistry>,
    field: HostField,
    id: u64,
}

impl Subscription {
    /// The field this subscription listens on.
    pub fn field(&self) -> HostField {
        self.field
    }

    /// Explicit teardown; equivalent to dropping the guard.
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.unsubscribe(self.field, self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::AtomicUsize;

    fn counter_callback(counter: &Arc<AtomicUsize>) -> impl Fn(&Value) + Send + Sync {
        let counter = Arc::clone(counter);
        move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn notify_only_fires_matching_field() {
        let registry = SubscriptionRegistry::new();
        let theme_calls = Arc::new(AtomicUsize::new(0));
        let _sub = registry.subscribe(HostField::Theme, counter_callback(&theme_calls));

        registry.notify(HostField::DisplayMode, &json!("fullscreen"));
        assert_eq!(theme_calls.load(Ordering::SeqCst), 0);

        registry.notify(HostField::Theme, &json!("dark"));
        assert_eq!(theme_calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn callbacks_fire_in_registration_order() {
        let registry = SubscriptionRegistry::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        let _subs: Vec<_> = (0..3)
            .map(|n| {
                let order = Arc::clone(&order);
                registry.subscribe(HostField::Locale, move |_| {
                    order.lock().unwrap().push(n);
                })
            })
            .collect();

        registry.notify(HostField::Locale, &json!("en"));
        assert_eq!(*order.lock().unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn dropped_subscription_receives_nothing() {
        let registry = SubscriptionRegistry::new();
        let calls = Arc::new(AtomicUsize::new(0));

        let sub = registry.subscribe(HostField::Theme, counter_callback(&calls));
        registry.notify(HostField::Theme, &json!("dark"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        drop(sub);
        registry.notify(HostField::Theme, &json!("light"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(registry.listener_count(HostField::Theme), 0);
    }

    #[test]
    fn explicit_unsubscribe_matches_drop() {
        let registry = SubscriptionRegistry::new();
        let calls = Arc::new(AtomicUsize::new(0));

        let sub = registry.subscribe(HostField::WidgetState, counter_callback(&calls));
        sub.unsubscribe();

        registry.notify(HostField::WidgetState, &json!([1, 2, 3]));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn callback_may_drop_its_own_subscription() {
        let registry = SubscriptionRegistry::new();
        let slot: Arc<Mutex<Option<Subscription>>> = Arc::new(Mutex::new(None));
        let calls = Arc::new(AtomicUsize::new(0));

        let sub = {
            let slot = Arc::clone(&slot);
            let calls = Arc::clone(&calls);
            registry.subscribe(HostField::Theme, move |_| {
                calls.fetch_add(1, Ordering::SeqCst);
                // One-shot: tear down from inside the callback.
                slot.lock().unwrap().take();
            })
        };
        *slot.lock().unwrap() = Some(sub);

        registry.notify(HostField::Theme, &json!("dark"));
        registry.notify(HostField::Theme, &json!("light"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}

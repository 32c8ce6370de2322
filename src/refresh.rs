//! Page-refresh bus.
//!
//! The old dashboard let a parent trigger a child's reload through a global
//! slot (`window.refreshPage = load`). Here that becomes an explicit object
//! the presentation layer passes by reference: screens subscribe their
//! reload callback under a key, and whoever saved an edit triggers the key.

use std::sync::{Arc, Mutex};

use tracing::{debug, warn};

type Callback = Arc<dyn Fn() + Send + Sync>;

struct Subscriber {
    id: SubscriptionId,
    key: String,
    callback: Callback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

#[derive(Default)]
pub struct RefreshBus {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    next_id: u64,
    subscribers: Vec<Subscriber>,
}

impl RefreshBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a reload callback under a screen key ("payouts",
    /// "vacations", ...). The returned id unsubscribes the callback when the
    /// screen unmounts.
    pub fn subscribe<F>(&self, key: impl Into<String>, callback: F) -> SubscriptionId
    where
        F: Fn() + Send + Sync + 'static,
    {
        let mut inner = match self.inner.lock() {
            Ok(inner) => inner,
            Err(poisoned) => poisoned.into_inner(),
        };
        inner.next_id += 1;
        let id = SubscriptionId(inner.next_id);
        inner.subscribers.push(Subscriber {
            id,
            key: key.into(),
            callback: Arc::new(callback),
        });
        id
    }

    /// Returns false when the id was already gone.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut inner = match self.inner.lock() {
            Ok(inner) => inner,
            Err(poisoned) => poisoned.into_inner(),
        };
        let before = inner.subscribers.len();
        inner.subscribers.retain(|s| s.id != id);
        inner.subscribers.len() != before
    }

    /// Invoke every callback registered under `key`; returns how many ran.
    pub fn trigger(&self, key: &str) -> usize {
        let callbacks = self.callbacks_for(Some(key));
        debug!(key, count = callbacks.len(), "refresh triggered");
        for callback in &callbacks {
            callback();
        }
        callbacks.len()
    }

    /// Invoke every registered callback regardless of key.
    pub fn trigger_all(&self) -> usize {
        let callbacks = self.callbacks_for(None);
        debug!(count = callbacks.len(), "full refresh triggered");
        for callback in &callbacks {
            callback();
        }
        callbacks.len()
    }

    // Callbacks are cloned out before invocation so a callback may itself
    // subscribe or trigger without deadlocking on the bus lock.
    fn callbacks_for(&self, key: Option<&str>) -> Vec<Callback> {
        let inner = match self.inner.lock() {
            Ok(inner) => inner,
            Err(poisoned) => {
                warn!("refresh bus lock poisoned; recovering subscriber list");
                poisoned.into_inner()
            }
        };
        inner
            .subscribers
            .iter()
            .filter(|s| key.map_or(true, |k| s.key == k))
            .map(|s| Arc::clone(&s.callback))
            .collect()
    }
}

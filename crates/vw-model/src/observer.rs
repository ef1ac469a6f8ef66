//! Observer registration for the reactive stores
//!
//! Stores own a [`Subscribers`] list and call [`Subscribers::notify`] after each
//! mutation. Callbacks run synchronously on the mutating thread.

use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;

type Callback<E> = Arc<dyn Fn(&E) + Send + Sync>;

/// Handle returned by [`Subscribers::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Registered observers for events of type `E`
pub struct Subscribers<E> {
    inner: Mutex<Registry<E>>,
}

struct Registry<E> {
    next_id: u64,
    callbacks: Vec<(SubscriptionId, Callback<E>)>,
}

impl<E> Subscribers<E> {
    /// Create empty observer list
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Registry {
                next_id: 0,
                callbacks: Vec::new(),
            }),
        }
    }

    /// Register a callback
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        let mut registry = self.inner.lock();
        let id = SubscriptionId(registry.next_id);
        registry.next_id += 1;
        registry.callbacks.push((id, Arc::new(callback)));
        id
    }

    /// Remove a callback; returns whether it was registered
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut registry = self.inner.lock();
        let before = registry.callbacks.len();
        registry.callbacks.retain(|(sid, _)| *sid != id);
        registry.callbacks.len() != before
    }

    /// Deliver an event to every callback in registration order
    pub fn notify(&self, event: &E) {
        // snapshot so callbacks may (un)subscribe without deadlocking
        let callbacks: Vec<Callback<E>> = self
            .inner
            .lock()
            .callbacks
            .iter()
            .map(|(_, cb)| Arc::clone(cb))
            .collect();
        for callback in callbacks {
            callback(event);
        }
    }

    /// Number of registered callbacks
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.lock().callbacks.len()
    }

    /// Whether nobody is listening
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<E> Default for Subscribers<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for Subscribers<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscribers")
            .field("len", &self.len())
            .finish()
    }
}

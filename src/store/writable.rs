//! Writable and readable value stores.

use std::sync::{Arc, Mutex};

use crate::store::listeners::{Listeners, Subscription};

struct Shared<T> {
    value: Mutex<T>,
    listeners: Listeners<T>,
}

/// A value container that notifies subscribers when it changes.
///
/// Clones share the same value and subscribers.
pub struct Writable<T> {
    shared: Arc<Shared<T>>,
}

impl<T> Clone for Writable<T> {
    fn clone(&self) -> Self {
        Self {
            shared: self.shared.clone(),
        }
    }
}

impl<T> Writable<T>
where
    T: Clone + PartialEq + Send + 'static,
{
    pub fn new(value: T) -> Self {
        Self {
            shared: Arc::new(Shared {
                value: Mutex::new(value),
                listeners: Listeners::new(),
            }),
        }
    }

    /// Current value.
    pub fn get(&self) -> T {
        self.shared.value.lock().expect("store mutex poisoned").clone()
    }

    /// Replace the value. Subscribers are only notified when the new value
    /// differs from the current one.
    pub fn set(&self, value: T) {
        {
            let mut current = self.shared.value.lock().expect("store mutex poisoned");
            if *current == value {
                return;
            }
            *current = value.clone();
        }
        self.shared.listeners.notify(&value);
    }

    /// Replace the value with `f(current)`.
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(&T) -> T,
    {
        let next = f(&self.get());
        self.set(next);
    }

    /// Call `run` with the current value now and with every later change.
    pub fn subscribe<F>(&self, run: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let current = self.get();
        run(&current);
        self.shared.listeners.add(run)
    }

    /// A read-only view of this store.
    pub fn readable(&self) -> Readable<T> {
        Readable {
            store: self.clone(),
            _upstream: Arc::new(Vec::new()),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.shared.listeners.len()
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Writable<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.shared.value.lock() {
            Ok(value) => f.debug_tuple("Writable").field(&*value).finish(),
            Err(_) => f.write_str("Writable(<poisoned>)"),
        }
    }
}

/// A read-only store.
///
/// Derived stores keep their upstream subscriptions alive for as long as
/// any clone of the readable exists.
pub struct Readable<T> {
    store: Writable<T>,
    _upstream: Arc<Vec<Subscription>>,
}

impl<T> Clone for Readable<T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            _upstream: self._upstream.clone(),
        }
    }
}

impl<T> Readable<T>
where
    T: Clone + PartialEq + Send + 'static,
{
    pub(crate) fn with_upstream(store: Writable<T>, upstream: Vec<Subscription>) -> Self {
        Self {
            store,
            _upstream: Arc::new(upstream),
        }
    }

    pub fn get(&self) -> T {
        self.store.get()
    }

    pub fn subscribe<F>(&self, run: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        self.store.subscribe(run)
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Readable<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Readable").field(&self.store).finish()
    }
}

impl<T> From<&Writable<T>> for Readable<T>
where
    T: Clone + PartialEq + Send + 'static,
{
    fn from(store: &Writable<T>) -> Self {
        store.readable()
    }
}

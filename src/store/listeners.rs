//! Listener registry and subscription guards.

use std::sync::{Arc, Mutex, Weak};

type Listener<E> = Arc<dyn Fn(&E) + Send + Sync>;

struct Registry<E> {
    next_id: u64,
    entries: Vec<(u64, Listener<E>)>,
}

/// An ordered set of callbacks notified with `&E`.
///
/// Listeners are called outside the registry lock, so a listener may
/// subscribe, unsubscribe or trigger another notification.
pub struct Listeners<E> {
    inner: Arc<Mutex<Registry<E>>>,
}

impl<E: 'static> Listeners<E> {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Registry {
                next_id: 0,
                entries: Vec::new(),
            })),
        }
    }

    /// Register a listener. It stays registered until the returned
    /// [`Subscription`] is dropped or unsubscribed.
    pub fn add<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        let id = {
            let mut registry = self.inner.lock().expect("listener registry mutex poisoned");
            let id = registry.next_id;
            registry.next_id += 1;
            registry.entries.push((id, Arc::new(listener)));
            id
        };

        let registry: Weak<Mutex<Registry<E>>> = Arc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(registry) = registry.upgrade() {
                registry
                    .lock()
                    .expect("listener registry mutex poisoned")
                    .entries
                    .retain(|(entry, _)| *entry != id);
            }
        })
    }

    /// Call every listener registered at the time of the call, in
    /// registration order.
    pub fn notify(&self, event: &E) {
        let snapshot: Vec<Listener<E>> = self
            .inner
            .lock()
            .expect("listener registry mutex poisoned")
            .entries
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();

        for listener in snapshot {
            listener(event);
        }
    }

    pub fn len(&self) -> usize {
        self.inner.lock().expect("listener registry mutex poisoned").entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<E: 'static> Default for Listeners<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> std::fmt::Debug for Listeners<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self.inner.lock().map(|r| r.entries.len()).unwrap_or_default();
        f.debug_struct("Listeners").field("count", &count).finish()
    }
}

/// A RAII guard that keeps a listener registered.
///
/// Dropping the guard unsubscribes.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    pub fn new<F>(cancel: F) -> Self
    where
        F: FnOnce() + Send + Sync + 'static,
    {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// A subscription that was never attached to anything.
    pub fn inert() -> Self {
        Self { cancel: None }
    }

    pub fn unsubscribe(mut self) {
        self.cancel();
    }

    fn cancel(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_notify_and_unsubscribe() {
        let listeners = Listeners::<u32>::new();
        let seen = Arc::new(AtomicUsize::new(0));

        let s = seen.clone();
        let sub = listeners.add(move |v| {
            s.fetch_add(*v as usize, Ordering::SeqCst);
        });
        assert_eq!(listeners.len(), 1);

        listeners.notify(&2);
        listeners.notify(&3);
        assert_eq!(seen.load(Ordering::SeqCst), 5);

        sub.unsubscribe();
        assert!(listeners.is_empty());
        listeners.notify(&10);
        assert_eq!(seen.load(Ordering::SeqCst), 5);
    }

    #[test]
    fn test_drop_unsubscribes() {
        let listeners = Listeners::<()>::new();
        {
            let _sub = listeners.add(|_| {});
            assert_eq!(listeners.len(), 1);
        }
        assert_eq!(listeners.len(), 0);
    }

    #[test]
    fn test_subscription_outlives_registry() {
        let listeners = Listeners::<()>::new();
        let sub = listeners.add(|_| {});
        drop(listeners);
        // Nothing left to detach from
        sub.unsubscribe();
    }

    #[test]
    fn test_listener_may_reenter() {
        let listeners = Arc::new(Listeners::<u32>::new());
        let inner = listeners.clone();
        let _sub = listeners.add(move |v| {
            if *v > 0 {
                inner.notify(&(v - 1));
            }
        });
        listeners.notify(&3);
    }
}

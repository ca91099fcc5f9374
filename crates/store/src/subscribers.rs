//! Change notification for the reactive store.
//!
//! Listeners are plain callbacks: they carry no payload and are expected to
//! re-read whatever they display. Delivery is synchronous, in registration
//! order, once per mutating call.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

pub type Listener = Arc<dyn Fn() + Send + Sync>;

/// Identity of one registration. Registering the same callback twice yields
/// two distinct ids.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriberId(u64);

/// Ordered registry of listeners.
#[derive(Default)]
pub struct Subscribers {
    next_id: AtomicU64,
    listeners: Mutex<Vec<(SubscriberId, Listener)>>,
}

impl Subscribers {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn subscribe<F>(self: &Arc<Self>, listener: F) -> Subscription
    where
        F: Fn() + Send + Sync + 'static,
    {
        let id = SubscriberId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.lock().push((id, Arc::new(listener)));
        Subscription {
            id,
            registry: Arc::downgrade(self),
        }
    }

    /// Invoke every registered listener.
    ///
    /// The registry lock is not held while a listener runs, so listeners may
    /// read the store, subscribe, or unsubscribe. A listener removed during
    /// this round is skipped.
    pub fn notify(&self) {
        let snapshot: Vec<(SubscriberId, Listener)> = self.lock().clone();
        for (id, listener) in snapshot {
            if self.is_registered(id) {
                listener();
            }
        }
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn is_registered(&self, id: SubscriberId) -> bool {
        self.lock().iter().any(|(sid, _)| *sid == id)
    }

    fn remove(&self, id: SubscriberId) -> bool {
        let mut listeners = self.lock();
        let before = listeners.len();
        listeners.retain(|(sid, _)| *sid != id);
        listeners.len() != before
    }

    fn lock(&self) -> MutexGuard<'_, Vec<(SubscriberId, Listener)>> {
        // Listeners never run under this lock, so a poisoned guard still holds
        // a consistent list.
        self.listeners.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl core::fmt::Debug for Subscribers {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Subscribers")
            .field("listeners", &self.len())
            .finish()
    }
}

/// Deregistration handle returned by `subscribe`.
///
/// Does not own the registry: once the store is gone, `unsubscribe` is a no-op.
#[derive(Debug)]
#[must_use = "keep the handle to unsubscribe later; dropping it leaves the listener registered"]
pub struct Subscription {
    id: SubscriberId,
    registry: Weak<Subscribers>,
}

impl Subscription {
    pub fn id(&self) -> SubscriberId {
        self.id
    }

    /// Remove exactly this registration. Returns whether it was still present.
    pub fn unsubscribe(self) -> bool {
        self.registry
            .upgrade()
            .is_some_and(|registry| registry.remove(self.id))
    }
}

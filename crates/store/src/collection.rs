//! Generic observable collection.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;

use artisanhome_core::StampClock;

use crate::query::Query;
use crate::record::Record;
use crate::subscribers::{Subscribers, Subscription};

/// Ordered, newest-first sequence of records with change notification.
///
/// Every read hands out clones; the only way to change a record is through
/// `add`, `update` or `delete`, each of which notifies subscribers exactly once
/// after the change is in place.
pub struct Collection<T: Record> {
    name: &'static str,
    records: RwLock<Vec<T>>,
    clock: Arc<StampClock>,
    subscribers: Arc<Subscribers>,
}

impl<T: Record> Collection<T> {
    pub(crate) fn new(
        name: &'static str,
        seed: Vec<T>,
        clock: Arc<StampClock>,
        subscribers: Arc<Subscribers>,
    ) -> Self {
        Self {
            name,
            records: RwLock::new(seed),
            clock,
            subscribers,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Defensive copy of the whole sequence.
    pub fn get(&self) -> Vec<T> {
        self.read().clone()
    }

    pub fn query<Q: Query<T>>(&self, query: &Q) -> Vec<T> {
        query.run(self.get())
    }

    pub fn find(&self, id: &T::Id) -> Option<T> {
        self.read().iter().find(|r| r.id() == id).cloned()
    }

    pub fn contains(&self, id: &T::Id) -> bool {
        self.read().iter().any(|r| r.id() == id)
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Create a record from `draft` and put it first.
    pub fn add(&self, draft: T::Draft) -> T {
        // Stamp under the write lock so front order matches stamp order.
        let record = {
            let mut records = self.write();
            let record = T::create(draft, self.clock.next(), Utc::now().date_naive());
            records.insert(0, record.clone());
            record
        };

        tracing::debug!(collection = self.name, id = ?record.id(), "record added");
        self.subscribers.notify();
        record
    }

    /// Merge `patch` into the record with `id`.
    ///
    /// A missing id leaves the collection untouched and reports nothing;
    /// subscribers are still notified.
    pub fn update(&self, id: &T::Id, patch: T::Patch) {
        let found = {
            let mut records = self.write();
            match records.iter_mut().find(|r| r.id() == id) {
                Some(record) => {
                    record.apply(patch);
                    true
                }
                None => false,
            }
        };

        tracing::debug!(collection = self.name, ?id, found, "record updated");
        self.subscribers.notify();
    }

    /// Remove the record with `id`, if any.
    pub fn delete(&self, id: &T::Id) {
        let removed = {
            let mut records = self.write();
            let before = records.len();
            records.retain(|r| r.id() != id);
            before - records.len()
        };

        tracing::debug!(collection = self.name, ?id, removed, "record deleted");
        self.subscribers.notify();
    }

    /// Register a listener. Notification is store-wide: it fires after a
    /// mutation of any collection sharing this store.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.subscribers.subscribe(listener)
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<T>> {
        self.records.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<T>> {
        self.records.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T: Record> core::fmt::Debug for Collection<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Collection")
            .field("name", &self.name)
            .field("len", &self.len())
            .finish()
    }
}

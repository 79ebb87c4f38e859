//! # Keyed Store
//!
//! A concurrent map from identity to record, sharded by key so unrelated keys
//! never contend. Every write publishes its committed snapshot on the store's
//! change feed while the entry is still locked, so per-key feed order equals
//! commit order.
//!
//! ## Attach Gate
//!
//! Writers hold the gate shared while they commit and publish. Subscribing
//! and clearing hold it exclusively, so a new subscriber's snapshot and its
//! live suffix meet exactly at one point with nothing in flight.

use crate::domain::errors::StoreError;
use crate::ports::{IdentityGenerator, StoreOperations, UuidGenerator};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use parking_lot::RwLock;
use shared_bus::{ChangeFeed, ChangeStream, EventFilter, EventPublisher, StoreEvent, Subscription};
use shared_types::Record;
use std::sync::Arc;
use uuid::Uuid;

/// Generic keyed store with a live change feed.
pub struct KeyedStore<R: Record> {
    entries: DashMap<R::Id, R>,
    ids: Arc<dyn IdentityGenerator<R::Id>>,
    feed: ChangeFeed<R>,
    attach_gate: RwLock<()>,
}

impl<R: Record> KeyedStore<R> {
    /// Creates an empty store.
    ///
    /// `name` labels the change feed in logs; `feed_capacity` bounds how far a
    /// subscriber may fall behind before it is disconnected.
    pub fn new(
        name: &'static str,
        ids: Arc<dyn IdentityGenerator<R::Id>>,
        feed_capacity: usize,
    ) -> Self {
        Self {
            entries: DashMap::new(),
            ids,
            feed: ChangeFeed::with_capacity(name, feed_capacity),
            attach_gate: RwLock::new(()),
        }
    }

    /// Creates an empty store that assigns random UUID identities.
    pub fn with_random_ids(name: &'static str, feed_capacity: usize) -> Self
    where
        R::Id: From<Uuid>,
    {
        Self::new(name, Arc::new(UuidGenerator), feed_capacity)
    }

    pub fn add(&self, draft: R::Draft) -> Result<R, StoreError> {
        let id = self.ids.next_id();
        let _commit = self.attach_gate.read();

        match self.entries.entry(id) {
            Entry::Occupied(_) => Err(StoreError::duplicate_key::<R>(id)),
            Entry::Vacant(slot) => {
                let record = R::from_draft(id, draft);
                let stored = slot.insert(record.clone());
                self.feed.publish(StoreEvent::Added(record.clone()));
                drop(stored);
                Ok(record)
            }
        }
    }

    pub fn get(&self, id: R::Id) -> Option<R> {
        self.entries.get(&id).map(|entry| entry.value().clone())
    }

    pub fn update(&self, value: R) -> Result<R, StoreError> {
        let id = value.id();
        let _commit = self.attach_gate.read();

        let mut entry = self
            .entries
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found::<R>(id))?;
        *entry = value.clone();
        self.feed.publish(StoreEvent::Updated(value.clone()));
        Ok(value)
    }

    /// Guarded read-modify-write of one entry.
    ///
    /// `change` receives the current stored value and either returns the
    /// replacement or rejects the write. It runs while the entry is locked,
    /// so no other write to the same key can interleave between the guard
    /// and the commit. `change` must not call back into this store.
    ///
    /// # Errors
    /// - `NotFound` (via `E: From<StoreError>`): no entry with that id
    /// - whatever `change` returns; the store is unchanged in that case
    pub fn modify<E, F>(&self, id: R::Id, change: F) -> Result<R, E>
    where
        E: From<StoreError>,
        F: FnOnce(&R) -> Result<R, E>,
    {
        let _commit = self.attach_gate.read();

        let mut entry = self
            .entries
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found::<R>(id))?;
        let next = change(entry.value())?;
        debug_assert_eq!(next.id(), id, "modify must not change the identity");

        *entry = next.clone();
        self.feed.publish(StoreEvent::Updated(next.clone()));
        Ok(next)
    }

    pub fn remove(&self, id: R::Id) -> Option<R> {
        let _commit = self.attach_gate.read();

        match self.entries.entry(id) {
            Entry::Vacant(_) => None,
            Entry::Occupied(entry) => {
                let removed = entry.remove();
                self.feed.publish(StoreEvent::Removed(removed.clone()));
                Some(removed)
            }
        }
    }

    pub fn find_all(&self) -> Vec<R> {
        self.entries
            .iter()
            .map(|entry| entry.value().clone())
            .collect()
    }

    pub fn contains(&self, id: R::Id) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn clear(&self) {
        let _exclusive = self.attach_gate.write();

        self.entries.clear();
        self.feed.publish(StoreEvent::Cleared);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Attaches a subscriber seeded with the current contents.
    pub fn subscribe(&self, filter: EventFilter) -> Subscription<R> {
        let _exclusive = self.attach_gate.write();

        let seed = self.find_all();
        self.feed.subscribe(seed, filter)
    }

    /// [`KeyedStore::subscribe`] as a [`ChangeStream`].
    pub fn stream(&self, filter: EventFilter) -> ChangeStream<R> {
        self.subscribe(filter).into_stream()
    }
}

impl<R: Record> StoreOperations<R> for KeyedStore<R> {
    fn add(&self, draft: R::Draft) -> Result<R, StoreError> {
        KeyedStore::add(self, draft)
    }

    fn get(&self, id: R::Id) -> Option<R> {
        KeyedStore::get(self, id)
    }

    fn update(&self, value: R) -> Result<R, StoreError> {
        KeyedStore::update(self, value)
    }

    fn remove(&self, id: R::Id) -> Option<R> {
        KeyedStore::remove(self, id)
    }

    fn find_all(&self) -> Vec<R> {
        KeyedStore::find_all(self)
    }

    fn contains(&self, id: R::Id) -> bool {
        KeyedStore::contains(self, id)
    }

    fn clear(&self) {
        KeyedStore::clear(self)
    }
}

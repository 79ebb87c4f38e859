//! # Change Publisher
//!
//! The publishing side of a change feed.

use crate::events::{EventFilter, StoreEvent};
use crate::subscriber::Subscription;
use crate::DEFAULT_CHANNEL_CAPACITY;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::broadcast;
use tracing::debug;

/// Trait for publishing committed changes.
///
/// Publishing is synchronous so a store can emit while it still holds the
/// lock of the entry it just wrote, which keeps per-key feed order equal to
/// commit order.
pub trait EventPublisher<V>: Send + Sync {
    /// Publish an event to every current subscriber.
    ///
    /// # Returns
    ///
    /// The number of active subscribers that received the event.
    fn publish(&self, event: StoreEvent<V>) -> usize;

    /// Get the total number of events published.
    fn events_published(&self) -> u64;
}

/// In-memory change feed for one store.
///
/// Uses `tokio::sync::broadcast` for fan-out. Each subscriber owns a cursor
/// into a bounded ring of `capacity` events.
pub struct ChangeFeed<V> {
    /// Feed name, for logs.
    name: &'static str,

    /// Broadcast sender for events.
    sender: broadcast::Sender<StoreEvent<V>>,

    /// Total events published.
    events_published: AtomicU64,

    /// Channel capacity.
    capacity: usize,
}

impl<V: Clone + Send + Sync + 'static> ChangeFeed<V> {
    /// Create a new feed with default capacity.
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self::with_capacity(name, DEFAULT_CHANNEL_CAPACITY)
    }

    /// Create a new feed with specified capacity.
    #[must_use]
    pub fn with_capacity(name: &'static str, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let (sender, _) = broadcast::channel(capacity);
        Self {
            name,
            sender,
            events_published: AtomicU64::new(0),
            capacity,
        }
    }

    /// Attach a subscriber that first yields `seed` as `Existing` events,
    /// then every event published after this call.
    ///
    /// The caller is responsible for making sure no event is published
    /// between taking `seed` and calling this method.
    #[must_use]
    pub fn subscribe(&self, seed: Vec<V>, filter: EventFilter) -> Subscription<V> {
        let receiver = self.sender.subscribe();

        debug!(
            feed = self.name,
            seed = seed.len(),
            subscribers = self.sender.receiver_count(),
            capacity = self.capacity,
            kinds = ?filter.kinds,
            "New subscription created"
        );

        Subscription::new(self.name, seed, receiver, filter)
    }

    /// Get the number of active subscribers.
    #[cfg(test)]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Get the channel capacity.
    #[cfg(test)]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl<V: Clone + Send + Sync + 'static> EventPublisher<V> for ChangeFeed<V> {
    fn publish(&self, event: StoreEvent<V>) -> usize {
        let kind = event.kind();

        self.events_published.fetch_add(1, Ordering::Relaxed);

        match self.sender.send(event) {
            Ok(receivers) => {
                debug!(feed = self.name, %kind, receivers, "Change published");
                receivers
            }
            // No subscribers attached, nothing to deliver.
            Err(_) => 0,
        }
    }

    fn events_published(&self) -> u64 {
        self.events_published.load(Ordering::Relaxed)
    }
}

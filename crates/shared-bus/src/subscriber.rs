//! # Change Subscriber
//!
//! The subscription side of a change feed: an attach-time snapshot followed
//! by the live suffix of commits, without duplicates or gaps.
//!
//! A subscriber that falls more than the feed capacity behind cannot be
//! given a gap-free view any more. Its subscription ends instead of skipping
//! events; reconnecting starts from a fresh snapshot.

use crate::events::{EventFilter, StoreEvent};
use std::collections::VecDeque;
use std::pin::Pin;
use std::task::{ready, Context, Poll};
use thiserror::Error;
use tokio::sync::broadcast;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::Stream;
use tracing::warn;

/// Errors from subscription operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubscriptionError {
    /// The feed was dropped.
    #[error("Change feed closed")]
    Closed,

    /// The subscriber fell behind and missed events.
    #[error("Subscriber lagged behind by {0} events")]
    Lagged(u64),
}

/// A subscription handle for receiving events.
///
/// Dropping it detaches the subscriber from the feed.
pub struct Subscription<V> {
    feed: &'static str,

    /// Attach-time snapshot, drained before live events.
    seed: VecDeque<V>,

    /// The broadcast receiver.
    receiver: broadcast::Receiver<StoreEvent<V>>,

    /// Filter for this subscription.
    filter: EventFilter,

    /// Set once the feed closed or the subscriber lagged.
    terminated: bool,
}

impl<V: Clone + Send + 'static> Subscription<V> {
    pub(crate) fn new(
        feed: &'static str,
        seed: Vec<V>,
        receiver: broadcast::Receiver<StoreEvent<V>>,
        filter: EventFilter,
    ) -> Self {
        let seed = if filter.accepts(crate::ChangeKind::Existing) {
            seed.into()
        } else {
            VecDeque::new()
        };
        Self {
            feed,
            seed,
            receiver,
            filter,
            terminated: false,
        }
    }

    /// Receive the next event that matches the filter.
    ///
    /// # Returns
    ///
    /// - `Some(event)` - The next matching event
    /// - `None` - The feed closed or this subscriber lagged
    pub async fn recv(&mut self) -> Option<StoreEvent<V>> {
        if let Some(value) = self.seed.pop_front() {
            return Some(StoreEvent::Existing(value));
        }
        if self.terminated {
            return None;
        }
        loop {
            let event = match self.receiver.recv().await {
                Ok(e) => e,
                Err(broadcast::error::RecvError::Closed) => {
                    self.terminated = true;
                    return None;
                }
                Err(broadcast::error::RecvError::Lagged(count)) => {
                    warn!(feed = self.feed, lagged = count, "Subscriber lagged, disconnecting");
                    self.terminated = true;
                    return None;
                }
            };

            if self.filter.matches(&event) {
                return Some(event);
            }
        }
    }

    /// Try to receive the next event without blocking.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(event))` - An event was available and matched
    /// - `Ok(None)` - No event available (would block)
    /// - `Err(_)` - The feed closed or this subscriber lagged
    pub fn try_recv(&mut self) -> Result<Option<StoreEvent<V>>, SubscriptionError> {
        if let Some(value) = self.seed.pop_front() {
            return Ok(Some(StoreEvent::Existing(value)));
        }
        if self.terminated {
            return Err(SubscriptionError::Closed);
        }
        loop {
            let event = match self.receiver.try_recv() {
                Ok(e) => e,
                Err(broadcast::error::TryRecvError::Empty) => return Ok(None),
                Err(broadcast::error::TryRecvError::Closed) => {
                    self.terminated = true;
                    return Err(SubscriptionError::Closed);
                }
                Err(broadcast::error::TryRecvError::Lagged(count)) => {
                    warn!(feed = self.feed, lagged = count, "Subscriber lagged, disconnecting");
                    self.terminated = true;
                    return Err(SubscriptionError::Lagged(count));
                }
            };

            if self.filter.matches(&event) {
                return Ok(Some(event));
            }
        }
    }

    /// Convert into a [`Stream`].
    #[must_use]
    pub fn into_stream(self) -> ChangeStream<V> {
        ChangeStream::new(self)
    }
}

/// A stream wrapper for subscriptions.
///
/// Implements `tokio_stream::Stream` for use with stream combinators and
/// server-sent event responses.
pub struct ChangeStream<V> {
    feed: &'static str,
    seed: VecDeque<V>,
    live: BroadcastStream<StoreEvent<V>>,
    filter: EventFilter,
    terminated: bool,
}

impl<V: Clone + Send + 'static> ChangeStream<V> {
    /// Create a new change stream from a subscription.
    #[must_use]
    pub fn new(subscription: Subscription<V>) -> Self {
        Self {
            feed: subscription.feed,
            seed: subscription.seed,
            live: BroadcastStream::new(subscription.receiver),
            filter: subscription.filter,
            terminated: subscription.terminated,
        }
    }
}

// No field is structurally pinned.
impl<V> Unpin for ChangeStream<V> {}

impl<V: Clone + Send + 'static> Stream for ChangeStream<V> {
    type Item = StoreEvent<V>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();

        if let Some(value) = this.seed.pop_front() {
            return Poll::Ready(Some(StoreEvent::Existing(value)));
        }
        if this.terminated {
            return Poll::Ready(None);
        }

        loop {
            match ready!(Pin::new(&mut this.live).poll_next(cx)) {
                Some(Ok(event)) => {
                    if this.filter.matches(&event) {
                        return Poll::Ready(Some(event));
                    }
                }
                Some(Err(BroadcastStreamRecvError::Lagged(count))) => {
                    warn!(feed = this.feed, lagged = count, "Subscriber lagged, disconnecting");
                    this.terminated = true;
                    return Poll::Ready(None);
                }
                None => {
                    this.terminated = true;
                    return Poll::Ready(None);
                }
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.terminated {
            (self.seed.len(), Some(self.seed.len()))
        } else {
            (self.seed.len(), None)
        }
    }
}

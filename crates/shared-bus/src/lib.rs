//! # Shared Bus - Change Feeds for Keyed Stores
//!
//! Every store that exposes a live view owns one [`ChangeFeed`]. Each
//! committed write is published as a value snapshot, and subscribers receive
//! an attach-time snapshot followed by the live suffix of commits.
//!
//! ## Delivery Model
//!
//! ```text
//!   writer ──commit──► KeyedStore ──publish()──► ChangeFeed (broadcast ring)
//!                          │                        │        │
//!                 findAll() at attach          ┌────┘        └────┐
//!                          │                   ▼                  ▼
//!                          └──seed──►   Subscription A     Subscription B
//!                                      Existing.. Added..  Existing.. Removed..
//! ```
//!
//! ## Guarantees
//!
//! - **No duplicates, no gaps:** the seed and the live suffix meet exactly at
//!   the attach point, provided the store attaches while no write is in
//!   flight.
//! - **Commit order:** events for one key arrive in the order they committed.
//! - **Bounded memory:** a subscriber more than `capacity` events behind is
//!   disconnected rather than served a view with holes.

// Nursery lints that are too strict
#![allow(clippy::missing_const_for_fn)]
// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod events;
pub mod publisher;
pub mod subscriber;

// Re-export main types
pub use events::{ChangeKind, EventFilter, StoreEvent};
pub use publisher::{ChangeFeed, EventPublisher};
pub use subscriber::{ChangeStream, Subscription, SubscriptionError};

/// Maximum events to buffer per subscriber before it is disconnected.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1000;

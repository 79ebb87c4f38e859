//! # Keyed Store Subsystem
//!
//! **Subsystem ID:** 1
//!
//! ## Purpose
//!
//! Generic, process-wide, concurrency-safe map from identity to record. Backs
//! both the rocket registry and the launch audit log.
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement Location |
//! |-----------|---------------------|
//! | Ids returned by `add` are pairwise distinct | `ports/outbound.rs` - `UuidGenerator` |
//! | `add` never overwrites | `domain/store.rs` - `Entry::Occupied` → `DuplicateKey` |
//! | `update` on an absent id changes nothing | `domain/store.rs` - `get_mut` → `NotFound` |
//! | Per-key writes are linearizable | `domain/store.rs` - writes run under the shard lock |
//! | Feed seed + live suffix have no duplicate and no gap | `domain/store.rs` - attach gate |
//!
//! ## Operations
//!
//! | Operation | Fails with | Feed event |
//! |-----------|------------|------------|
//! | `add(draft)` | `DuplicateKey` | `Added` |
//! | `get(id)` | never | - |
//! | `update(value)` | `NotFound` | `Updated` |
//! | `modify(id, f)` | `NotFound`, or the guard's error | `Updated` |
//! | `remove(id)` | never | `Removed` |
//! | `find_all()` | never | - |
//! | `contains(id)` | never | - |
//! | `clear()` | never | `Cleared` |
//! | `subscribe(filter)` | never | seeds `Existing` |
//!
//! ## Module Structure (Hexagonal Architecture)
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  ports/inbound.rs  - StoreOperations trait                      │
//! │  ports/outbound.rs - IdentityGenerator, UuidGenerator           │
//! └─────────────────────────────────────────────────────────────────┘
//!                          ↑ uses ↑
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  domain/store.rs  - KeyedStore (DashMap + ChangeFeed)           │
//! │  domain/errors.rs - StoreError                                  │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod domain;
pub mod ports;

pub use domain::{KeyedStore, StoreError};
pub use ports::{IdentityGenerator, StoreOperations, UuidGenerator};

#[cfg(any(test, feature = "test-utils"))]
pub use ports::ScriptedIdGenerator;

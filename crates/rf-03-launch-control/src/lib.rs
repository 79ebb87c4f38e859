//! # Launch Control Subsystem
//!
//! **Subsystem ID:** 3
//!
//! ## Purpose
//!
//! Launches rockets. A launch flips a `READY` rocket to `LAUNCHED` in the
//! rocket store, then appends an immutable launch record, holding a copy of
//! the launched rocket and a timestamp, to the launch store.
//!
//! ## Launch Protocol
//!
//! ```text
//!  launch(rocket_id)
//!     │
//!     ├─ rocket store: modify(rocket_id) ──────────── one atomic call
//!     │     absent     → NotFound
//!     │     LAUNCHED   → AlreadyLaunched
//!     │     NOT_READY  → NotReady
//!     │     READY      → commit LAUNCHED
//!     │
//!     └─ launch store: add(snapshot, now) ─────────── retried on id collision
//!           ok         → Launch
//!           exhausted  → DuplicateKey (rocket stays LAUNCHED)
//! ```
//!
//! The flip commits before the append begins. A failed append leaves the
//! rocket `LAUNCHED` without a record; the flip is never undone because a
//! concurrent reader may already have observed it.
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement Location |
//! |-----------|---------------------|
//! | At most one record per successful launch | `service.rs` - `launch()` |
//! | No record for a rejected launch | `service.rs` - guard runs before `record()` |
//! | Exactly one of N concurrent launches wins | `KeyedStore::modify` per-key atomicity |
//! | Records are never updated or removed | no such operation on `LaunchApi` |
//!
//! ## Outbound Dependencies
//!
//! | Trait | Purpose |
//! |-------|---------|
//! | `Clock` | Launch timestamps |

// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod domain;
pub mod ports;
pub mod service;

pub use domain::{LaunchConfig, LaunchConfigError, DEFAULT_APPEND_ATTEMPTS};
pub use ports::{Clock, LaunchApi, SystemClock};
pub use service::LaunchCoordinator;

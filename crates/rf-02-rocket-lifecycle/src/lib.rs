//! # Rocket Lifecycle Subsystem
//!
//! **Subsystem ID:** 2
//!
//! ## Purpose
//!
//! The rocket registry: create, read, list, stream, update, patch and remove
//! rockets while enforcing the lifecycle policy on every generic write.
//!
//! ## Lifecycle
//!
//! ```text
//! [NOT_READY] ◄──generic update──► [READY] ──launch (rf-03)──► [LAUNCHED]
//! ```
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement Location |
//! |-----------|---------------------|
//! | Launched rockets are frozen | `domain/policy.rs` - `ensure_mutable()` |
//! | `LAUNCHED` only through a launch | `domain/policy.rs` - `ensure_settable()` |
//! | Guard and write are one atomic step | `service.rs` - `KeyedStore::modify` |
//! | Removal is not gated by status | `service.rs` - `remove()` |
//!
//! ## Errors
//!
//! | Condition | Error |
//! |-----------|-------|
//! | Unknown id | `NotFound` |
//! | Stored status is `LAUNCHED` | `AlreadyLaunched` (checked first) |
//! | Requested status is `LAUNCHED` | `IllegalTransition` |
//! | Target out of range | `Validation` |

// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod domain;
pub mod ports;
pub mod service;

pub use domain::{
    ensure_launchable, AddRocketCommand, MergeRocketCommand, PatchRocketCommand, RocketChange,
    UpdateRocketCommand,
};
pub use ports::RocketsApi;
pub use service::RocketService;

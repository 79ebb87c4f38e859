//! # Shared Types Crate
//!
//! Domain entities and the error taxonomy used by every rflux subsystem.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: the rocket and launch record shapes are
//!   defined once, here, and serialized as-is at the HTTP boundary.
//! - **New vs Existing**: a value that has not been stored yet (`NewRocket`,
//!   `NewLaunch`) is a different type from one that has (`Rocket`, `Launch`),
//!   so an identity-less value can never reach a code path that needs an id.
//! - **One Taxonomy**: every subsystem reports failures as [`ServiceError`],
//!   which carries the offending id and is classified for the boundary layer.

pub mod entities;
pub mod errors;

pub use entities::*;
pub use errors::*;

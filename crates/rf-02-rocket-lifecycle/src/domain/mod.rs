//! # Domain Layer - Rocket Lifecycle
//!
//! ## Components
//!
//! - `policy`: terminal-state guard, launch-bypass guard and launch eligibility
//! - `commands`: write commands accepted by the rocket registry

pub mod commands;
pub mod policy;

pub use commands::*;
pub use policy::*;

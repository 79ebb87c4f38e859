//! Ports layer for the Rocket Lifecycle subsystem.
//!
//! - Inbound (Driving) ports: `RocketsApi`, offered to the HTTP boundary

pub mod inbound;

pub use inbound::*;

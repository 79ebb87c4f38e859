//! Ports layer for the Keyed Store.
//!
//! - Inbound (Driving) ports: operations offered to the lifecycle and launch subsystems
//! - Outbound (Driven) ports: identity generation

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;

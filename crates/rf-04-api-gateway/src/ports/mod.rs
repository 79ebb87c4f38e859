//! Ports layer for the API gateway.
//!
//! - Outbound (Driven) ports: `StateReset`

pub mod outbound;

pub use outbound::*;

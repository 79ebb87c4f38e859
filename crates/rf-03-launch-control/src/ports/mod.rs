//! Ports layer for the Launch Control subsystem.
//!
//! - Inbound (Driving) ports: `LaunchApi`
//! - Outbound (Driven) ports: `Clock`

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;

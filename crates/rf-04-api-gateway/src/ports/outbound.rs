//! Outbound (Driven) ports for the API gateway.
//!
//! The rocket and launch APIs are consumed through their own inbound ports
//! (`RocketsApi`, `LaunchApi`); only the administrative reset is defined here.

/// Administrative reset of all stored state.
pub trait StateReset: Send + Sync {
    /// Removes every launch record and every rocket.
    fn clear_all(&self);
}

//! # Domain Layer - Launch Control
//!
//! ## Components
//!
//! - `config`: `LaunchConfig` (audit append attempts)

pub mod config;

pub use config::*;

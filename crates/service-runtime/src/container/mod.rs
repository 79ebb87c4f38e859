//! # Service Container
//!
//! Holds the stores and the services built on them, and owns the
//! configuration they were built from.

pub mod config;
pub mod services;

pub use config::{ConfigError, ServiceConfig, StoreConfig};
pub use services::ServiceContainer;

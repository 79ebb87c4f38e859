//! Domain layer of the API gateway: configuration, errors and request bodies.

pub mod config;
pub mod error;
pub mod payloads;

pub use config::*;
pub use error::*;
pub use payloads::*;

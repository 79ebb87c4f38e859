//! # Domain Layer - Keyed Store
//!
//! ## Components
//!
//! - `store`: `KeyedStore`, the id → value map with per-key linearizable writes
//! - `errors`: `StoreError` enumeration

pub mod errors;
pub mod store;

pub use errors::*;
pub use store::*;

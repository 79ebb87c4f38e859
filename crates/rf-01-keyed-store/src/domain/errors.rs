//! Error types for the Keyed Store.

use shared_types::{Record, ResourceKind, ServiceError};
use thiserror::Error;

/// Errors raised by store writes. Reads never fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// `update`/`modify` addressed an id that is not present.
    #[error("{kind} with id {id} was not found")]
    NotFound { kind: ResourceKind, id: String },

    /// `add` generated an id that is already present.
    #[error("{kind} with id {id} already exists")]
    DuplicateKey { kind: ResourceKind, id: String },
}

impl StoreError {
    pub fn not_found<R: Record>(id: R::Id) -> Self {
        Self::NotFound {
            kind: R::KIND,
            id: id.to_string(),
        }
    }

    pub fn duplicate_key<R: Record>(id: R::Id) -> Self {
        Self::DuplicateKey {
            kind: R::KIND,
            id: id.to_string(),
        }
    }
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { kind, id } => ServiceError::NotFound { kind, id },
            StoreError::DuplicateKey { kind, id } => ServiceError::DuplicateKey { kind, id },
        }
    }
}

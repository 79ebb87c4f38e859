//! # Error Types
//!
//! The failure taxonomy shared by the store, lifecycle and launch subsystems.
//! Every variant carries the offending id so the boundary layer can build a
//! user-visible response without further lookups.

use thiserror::Error;

use crate::entities::{LaunchId, ResourceKind, RocketId, Status};

/// Errors surfaced by rflux operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// No resource with the given id.
    #[error("{kind} with id {id} was not found")]
    NotFound { kind: ResourceKind, id: String },

    /// Identity collision on create. Unreachable with a correct generator.
    #[error("{kind} with id {id} already exists")]
    DuplicateKey { kind: ResourceKind, id: String },

    /// Mutation or re-launch of a rocket in the terminal state.
    #[error("Rocket with id {0} has already been launched")]
    AlreadyLaunched(RocketId),

    /// Launch of a rocket that is not `READY`.
    #[error("Rocket with id {0} is not ready for launch")]
    NotReady(RocketId),

    /// Attempt to reach the terminal state through a generic update.
    #[error("Status of rocket {id} can't be set to {requested} by an update, only by a launch")]
    IllegalTransition { id: RocketId, requested: Status },

    /// Malformed input rejected before reaching a store.
    #[error("Invalid request: {0}")]
    Validation(String),
}

/// Coarse classification used to pick a response status at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// The addressed resource does not exist.
    NotFound,
    /// The request violates a lifecycle invariant or is malformed.
    BadRequest,
    /// The request collides with existing state.
    Conflict,
}

impl ServiceError {
    pub fn rocket_not_found(id: RocketId) -> Self {
        Self::NotFound {
            kind: ResourceKind::Rocket,
            id: id.to_string(),
        }
    }

    pub fn launch_not_found(id: LaunchId) -> Self {
        Self::NotFound {
            kind: ResourceKind::LaunchRecord,
            id: id.to_string(),
        }
    }

    pub fn class(&self) -> ErrorClass {
        match self {
            Self::NotFound { .. } => ErrorClass::NotFound,
            Self::DuplicateKey { .. } => ErrorClass::Conflict,
            Self::AlreadyLaunched(_)
            | Self::NotReady(_)
            | Self::IllegalTransition { .. }
            | Self::Validation(_) => ErrorClass::BadRequest,
        }
    }
}

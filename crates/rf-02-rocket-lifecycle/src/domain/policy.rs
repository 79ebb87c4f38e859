//! # Lifecycle Policy
//!
//! State machine over a rocket's status:
//!
//! ```text
//!                generic update           launch only
//! [NOT_READY] ◄─────────────────► [READY] ──────────► [LAUNCHED] (terminal)
//! ```
//!
//! Generic updates may move freely between `NOT_READY` and `READY`, in either
//! direction. `LAUNCHED` is reached only through the launch coordinator and
//! freezes every field of the rocket.
//!
//! Guards read the *stored* status, never a client-submitted one, and run
//! inside the store's guarded write so the check and the commit are atomic.

use shared_types::{Rocket, RocketId, ServiceError, Status};

/// Rejects any write to a rocket that has reached the terminal state.
pub fn ensure_mutable(current: &Rocket) -> Result<(), ServiceError> {
    if current.status.is_terminal() {
        return Err(ServiceError::AlreadyLaunched(current.id));
    }
    Ok(())
}

/// Rejects a generic update that asks for the terminal state directly.
pub fn ensure_settable(id: RocketId, requested: Status) -> Result<(), ServiceError> {
    if requested.is_terminal() {
        return Err(ServiceError::IllegalTransition { id, requested });
    }
    Ok(())
}

/// Guard for every generic update or patch.
///
/// The stored status is checked first: a launched rocket rejects the whole
/// update whatever the payload contains.
pub fn guard_update(current: &Rocket, requested: Option<Status>) -> Result<(), ServiceError> {
    ensure_mutable(current)?;
    if let Some(status) = requested {
        ensure_settable(current.id, status)?;
    }
    Ok(())
}

/// Launch eligibility: only a `READY` rocket may be launched.
pub fn ensure_launchable(current: &Rocket) -> Result<(), ServiceError> {
    match current.status {
        Status::Ready => Ok(()),
        Status::NotReady => Err(ServiceError::NotReady(current.id)),
        Status::Launched => Err(ServiceError::AlreadyLaunched(current.id)),
    }
}

//! Inbound (Driving) ports for the Rocket Lifecycle subsystem.

use crate::domain::{AddRocketCommand, MergeRocketCommand, PatchRocketCommand, UpdateRocketCommand};
use shared_bus::ChangeStream;
use shared_types::{Rocket, RocketId, ServiceError, Status, TargetCoordinates, Warhead};

/// Rocket registry API.
///
/// Every generic write is guarded by the lifecycle policy and committed in
/// one atomic store call: a rocket that is (or concurrently becomes)
/// `LAUNCHED` is never modified.
pub trait RocketsApi: Send + Sync {
    /// Registers a new rocket in status `NOT_READY`.
    fn create(&self, command: AddRocketCommand) -> Result<Rocket, ServiceError>;

    /// # Errors
    /// - `NotFound`: no rocket with that id
    fn get(&self, id: RocketId) -> Result<Rocket, ServiceError>;

    /// Snapshot of every rocket.
    fn list(&self) -> Vec<Rocket>;

    /// Every current rocket, then every subsequent change.
    fn stream_changes(&self) -> ChangeStream<Rocket>;

    /// Replaces every mutable field.
    ///
    /// # Errors
    /// - `NotFound`: no rocket with that id
    /// - `AlreadyLaunched`: the stored rocket is launched
    /// - `IllegalTransition`: the command asks for `LAUNCHED`
    /// - `Validation`: target out of range
    fn replace(&self, id: RocketId, command: UpdateRocketCommand) -> Result<Rocket, ServiceError>;

    /// Changes exactly one field. Same errors as [`RocketsApi::replace`].
    fn patch(&self, id: RocketId, command: PatchRocketCommand) -> Result<Rocket, ServiceError>;

    /// Changes the fields present in `command`. Same errors as
    /// [`RocketsApi::replace`].
    fn merge(&self, id: RocketId, command: MergeRocketCommand) -> Result<Rocket, ServiceError>;

    /// Removes a rocket whatever its status.
    ///
    /// # Errors
    /// - `NotFound`: no rocket with that id
    fn remove(&self, id: RocketId) -> Result<Rocket, ServiceError>;

    fn patch_status(&self, id: RocketId, status: Status) -> Result<Rocket, ServiceError> {
        self.patch(id, PatchRocketCommand::SetStatus(status))
    }

    fn patch_warhead(&self, id: RocketId, warhead: Warhead) -> Result<Rocket, ServiceError> {
        self.patch(id, PatchRocketCommand::SetWarhead(warhead))
    }

    fn patch_target(
        &self,
        id: RocketId,
        target: TargetCoordinates,
    ) -> Result<Rocket, ServiceError> {
        self.patch(id, PatchRocketCommand::SetTarget(target))
    }
}

//! Inbound (Driving) ports for the Launch Control subsystem.

use shared_bus::ChangeStream;
use shared_types::{Launch, LaunchId, RocketId, ServiceError};

/// Launch API.
pub trait LaunchApi: Send + Sync {
    /// Launches a `READY` rocket and records the launch.
    ///
    /// The rocket's flip to `LAUNCHED` is committed before the launch record
    /// is appended and is never undone, even when the append fails.
    ///
    /// # Errors
    /// - `NotFound`: no rocket with that id
    /// - `AlreadyLaunched`: the rocket was launched before
    /// - `NotReady`: the rocket is `NOT_READY`
    /// - `DuplicateKey`: every append attempt collided; the rocket is
    ///   `LAUNCHED` without a record
    fn launch(&self, rocket_id: RocketId) -> Result<Launch, ServiceError>;

    /// # Errors
    /// - `NotFound`: no launch record with that id
    fn get(&self, id: LaunchId) -> Result<Launch, ServiceError>;

    /// Snapshot of every launch record.
    fn list(&self) -> Vec<Launch>;

    /// Every current launch record, then every subsequent one.
    fn stream_changes(&self) -> ChangeStream<Launch>;
}

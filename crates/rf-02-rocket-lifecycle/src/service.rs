//! Rocket registry service: the `RocketsApi` over a shared rocket store.

use crate::domain::{
    guard_update, AddRocketCommand, MergeRocketCommand, PatchRocketCommand, RocketChange,
    UpdateRocketCommand,
};
use crate::ports::RocketsApi;
use rf_01_keyed_store::KeyedStore;
use shared_bus::{ChangeStream, EventFilter};
use shared_types::{Rocket, RocketId, ServiceError};
use std::sync::Arc;

pub struct RocketService {
    store: Arc<KeyedStore<Rocket>>,
}

impl RocketService {
    pub fn new(store: Arc<KeyedStore<Rocket>>) -> Self {
        Self { store }
    }

    #[cfg(test)]
    fn store(&self) -> &Arc<KeyedStore<Rocket>> {
        &self.store
    }

    /// Guards, validates and applies the command against the current stored
    /// value in one atomic store call.
    ///
    /// Lookup and the lifecycle guard come before payload checks: an absent
    /// rocket is `NotFound` and a launched one is `AlreadyLaunched` whatever
    /// the payload holds.
    fn apply<C: RocketChange>(&self, id: RocketId, command: &C) -> Result<Rocket, ServiceError> {
        self.store.modify(id, |current| {
            guard_update(current, command.requested_status())?;
            command.validate()?;
            Ok(command.apply(current))
        })
    }
}

impl RocketsApi for RocketService {
    fn create(&self, command: AddRocketCommand) -> Result<Rocket, ServiceError> {
        command.target.validate()?;
        Ok(self.store.add(command.into_draft())?)
    }

    fn get(&self, id: RocketId) -> Result<Rocket, ServiceError> {
        self.store
            .get(id)
            .ok_or_else(|| ServiceError::rocket_not_found(id))
    }

    fn list(&self) -> Vec<Rocket> {
        self.store.find_all()
    }

    fn stream_changes(&self) -> ChangeStream<Rocket> {
        self.store.stream(EventFilter::all())
    }

    fn replace(&self, id: RocketId, command: UpdateRocketCommand) -> Result<Rocket, ServiceError> {
        self.apply(id, &command)
    }

    fn patch(&self, id: RocketId, command: PatchRocketCommand) -> Result<Rocket, ServiceError> {
        self.apply(id, &command)
    }

    fn merge(&self, id: RocketId, command: MergeRocketCommand) -> Result<Rocket, ServiceError> {
        self.apply(id, &command)
    }

    fn remove(&self, id: RocketId) -> Result<Rocket, ServiceError> {
        self.store
            .remove(id)
            .ok_or_else(|| ServiceError::rocket_not_found(id))
    }
}

//! Launch coordinator: couples the rocket store and the launch store into one
//! logical operation.

use crate::domain::LaunchConfig;
use crate::ports::{Clock, LaunchApi};
use rf_01_keyed_store::{KeyedStore, StoreError};
use rf_02_rocket_lifecycle::ensure_launchable;
use shared_bus::{ChangeStream, EventFilter};
use shared_types::{Launch, LaunchId, NewLaunch, Rocket, RocketId, ServiceError, Status};
use std::sync::Arc;

pub struct LaunchCoordinator {
    rockets: Arc<KeyedStore<Rocket>>,
    launches: Arc<KeyedStore<Launch>>,
    clock: Arc<dyn Clock>,
    config: LaunchConfig,
}

impl LaunchCoordinator {
    pub fn new(
        rockets: Arc<KeyedStore<Rocket>>,
        launches: Arc<KeyedStore<Launch>>,
        clock: Arc<dyn Clock>,
        config: LaunchConfig,
    ) -> Self {
        Self {
            rockets,
            launches,
            clock,
            config,
        }
    }

    #[cfg(test)]
    fn launches(&self) -> &Arc<KeyedStore<Launch>> {
        &self.launches
    }

    /// Appends the audit record for an already launched rocket, retrying
    /// identity collisions with a fresh id.
    fn record(&self, rocket: Rocket) -> Result<Launch, ServiceError> {
        let mut attempt = 1;
        loop {
            let draft = NewLaunch {
                rocket: rocket.clone(),
                time: self.clock.now(),
            };
            match self.launches.add(draft) {
                Ok(launch) => return Ok(launch),
                Err(StoreError::DuplicateKey { .. }) if attempt < self.config.append_attempts => {
                    attempt += 1;
                }
                Err(err) => return Err(err.into()),
            }
        }
    }
}

impl LaunchApi for LaunchCoordinator {
    fn launch(&self, rocket_id: RocketId) -> Result<Launch, ServiceError> {
        // Lookup, eligibility and the flip to LAUNCHED commit as one store call.
        let launched = self.rockets.modify::<ServiceError, _>(rocket_id, |current| {
            ensure_launchable(current)?;
            Ok(current.with_status(Status::Launched))
        })?;

        // From here on the rocket stays LAUNCHED whatever happens to the record.
        self.record(launched)
    }

    fn get(&self, id: LaunchId) -> Result<Launch, ServiceError> {
        self.launches
            .get(id)
            .ok_or_else(|| ServiceError::launch_not_found(id))
    }

    fn list(&self) -> Vec<Launch> {
        self.launches.find_all()
    }

    fn stream_changes(&self) -> ChangeStream<Launch> {
        self.launches.stream(EventFilter::all())
    }
}

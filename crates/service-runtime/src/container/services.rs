//! # Service Container
//!
//! Wires the two keyed stores into the rocket registry and the launch
//! coordinator.
//!
//! ```text
//!   KeyedStore<Rocket> ──┬──► RocketService      (RocketsApi)
//!                        │
//!                        └──► LaunchCoordinator  (LaunchApi) ◄── KeyedStore<Launch>
//! ```
//!
//! Both services share the rocket store, so a launch and a concurrent patch
//! serialize on the same entry lock.

use std::sync::Arc;

use rf_01_keyed_store::KeyedStore;
use rf_02_rocket_lifecycle::RocketService;
use rf_03_launch_control::{LaunchCoordinator, SystemClock};
use rf_04_api_gateway::StateReset;
use shared_types::{Launch, Rocket};
use tracing::{info, instrument};

use crate::container::config::ServiceConfig;

/// Central container holding every store and service.
pub struct ServiceContainer {
    /// Rocket store, shared by both services.
    pub rocket_store: Arc<KeyedStore<Rocket>>,

    /// Append-only launch record store.
    pub launch_store: Arc<KeyedStore<Launch>>,

    /// Rocket registry.
    pub rockets: Arc<RocketService>,

    /// Launch coordinator.
    pub launches: Arc<LaunchCoordinator>,

    /// Service configuration (immutable after initialization).
    pub config: ServiceConfig,
}

impl ServiceContainer {
    /// Builds every store and service from `config`.
    #[instrument(name = "service_init", skip(config))]
    pub fn new(config: ServiceConfig) -> Self {
        let capacity = config.store.feed_capacity;

        let rocket_store = Arc::new(KeyedStore::with_random_ids("rockets", capacity));
        let launch_store = Arc::new(KeyedStore::with_random_ids("launches", capacity));
        info!(feed_capacity = capacity, "Stores initialized");

        let rockets = Arc::new(RocketService::new(Arc::clone(&rocket_store)));
        let launches = Arc::new(LaunchCoordinator::new(
            Arc::clone(&rocket_store),
            Arc::clone(&launch_store),
            Arc::new(SystemClock),
            config.launch,
        ));
        info!(
            append_attempts = config.launch.append_attempts,
            "Rocket registry and launch coordinator initialized"
        );

        Self {
            rocket_store,
            launch_store,
            rockets,
            launches,
            config,
        }
    }

    /// Removes every launch record, then every rocket.
    pub fn clear_all(&self) {
        self.launch_store.clear();
        self.rocket_store.clear();
    }
}

impl StateReset for ServiceContainer {
    fn clear_all(&self) {
        ServiceContainer::clear_all(self);
    }
}

//! # rflux Service Runtime
//!
//! Builds the stores and services and serves them over HTTP.
//!
//! ## Startup Sequence
//!
//! 1. Load configuration (defaults, then `RF_*` environment overrides)
//! 2. Validate configuration
//! 3. Initialize stores and services (`ServiceContainer`)
//! 4. Start the API gateway
//! 5. On Ctrl+C, shut the gateway down gracefully; open event streams end
//!
//! ## Modular Structure
//!
//! - `container/` - configuration and the service container

pub mod container;

use std::sync::Arc;

use rf_04_api_gateway::{ApiGatewayService, GatewayError, StateReset};
use tracing::info;

pub use container::{ConfigError, ServiceConfig, ServiceContainer, StoreConfig};

/// The service runtime: a container plus the gateway serving it.
pub struct ServiceRuntime {
    container: Arc<ServiceContainer>,
    gateway: ApiGatewayService,
}

impl ServiceRuntime {
    /// Validates `config` and builds every component.
    pub fn new(config: ServiceConfig) -> anyhow::Result<Self> {
        config.validate()?;
        info!("Creating rflux service runtime");

        let container = Arc::new(ServiceContainer::new(config));
        let reset: Arc<dyn StateReset> = container.clone();
        let gateway = ApiGatewayService::new(
            container.config.gateway.clone(),
            container.rockets.clone(),
            container.launches.clone(),
            Some(reset),
        )?;

        Ok(Self { container, gateway })
    }

    pub fn container(&self) -> &Arc<ServiceContainer> {
        &self.container
    }

    pub fn gateway(&self) -> &ApiGatewayService {
        &self.gateway
    }

    /// Serves until [`Self::shutdown`] is called.
    pub async fn run(&self) -> Result<(), GatewayError> {
        info!("===========================================");
        info!("  rflux service v{}", env!("CARGO_PKG_VERSION"));
        info!("===========================================");
        self.gateway.start().await
    }

    /// Graceful shutdown.
    pub fn shutdown(&self) {
        info!("Shutting down rflux service");
        self.gateway.shutdown();
    }
}

//! API Gateway service: binds the HTTP listener and serves the router until
//! shutdown.

use crate::domain::{GatewayConfig, GatewayError};
use crate::ports::StateReset;
use crate::routes::{build_router, AppState};
use axum::Router;
use rf_02_rocket_lifecycle::RocketsApi;
use rf_03_launch_control::LaunchApi;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::info;

/// API Gateway service state
pub struct ApiGatewayService {
    config: GatewayConfig,
    state: AppState,
    shutdown_tx: watch::Sender<bool>,
}

impl ApiGatewayService {
    /// Create a new API Gateway service
    pub fn new(
        config: GatewayConfig,
        rockets: Arc<dyn RocketsApi>,
        launches: Arc<dyn LaunchApi>,
        reset: Option<Arc<dyn StateReset>>,
    ) -> Result<Self, GatewayError> {
        config
            .validate()
            .map_err(|e| GatewayError::Config(e.to_string()))?;

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let mut state = AppState::new(rockets, launches)
            .with_keep_alive(config.feed.keep_alive())
            .with_shutdown(shutdown_rx);
        if let Some(reset) = reset.filter(|_| config.admin.enable_state_reset) {
            state = state.with_reset(reset);
        }

        Ok(Self {
            config,
            state,
            shutdown_tx,
        })
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Router with every route and layer, bound to this service's state.
    pub fn router(&self) -> Router {
        build_router(&self.config, self.state.clone())
    }

    /// Bind the configured address and serve until [`Self::shutdown`].
    pub async fn start(&self) -> Result<(), GatewayError> {
        if !self.config.http.enabled {
            info!("HTTP server disabled");
            self.stopped().await;
            return Ok(());
        }

        let addr = self.config.http_addr();
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| GatewayError::Bind { addr, source })?;
        self.serve(listener).await
    }

    /// Serve on an already bound listener until [`Self::shutdown`].
    pub async fn serve(&self, listener: TcpListener) -> Result<(), GatewayError> {
        info!(addr = %listener.local_addr()?, "Starting HTTP server");

        let stopped = {
            let mut shutdown = self.shutdown_tx.subscribe();
            async move {
                let _ = shutdown.wait_for(|stopping| *stopping).await;
                info!("Received shutdown signal");
            }
        };
        axum::serve(listener, self.router())
            .with_graceful_shutdown(stopped)
            .await?;

        info!("API Gateway stopped");
        Ok(())
    }

    /// Trigger graceful shutdown. Open event streams end as well.
    pub fn shutdown(&self) {
        self.shutdown_tx.send_replace(true);
    }

    async fn stopped(&self) {
        let mut shutdown = self.shutdown_tx.subscribe();
        let _ = shutdown.wait_for(|stopping| *stopping).await;
    }
}

//! # rflux
//!
//! In-memory rocket registry and launch service.

use std::sync::Arc;

use anyhow::{Context, Result};
use service_runtime::{ServiceConfig, ServiceRuntime};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    let config = ServiceConfig::from_env().context("failed to load configuration")?;
    let runtime = Arc::new(ServiceRuntime::new(config)?);

    let mut server = tokio::spawn({
        let runtime = Arc::clone(&runtime);
        async move { runtime.run().await }
    });

    info!("Service is running. Press Ctrl+C to stop.");
    let result = tokio::select! {
        signal = tokio::signal::ctrl_c() => {
            signal.context("failed to listen for Ctrl+C")?;
            runtime.shutdown();
            server.await?
        }
        result = &mut server => result?,
    };

    if let Err(e) = result {
        error!(error = %e, "Service terminated with an error");
        return Err(e.into());
    }

    info!("Service stopped");
    Ok(())
}

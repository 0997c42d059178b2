//! Storage setup and initialization.

use std::sync::Arc;

use anyhow::{Context, Result};
use docbox_core::Config;
use docbox_storage::{create_gateway, ObjectGateway};

/// Build the object storage gateway from configuration.
pub async fn setup_storage(config: &Config) -> Result<Arc<dyn ObjectGateway>> {
    tracing::info!("Initializing storage backend...");

    let storage = create_gateway(config)
        .await
        .context("Failed to initialize storage backend")?;

    tracing::info!(
        backend = %storage.backend_kind(),
        "Storage backend initialized successfully"
    );

    Ok(storage)
}

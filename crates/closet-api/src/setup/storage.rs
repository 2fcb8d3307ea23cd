//! Storage backend setup

use anyhow::{Context, Result};
use closet_core::Config;
use closet_storage::Storage;
use std::sync::Arc;

pub async fn setup_storage(config: &Config) -> Result<Arc<dyn Storage>> {
    let storage = closet_storage::create_storage(config)
        .await
        .context("Failed to initialize storage backend")?;

    tracing::info!(backend = %storage.backend_type(), "Storage backend ready");

    Ok(storage)
}

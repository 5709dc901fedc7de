//! Backend selection from `DATABASE_PATH`.
use std::sync::Arc;

use anyhow::{Context, Result};
use runtime::{InMemoryStore, SqliteStore, Store};

use crate::config::ServerConfig;

/// Open the configured store. `:memory:` keeps everything in process.
pub fn open_store(config: &ServerConfig) -> Result<Arc<dyn Store>> {
    if config.in_memory() {
        tracing::warn!("Using in-memory store; data is lost on exit");
        return Ok(Arc::new(InMemoryStore::new()));
    }

    let store = SqliteStore::open(&config.database_path)
        .with_context(|| format!("failed to open database {}", config.database_path))?;
    tracing::info!("Connected to {}", store.describe());
    Ok(Arc::new(store))
}

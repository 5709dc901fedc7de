//! High-level runtime orchestrator.
//!
//! The runtime owns the decay worker, wires the store, credentials and event
//! bus into a [`PetService`], and exposes a builder-based API for the server.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;

use crate::api::{PetService, RuntimeError};
use crate::auth::{PasswordHasher, TokenIssuer};
use crate::events::{EventBus, RuntimeEvent, Topic};
use crate::repository::Store;
use crate::workers::{DecayConfig, DecayMetrics, DecayWorker};

/// Runtime configuration shared across the service and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub decay: DecayConfig,
    /// Upper bound for a single store call made from async code.
    pub storage_timeout: Duration,
    pub token_ttl: Duration,
    pub bcrypt_cost: u32,
    pub event_buffer_size: usize,
}

impl RuntimeConfig {
    pub const DEFAULT_STORAGE_TIMEOUT: Duration = Duration::from_secs(5);
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            decay: DecayConfig::default(),
            storage_timeout: Self::DEFAULT_STORAGE_TIMEOUT,
            token_ttl: TokenIssuer::DEFAULT_TTL,
            bcrypt_cost: PasswordHasher::DEFAULT_COST,
            event_buffer_size: 100,
        }
    }
}

/// Running pet backend.
///
/// Design: Runtime owns the decay worker; [`PetService`] is the cloneable
/// façade handed to request handlers.
pub struct Runtime {
    service: PetService,
    metrics: Arc<DecayMetrics>,
    shutdown_tx: watch::Sender<bool>,
    decay_handle: Option<JoinHandle<()>>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable service handle
    pub fn service(&self) -> PetService {
        self.service.clone()
    }

    /// Subscribe to runtime events on one topic
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<RuntimeEvent> {
        self.service.events().subscribe(topic)
    }

    /// Decay worker statistics
    pub fn decay_metrics(&self) -> Arc<DecayMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Stop the decay worker and wait for it to exit.
    pub async fn shutdown(self) -> Result<(), RuntimeError> {
        // Receiver already gone means the worker has exited.
        let _ = self.shutdown_tx.send(true);

        if let Some(handle) = self.decay_handle {
            handle.await.map_err(RuntimeError::WorkerJoin)?;
        }

        Ok(())
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    store: Option<Arc<dyn Store>>,
    jwt_secret: Option<String>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            store: None,
            jwt_secret: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the required store
    pub fn store(mut self, store: impl Store + 'static) -> Self {
        self.store = Some(Arc::new(store));
        self
    }

    /// Set the required store from a shared handle
    pub fn shared_store(mut self, store: Arc<dyn Store>) -> Self {
        self.store = Some(store);
        self
    }

    /// Set the required token signing secret
    pub fn jwt_secret(mut self, secret: impl Into<String>) -> Self {
        self.jwt_secret = Some(secret.into());
        self
    }

    /// Build the runtime and start the decay worker (if enabled).
    ///
    /// Must be called inside a Tokio runtime.
    pub async fn build(self) -> Result<Runtime, RuntimeError> {
        let store = self.store.ok_or(RuntimeError::MissingStore)?;
        let secret = self.jwt_secret.ok_or(RuntimeError::MissingSecret)?;
        let tokens = TokenIssuer::new(&secret, self.config.token_ttl)?;

        let events = EventBus::with_capacity(self.config.event_buffer_size);
        let metrics = Arc::new(DecayMetrics::new());
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let decay_handle = if self.config.decay.enabled {
            let worker = DecayWorker::new(
                Arc::clone(&store),
                self.config.decay.clone(),
                self.config.storage_timeout,
                events.clone(),
                Arc::clone(&metrics),
                shutdown_rx,
            );
            Some(tokio::spawn(worker.run()))
        } else {
            tracing::info!("Decay worker disabled");
            None
        };

        let service = PetService::new(
            store,
            PasswordHasher::new(self.config.bcrypt_cost),
            tokens,
            events,
            self.config.storage_timeout,
        );

        Ok(Runtime {
            service,
            metrics,
            shutdown_tx,
            decay_handle,
        })
    }
}

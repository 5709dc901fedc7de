//! Periodic decay worker.
//!
//! Every `period` the worker applies `decay_all(amount)` to every stored pet
//! in one atomic sweep. Sweeps run inline in the worker loop, so a slow
//! sweep delays the next tick instead of overlapping it; missed ticks are
//! skipped rather than replayed in a burst.

use std::sync::Arc;
use std::time::{Duration, Instant};

use pet_core::{PetConfig, PetStats, decay_all};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, error, info, warn};

use super::metrics::DecayMetrics;
use crate::api::ServiceError;
use crate::events::{DecayEvent, EventBus};
use crate::repository::{PetRepository, RepositoryError, Store};

/// Schedule of the decay worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecayConfig {
    /// Run the worker at all.
    pub enabled: bool,
    /// Time between sweeps.
    pub period: Duration,
    /// Amount subtracted from every stat per sweep.
    pub amount: u32,
}

impl DecayConfig {
    pub const DEFAULT_PERIOD: Duration = Duration::from_secs(30);

    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }
}

impl Default for DecayConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            period: Self::DEFAULT_PERIOD,
            amount: PetConfig::DEFAULT_DECAY_AMOUNT,
        }
    }
}

/// Background worker that decays every pet on a fixed period.
pub struct DecayWorker {
    store: Arc<dyn Store>,
    config: DecayConfig,
    storage_timeout: Duration,
    events: EventBus,
    metrics: Arc<DecayMetrics>,
    shutdown_rx: watch::Receiver<bool>,
    pending: Option<JoinHandle<Result<usize, RepositoryError>>>,
}

impl DecayWorker {
    pub fn new(
        store: Arc<dyn Store>,
        config: DecayConfig,
        storage_timeout: Duration,
        events: EventBus,
        metrics: Arc<DecayMetrics>,
        shutdown_rx: watch::Receiver<bool>,
    ) -> Self {
        Self {
            store,
            config,
            storage_timeout,
            events,
            metrics,
            shutdown_rx,
            pending: None,
        }
    }

    /// Run until the shutdown signal flips or its sender is dropped.
    pub async fn run(mut self) {
        let period = self.config.period.max(Duration::from_millis(1));
        let mut ticker = time::interval_at(time::Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        info!(
            "Decay worker started: amount {} every {:?}",
            self.config.amount, period
        );

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.tick().await;
                }
                changed = self.shutdown_rx.changed() => {
                    if changed.is_err() || *self.shutdown_rx.borrow() {
                        break;
                    }
                }
            }
        }

        info!("Decay worker stopped");
    }

    /// One sweep. Failures are logged and counted; the worker keeps going.
    async fn tick(&mut self) {
        if let Some(pending) = self.pending.take() {
            if !pending.is_finished() {
                self.metrics.record_skip();
                warn!("Previous decay sweep still running, skipping tick");
                self.pending = Some(pending);
                return;
            }
            match pending.await {
                Ok(Ok(pets)) => {
                    self.metrics.record_late(pets);
                    info!("Timed-out decay sweep finished late, {} pets", pets);
                }
                Ok(Err(err)) => warn!("Timed-out decay sweep failed late: {}", err),
                Err(err) => warn!("Timed-out decay sweep panicked: {}", err),
            }
        }

        let started = Instant::now();
        match self.sweep().await {
            Ok(pets) => {
                self.metrics.record_success(pets, started.elapsed());
                debug!("Decay sweep updated {} pets", pets);
                self.events.publish(DecayEvent::Swept {
                    pets,
                    amount: self.config.amount,
                });
            }
            Err(err) => {
                self.metrics.record_failure();
                error!("Decay sweep failed: {}", err);
                self.events.publish(DecayEvent::Failed {
                    reason: err.to_string(),
                });
            }
        }
    }

    /// Run the sweep on the blocking pool, waiting at most `storage_timeout`.
    ///
    /// A sweep that outlives the timeout is parked in `pending`; ticks are
    /// skipped until it finishes so two sweeps never run at once.
    async fn sweep(&mut self) -> Result<usize, ServiceError> {
        let store = Arc::clone(&self.store);
        let amount = self.config.amount;
        let mut handle = tokio::task::spawn_blocking(move || {
            let step = move |stats: PetStats| decay_all(stats, amount);
            store.update_all(&step)
        });

        match time::timeout(self.storage_timeout, &mut handle).await {
            Ok(joined) => Ok(joined.map_err(ServiceError::WorkerJoin)??),
            Err(_) => {
                self.pending = Some(handle);
                Err(ServiceError::StorageTimeout(self.storage_timeout))
            }
        }
    }
}

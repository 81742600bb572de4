//! High-level runtime orchestrator.
//!
//! The runtime owns the round worker, wires up command/event channels, and
//! exposes a builder-based API for clients to drive rounds.

use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use drill_core::{Labels, RoundConfig, RoundEngine};

use crate::api::{Result, RoundHandle, RuntimeError};
use crate::catalog::WordCatalog;
use crate::events::EventBus;
use crate::pool::PoolSelector;
use crate::repository::WordStore;
use crate::stats::{Clock, StatRecorder, SystemClock};
use crate::workers::{Command, RoundServices, RoundWorker};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub round: RoundConfig,
    pub labels: Labels,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
    /// Seed for picker shuffles; `None` draws from entropy.
    pub seed: Option<u64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            round: RoundConfig::default(),
            labels: Labels::default(),
            event_buffer_size: 100,
            command_buffer_size: 32,
            seed: None,
        }
    }
}

/// Main runtime that orchestrates drill rounds
///
/// Design: Runtime owns the worker and coordinates shutdown.
/// [`RoundHandle`] provides a cloneable façade for clients.
pub struct Runtime {
    handle: RoundHandle,
    catalog: WordCatalog,
    worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to the round session
    pub fn handle(&self) -> RoundHandle {
        self.handle.clone()
    }

    /// Catalog over the same store the round uses
    pub fn catalog(&self) -> WordCatalog {
        self.catalog.clone()
    }

    /// Shutdown the runtime gracefully
    ///
    /// The worker stops once every handle clone is dropped and pending
    /// statistics writes have resolved.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);

        self.worker_handle.await.map_err(RuntimeError::WorkerJoin)?;

        Ok(())
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    store: Option<Arc<dyn WordStore>>,
    clock: Option<Arc<dyn Clock>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            store: None,
            clock: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Set required word store
    pub fn store(mut self, store: Arc<dyn WordStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Override the clock used to stamp statistics (default: system clock)
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Seed picker shuffles for reproducible sessions
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Build the runtime
    ///
    /// No round is started; call [`RoundHandle::start_round`] first.
    pub async fn build(self) -> Result<Runtime> {
        let store = self.store.ok_or(RuntimeError::MissingStore)?;
        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));

        let (command_tx, command_rx) = mpsc::channel::<Command>(self.config.command_buffer_size);
        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);

        let handle = RoundHandle::new(command_tx, event_bus.clone());
        let catalog = WordCatalog::new(Arc::clone(&store));

        let services = RoundServices {
            selector: PoolSelector::new(Arc::clone(&store)),
            recorder: StatRecorder::new(store, clock),
            catalog: catalog.clone(),
        };

        let rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let worker = RoundWorker::new(
            RoundEngine::new(self.config.labels),
            self.config.round,
            services,
            rng,
            command_rx,
            event_bus,
        );

        let worker_handle = tokio::spawn(async move {
            worker.run().await;
        });

        Ok(Runtime {
            handle,
            catalog,
            worker_handle,
        })
    }
}

//! Runtime orchestration for drill rounds.
//!
//! This crate wires the pure round engine from `drill-core` to a word store,
//! a background worker and a topic-based event bus. Consumers embed
//! [`Runtime`] and drive rounds through the cloneable [`RoundHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides the topic-based event bus
//! - [`repository`] holds the word store contract and its implementations
//! - [`pool`], [`stats`] and [`catalog`] are the services the worker and
//!   clients use on top of a store
//! - [`workers`] keeps background tasks internal to the crate
pub mod api;
pub mod catalog;
pub mod events;
pub mod pool;
pub mod repository;
pub mod runtime;
pub mod stats;
pub mod sync;

mod workers;

pub use api::{Result, RoundHandle, RuntimeError};
pub use catalog::{WordCatalog, WordFlag};
pub use events::{Event, EventBus, RoundEvent, StatsEvent, Topic};
pub use pool::PoolSelector;
pub use repository::{
    FileWordStore, InMemoryWordStore, RepositoryError, WordDocument, WordStore,
};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
pub use stats::{Clock, Recorded, StatRecorder, SystemClock};
pub use sync::{SyncReport, sync_word_list};

//! Front-ends that drive a round through a [`RoundHandle`].
mod cli;
pub mod command;
pub mod render;

pub use cli::CliFrontend;
pub use command::Input;

use anyhow::Result;
use async_trait::async_trait;
use runtime::{RoundHandle, WordCatalog};

/// Frontend abstraction for UI layers.
///
/// Frontends never own the runtime. They send commands through the handle,
/// subscribe to its topics for snapshots, and query the catalog for stats
/// screens.
#[async_trait]
pub trait Frontend: Send {
    /// Run the frontend loop until the learner quits.
    async fn run(&mut self, handle: RoundHandle, catalog: WordCatalog) -> Result<()>;
}

//! Top-level client composing the drill runtime with a frontend.
//!
//! # Architecture
//!
//! ```text
//! Client (Top-level container)
//!   ├─→ Runtime (round worker, word store, event bus)
//!   └─→ Frontend (terminal loop, talks to the runtime via RoundHandle)
//! ```
//!
//! The binary loads [`config::Config`], installs [`logging`], builds the
//! runtime through [`bootstrap`] and hands control to the frontend.

pub mod bootstrap;
mod builder;
pub mod config;
pub mod frontend;
pub mod logging;

pub use builder::ClientBuilder;
pub use frontend::Frontend;

use anyhow::Result;

/// Top-level client container.
///
/// # Lifecycle
///
/// 1. `Client::builder()` takes an already built runtime and a frontend
/// 2. `Client::run()` hands a round handle and catalog to the frontend
/// 3. When the frontend returns, the runtime shuts down after pending
///    statistics writes have landed
pub struct Client {
    runtime: runtime::Runtime,
    frontend: Box<dyn Frontend>,
}

impl Client {
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Run the frontend until the learner quits, then stop the runtime.
    pub async fn run(self) -> Result<()> {
        let Self {
            runtime,
            mut frontend,
        } = self;

        let frontend_result = frontend.run(runtime.handle(), runtime.catalog()).await;

        if let Err(e) = runtime.shutdown().await {
            tracing::error!("Runtime shutdown error: {}", e);
        }

        frontend_result
    }
}

//! Verb drill terminal client.
//!
//! Composition root: loads configuration, installs file logging, syncs the
//! word list into the store, then runs the terminal frontend.
//!
//! ```bash
//! DRILL_DIFFICULTY=hard DRILL_WORD_LIST=./words.txt cargo run -p drill-client
//! ```

use anyhow::Result;
use drill_client::config::Config;
use drill_client::frontend::CliFrontend;
use drill_client::{Client, bootstrap, logging};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::from_env();
    logging::setup_logging()?;

    tracing::info!("Starting drill client");
    tracing::info!("Round size: {}", config.runtime.round.round_size);
    tracing::info!("In-memory store: {}", config.in_memory);

    let runtime = bootstrap::build_runtime(&config).await?;
    tracing::info!("Runtime built successfully");

    let client = Client::builder()
        .runtime(runtime)
        .frontend(CliFrontend::stdio())
        .build()?;

    client.run().await?;

    tracing::info!("Client shutdown complete");
    Ok(())
}

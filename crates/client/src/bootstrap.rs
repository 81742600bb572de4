//! Assembles the runtime from client configuration.
//!
//! Picks the word store, imports the word list and builds the [`Runtime`].
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use drill_content::{WordList, WordListLoader};
use runtime::{FileWordStore, InMemoryWordStore, Runtime, WordStore, sync_word_list};

use crate::config::Config;

/// Word list compiled into the binary.
const BUNDLED_WORDS: &str = include_str!("../data/words.txt");

/// Fallback location when no platform data directory is available.
const FALLBACK_DATA_DIR: &str = "./save_data";

/// Build a ready-to-use runtime. No round is started yet.
pub async fn build_runtime(config: &Config) -> Result<Runtime> {
    let store = open_store(config)?;

    let list = load_word_list(config)?;
    let report = sync_word_list(store.as_ref(), &list)
        .await
        .context("Failed to sync word list into the store")?;
    tracing::info!(
        version = report.version,
        inserted = report.inserted,
        updated = report.updated,
        deleted = report.deleted,
        "word list synced"
    );

    let runtime = Runtime::builder()
        .config(config.runtime.clone())
        .store(store)
        .build()
        .await?;

    Ok(runtime)
}

fn open_store(config: &Config) -> Result<Arc<dyn WordStore>> {
    if config.in_memory {
        tracing::info!("Using in-memory word store");
        return Ok(Arc::new(InMemoryWordStore::new()));
    }

    let dir = data_directory(config);
    let store = FileWordStore::new(&dir)
        .with_context(|| format!("Failed to open word store in {}", dir.display()))?;
    tracing::info!("Word store: {}", store.path().display());
    Ok(Arc::new(store))
}

fn data_directory(config: &Config) -> PathBuf {
    if let Some(dir) = &config.data_dir {
        return dir.clone();
    }
    directories::ProjectDirs::from("", "", "drill")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(FALLBACK_DATA_DIR))
}

fn load_word_list(config: &Config) -> Result<WordList> {
    match &config.word_list {
        Some(path) => {
            tracing::info!("Loading word list from {}", path.display());
            WordListLoader::load(path)
        }
        None => Ok(drill_content::parse(BUNDLED_WORDS)),
    }
}

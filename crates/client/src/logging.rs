//! File logging for the terminal client.
//!
//! The terminal belongs to the frontend, so tracing output goes to a
//! non-blocking file appender under the platform cache directory.
use std::path::PathBuf;

use anyhow::Result;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const LOG_FILE: &str = "client.log";

/// Install the global subscriber. Call once, before the runtime starts.
pub fn setup_logging() -> Result<PathBuf> {
    let log_dir = log_directory();
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = tracing_appender::rolling::never(&log_dir, LOG_FILE);
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    // Keep the writer alive for the whole process.
    std::mem::forget(guard);

    let log_file = log_dir.join(LOG_FILE);
    tracing::info!("Log file: {}", log_file.display());

    Ok(log_file)
}

fn log_directory() -> PathBuf {
    directories::ProjectDirs::from("", "", "drill")
        .map(|dirs| dirs.cache_dir().join("logs"))
        .unwrap_or_else(|| PathBuf::from("/tmp/drill/logs"))
}

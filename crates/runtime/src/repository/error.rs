//! Error types raised by repository implementations.

use drill_core::WordId;
use thiserror::Error;

/// Errors surfaced by word store implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("word store lock was poisoned")]
    LockPoisoned,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(String),

    #[error("corrupted data: {0}")]
    CorruptedData(String),

    #[error("word {0} not found")]
    WordNotFound(WordId),
}

pub type Result<T> = std::result::Result<T, RepositoryError>;

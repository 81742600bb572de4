//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from worker coordination and the word store so clients can
//! bubble them up with consistent context.
use thiserror::Error;
use tokio::sync::oneshot;

use drill_core::IgnoredInput;

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("round worker command channel closed")]
    CommandChannelClosed,

    #[error("round worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("round worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("runtime requires a word store to be configured before building")]
    MissingStore,

    /// Stale or out-of-range input; the round state is unchanged.
    #[error("input ignored: {0}")]
    InputIgnored(#[from] IgnoredInput),

    #[error("no word has been answered in this round yet")]
    NoLastWord,

    #[error("history position {position} out of range for {len} finished words")]
    HistoryOutOfRange { position: usize, len: usize },
}

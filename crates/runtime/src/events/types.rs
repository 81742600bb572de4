//! Event types for different topics.

use drill_core::{Notice, RoundState, StatKind, Word, WordId};
use serde::{Deserialize, Serialize};

/// Events describing the visible round.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum RoundEvent {
    /// Published after every accepted transition.
    Snapshot(RoundState),

    /// Transient feedback, with its rendered message.
    Notice { notice: Notice, message: String },
}

/// Results of background statistics writes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum StatsEvent {
    /// A write was persisted; `word` is the stored value.
    Recorded { word: Word, kind: StatKind },

    /// A write failed; the round keeps its in-memory copy.
    WriteFailed {
        id: WordId,
        kind: StatKind,
        error: String,
    },
}

//! Render-ready round snapshot types.

use crate::picker::Picker;
use crate::word::Word;

/// Lifecycle of a round.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RoundPhase {
    /// No eligible words (also the state before the first round starts).
    #[default]
    Empty,
    /// One word is current and awaits a guess.
    InProgress,
    /// Every word of the working list has been passed.
    Ended,
}

/// Outcome of the latest transition, rendered as the status line.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RoundStatus {
    #[default]
    Idle,
    Correct,
    /// Wrong guess; carries the attempted raw pair for feedback.
    Wrong {
        prefix: String,
        root: String,
    },
    /// Advanced after exhausting the retry budget.
    Forced,
    Skipped,
    Done,
    NoWords,
}

/// Semantic color tag for the status line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatusColor {
    Neutral,
    Success,
    Warning,
    Error,
}

impl RoundStatus {
    pub const fn color(&self) -> Option<StatusColor> {
        match self {
            Self::Idle => None,
            Self::Correct => Some(StatusColor::Success),
            Self::Wrong { .. } => Some(StatusColor::Error),
            Self::Forced | Self::Skipped => Some(StatusColor::Warning),
            Self::Done | Self::NoWords => Some(StatusColor::Neutral),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Progress {
    /// Working-list size.
    pub max: usize,
    /// Wrong tries spent on the current word.
    pub value: usize,
}

/// Immutable snapshot emitted after every transition.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoundState {
    pub next_word: Option<Word>,
    pub last_word: Option<Word>,
    /// Words finished this round, oldest first.
    pub history: Vec<Word>,
    pub translation: String,
    pub example: String,
    pub status: RoundStatus,
    pub status_label: String,
    pub status_color: Option<StatusColor>,
    pub round_ended: bool,
    pub progress: Progress,
    pub prefixes: Picker,
    pub roots: Picker,
}

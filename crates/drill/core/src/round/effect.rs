//! Side effects requested by round transitions.
//!
//! Transitions never touch the store. They return [`StatEffect`]s that the
//! runtime dispatches as background writes; the persisted words come back
//! through [`super::RoundEngine::merge`] tagged with the same [`StatTarget`].

use crate::word::Word;

/// Which statistic a background write updates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatKind {
    Shown,
    Correct,
    Failed,
}

impl StatKind {
    pub const fn attempt(correct: bool) -> Self {
        if correct { Self::Correct } else { Self::Failed }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Shown => "shown",
            Self::Correct => "correct",
            Self::Failed => "failed",
        }
    }
}

/// Identifies the working-list slot a write result belongs to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatTarget {
    pub epoch: u64,
    pub slot: usize,
    pub word: Word,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatEffect {
    pub target: StatTarget,
    pub kind: StatKind,
}

/// Transient feedback for the learner (toast-style messages).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Notice {
    NewRound { next: String },
    Correct { next: String },
    WrongTry { prefix: String, root: String },
    ForcedAdvance { tries: usize, next: String },
    Skipped { next: String },
    RoundDone,
    NoWords,
}

/// Result of an accepted transition.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Transition {
    pub effects: Vec<StatEffect>,
    pub notice: Option<Notice>,
}

impl Transition {
    pub(crate) fn record(&mut self, target: StatTarget, kind: StatKind) {
        self.effects.push(StatEffect { target, kind });
    }
}

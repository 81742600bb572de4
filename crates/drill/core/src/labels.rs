//! User-facing strings produced by the round engine.
//!
//! The engine never hardcodes display text; front-ends can swap the table to
//! localize status labels, notices and the blank-prefix placeholder.

use crate::round::{Notice, RoundStatus};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Labels {
    /// Placeholder shown instead of an empty prefix.
    pub no_prefix: String,
    /// Example text shown when a new round starts.
    pub select_prompt: String,
    pub status_correct: String,
    pub status_wrong: String,
    pub status_forced: String,
    pub status_skipped: String,
    pub status_done: String,
    pub status_no_words: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            no_prefix: "(no prefix)".into(),
            select_prompt: "Pick a prefix and a root to build the word.".into(),
            status_correct: "Correct".into(),
            status_wrong: "Wrong".into(),
            status_forced: "Moved on".into(),
            status_skipped: "Skipped".into(),
            status_done: "Done".into(),
            status_no_words: "No words to practice for this selection".into(),
        }
    }
}

impl Labels {
    /// Display form of a raw prefix value.
    pub fn prefix<'a>(&'a self, prefix: &'a str) -> &'a str {
        if prefix.trim().is_empty() {
            &self.no_prefix
        } else {
            prefix
        }
    }

    pub fn status(&self, status: &RoundStatus) -> String {
        match status {
            RoundStatus::Idle => String::new(),
            RoundStatus::Correct => self.status_correct.clone(),
            RoundStatus::Wrong { prefix, root } => {
                format!("{}: {} + {}", self.status_wrong, self.prefix(prefix), root)
            }
            RoundStatus::Forced => self.status_forced.clone(),
            RoundStatus::Skipped => self.status_skipped.clone(),
            RoundStatus::Done => self.status_done.clone(),
            RoundStatus::NoWords => self.status_no_words.clone(),
        }
    }

    pub fn notice(&self, notice: &Notice) -> String {
        match notice {
            Notice::NewRound { next } => format!("New round! Translate: {next}"),
            Notice::Correct { next } => format!("Correct! Next: {next}"),
            Notice::WrongTry { prefix, root } => {
                format!("Not quite: {} + {}", self.prefix(prefix), root)
            }
            Notice::ForcedAdvance { tries, next } => {
                format!("Moving on after {tries} tries. Next: {next}")
            }
            Notice::Skipped { next } => format!("Skipped. Next: {next}"),
            Notice::RoundDone => "Round complete!".into(),
            Notice::NoWords => self.status_no_words.clone(),
        }
    }
}

//! Round state machine.
//!
//! [`RoundEngine`] owns all session-local state of one practice round in a
//! single struct and exposes the three transitions: [`RoundEngine::start`],
//! [`RoundEngine::handle_combine`] and [`RoundEngine::handle_skip`]. Each one
//! updates state synchronously and returns a [`Transition`] listing the stat
//! writes to dispatch; [`RoundEngine::snapshot`] is a pure projection of the
//! struct into a [`RoundState`].
//!
//! Retry policy: a wrong guess keeps the current word until the number of
//! wrong tries reaches the working-list size, at which point the round moves
//! on without a correct answer (forced advance).

mod effect;
mod error;
mod state;

pub use effect::{Notice, StatEffect, StatKind, StatTarget, Transition};
pub use error::IgnoredInput;
pub use state::{Progress, RoundPhase, RoundState, RoundStatus, StatusColor};

use rand::Rng;

use crate::labels::Labels;
use crate::picker::Pickers;
use crate::word::Word;

#[derive(Clone, Debug, Default)]
pub struct RoundEngine {
    labels: Labels,
    /// Incremented on every start; tags stat writes so stale merges are dropped.
    epoch: u64,
    phase: RoundPhase,
    words: Vec<Word>,
    index: usize,
    tries: usize,
    pickers: Pickers,
    /// Highest write revision merged into each slot.
    revisions: Vec<u64>,
    translation: String,
    example: String,
    status: RoundStatus,
}

impl RoundEngine {
    pub fn new(labels: Labels) -> Self {
        Self {
            labels,
            ..Self::default()
        }
    }

    pub fn labels(&self) -> &Labels {
        &self.labels
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn tries(&self) -> usize {
        self.tries
    }

    pub fn pickers(&self) -> &Pickers {
        &self.pickers
    }

    /// The word awaiting a guess, if the round is in progress.
    pub fn current_word(&self) -> Option<&Word> {
        match self.phase {
            RoundPhase::InProgress => self.words.get(self.index),
            RoundPhase::Empty | RoundPhase::Ended => None,
        }
    }

    /// Words already completed, skipped or force-advanced, oldest first.
    pub fn history(&self) -> &[Word] {
        &self.words[..self.index.min(self.words.len())]
    }

    /// The word most recently completed, skipped or force-advanced.
    pub fn last_word(&self) -> Option<&Word> {
        self.history().last()
    }

    /// Starts a new round from a candidate pool.
    ///
    /// Learned words are dropped when `exclude_learned` is set, and the
    /// working list is capped at `size`, keeping the pool's order.
    pub fn start<R: Rng + ?Sized>(
        &mut self,
        pool: Vec<Word>,
        size: usize,
        exclude_learned: bool,
        rng: &mut R,
    ) -> Transition {
        self.epoch += 1;
        self.index = 0;
        self.tries = 0;
        self.revisions.clear();
        self.translation.clear();

        let words: Vec<Word> = pool
            .into_iter()
            .filter(|word| !(exclude_learned && word.is_learned))
            .take(size)
            .collect();

        let mut transition = Transition::default();

        if words.is_empty() {
            self.words.clear();
            self.pickers = Pickers::default();
            self.example.clear();
            self.phase = RoundPhase::Empty;
            self.status = RoundStatus::NoWords;
            transition.notice = Some(Notice::NoWords);
            return transition;
        }

        self.pickers = Pickers::build(&words, &self.labels, rng);
        self.revisions = vec![0; words.len()];
        self.words = words;
        self.phase = RoundPhase::InProgress;
        self.status = RoundStatus::Idle;
        self.example = self.labels.select_prompt.clone();

        if let Some(first) = self.words.first().cloned() {
            transition.notice = Some(Notice::NewRound {
                next: first.translation.clone(),
            });
            transition.record(self.target(0, first), StatKind::Shown);
        }
        transition
    }

    /// Scores the combination of the prefix at `left` and the root at `right`
    /// against the current word.
    pub fn handle_combine(
        &mut self,
        left: usize,
        right: usize,
    ) -> Result<Transition, IgnoredInput> {
        if self.pickers.is_empty() {
            return Err(IgnoredInput::EmptyPickers);
        }
        let current = self
            .current_word()
            .cloned()
            .ok_or(IgnoredInput::NoActiveWord)?;
        let prefix = self
            .pickers
            .prefixes
            .get(left)
            .ok_or(IgnoredInput::PrefixOutOfRange {
                index: left,
                len: self.pickers.prefixes.len(),
            })?
            .to_owned();
        let root = self
            .pickers
            .roots
            .get(right)
            .ok_or(IgnoredInput::RootOutOfRange {
                index: right,
                len: self.pickers.roots.len(),
            })?
            .to_owned();

        let slot = self.index;
        let mut transition = Transition::default();

        if current.matches_guess(&prefix, &root) {
            transition.record(self.target(slot, current.clone()), StatKind::Correct);
            self.complete(&current);
            self.advance(&mut transition, RoundStatus::Correct, |next| {
                Notice::Correct { next }
            });
            return Ok(transition);
        }

        self.tries += 1;
        transition.record(self.target(slot, current.clone()), StatKind::Failed);

        if self.tries >= self.words.len() {
            let tries = self.tries;
            self.complete(&current);
            self.advance(&mut transition, RoundStatus::Forced, |next| {
                Notice::ForcedAdvance { tries, next }
            });
        } else {
            transition.notice = Some(Notice::WrongTry {
                prefix: prefix.clone(),
                root: root.clone(),
            });
            self.status = RoundStatus::Wrong { prefix, root };
        }

        Ok(transition)
    }

    /// Gives up on the current word: counts as a failed attempt and always
    /// advances.
    pub fn handle_skip(&mut self) -> Result<Transition, IgnoredInput> {
        let current = self
            .current_word()
            .cloned()
            .ok_or(IgnoredInput::NoActiveWord)?;
        let slot = self.index;

        let mut transition = Transition::default();
        transition.record(self.target(slot, current.clone()), StatKind::Failed);
        self.complete(&current);
        self.advance(&mut transition, RoundStatus::Skipped, |next| {
            Notice::Skipped { next }
        });
        Ok(transition)
    }

    /// Merges a persisted word back into its slot.
    ///
    /// `revision` is the store commit order of the write. Returns `false` when
    /// the write belongs to an earlier round, the slot no longer holds the same
    /// word, or a later commit was already merged.
    pub fn merge(&mut self, epoch: u64, slot: usize, word: Word, revision: u64) -> bool {
        if epoch != self.epoch {
            return false;
        }
        let (Some(existing), Some(merged)) =
            (self.words.get_mut(slot), self.revisions.get_mut(slot))
        else {
            return false;
        };
        if existing.id != word.id || revision <= *merged {
            return false;
        }
        *existing = word;
        *merged = revision;
        true
    }

    /// Replaces every copy of `word` in the working list (flag toggles made
    /// outside the round).
    pub fn refresh(&mut self, word: &Word) -> bool {
        let mut refreshed = false;
        for existing in self.words.iter_mut().filter(|w| w.id == word.id) {
            existing.clone_from(word);
            refreshed = true;
        }
        refreshed
    }

    pub fn snapshot(&self) -> RoundState {
        RoundState {
            next_word: self.current_word().cloned(),
            last_word: self.last_word().cloned(),
            history: self.history().to_vec(),
            translation: self.translation.clone(),
            example: self.example.clone(),
            status: self.status.clone(),
            status_label: self.labels.status(&self.status),
            status_color: self.status.color(),
            round_ended: self.phase != RoundPhase::InProgress,
            progress: Progress {
                max: self.words.len(),
                value: self.tries,
            },
            prefixes: self.pickers.prefixes.clone(),
            roots: self.pickers.roots.clone(),
        }
    }

    fn target(&self, slot: usize, word: Word) -> StatTarget {
        StatTarget {
            epoch: self.epoch,
            slot,
            word,
        }
    }

    /// Moves past `word`, freezing the result text on it.
    fn complete(&mut self, word: &Word) {
        self.index += 1;
        self.tries = 0;
        self.translation = format!("{}\n{}", word.display_form(), word.translation);
        self.example.clone_from(&word.example);
    }

    fn advance(
        &mut self,
        transition: &mut Transition,
        status: RoundStatus,
        notice: impl FnOnce(String) -> Notice,
    ) {
        match self.words.get(self.index).cloned() {
            Some(next) => {
                self.status = status;
                transition.notice = Some(notice(next.translation.clone()));
                transition.record(self.target(self.index, next), StatKind::Shown);
            }
            None => {
                self.phase = RoundPhase::Ended;
                self.status = RoundStatus::Done;
                transition.notice = Some(Notice::RoundDone);
            }
        }
    }
}

//! Statistics writes for round events.
//!
//! Both operations re-read the word by id before mutating, so a write never
//! clobbers counters persisted by an earlier write. When the store no longer
//! has the word, the caller's copy is used instead.

use std::sync::Arc;

use tokio::sync::Mutex;

use drill_core::{StatKind, Word};

use crate::repository::{Result, WordStore};

/// Source of "now" in Unix milliseconds.
pub trait Clock: Send + Sync {
    fn now_millis(&self) -> i64;
}

/// Wall clock backed by `chrono`.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

/// A persisted statistics write.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Recorded {
    pub word: Word,
    /// Commit order across all writes of this recorder, starting at 1.
    pub revision: u64,
}

#[derive(Clone)]
pub struct StatRecorder {
    store: Arc<dyn WordStore>,
    clock: Arc<dyn Clock>,
    /// Held across each read-modify-write so concurrent deltas all land;
    /// counts committed writes.
    commits: Arc<Mutex<u64>>,
}

impl StatRecorder {
    pub fn new(store: Arc<dyn WordStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            commits: Arc::new(Mutex::new(0)),
        }
    }

    /// Bumps `times_shown` and stamps `last_shown_at`.
    pub async fn record_shown(&self, word: &Word) -> Result<Word> {
        Ok(self.record(word, StatKind::Shown).await?.word)
    }

    /// Bumps `tries_count` and exactly one of the correct/failed counters.
    pub async fn record_attempt(&self, word: &Word, correct: bool) -> Result<Word> {
        Ok(self.record(word, StatKind::attempt(correct)).await?.word)
    }

    pub async fn record(&self, word: &Word, kind: StatKind) -> Result<Recorded> {
        let mut commits = self.commits.lock().await;

        let mut current = self
            .store
            .get_by_id(word.id)
            .await?
            .unwrap_or_else(|| word.clone());
        let now = self.clock.now_millis();

        match kind {
            StatKind::Shown => current.stats.record_shown(now),
            StatKind::Correct => current.stats.record_attempt(true, now),
            StatKind::Failed => current.stats.record_attempt(false, now),
        }

        let word = self.store.update(current).await?;
        *commits += 1;
        Ok(Recorded {
            word,
            revision: *commits,
        })
    }
}

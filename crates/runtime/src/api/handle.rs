//! Cloneable façade for issuing commands to the round worker.
//!
//! [`RoundHandle`] hides channel plumbing and offers async helpers for
//! driving a round or streaming events from specific topics.
use tokio::sync::{broadcast, mpsc, oneshot};

use drill_core::{Difficulty, RoundFilter, RoundState, Word};

use super::errors::{Result, RuntimeError};
use crate::catalog::WordFlag;
use crate::events::{Event, EventBus, Topic};
use crate::workers::Command;

/// Client-facing handle to interact with the round session
#[derive(Clone)]
pub struct RoundHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl RoundHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    async fn request<T>(&self, command: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(command(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Start a new round with `filter` (`None` = mixed mode) and keep it as
    /// the active filter.
    pub async fn start_round(&self, filter: Option<RoundFilter>) -> Result<RoundState> {
        self.request(|reply| Command::StartRound { filter, reply })
            .await
    }

    /// Start a new round with the active filter.
    pub async fn restart(&self) -> Result<RoundState> {
        self.request(|reply| Command::Restart { reply }).await
    }

    /// Change the round size; restarts the round when the size changes.
    pub async fn set_round_size(&self, size: usize) -> Result<RoundState> {
        self.request(|reply| Command::SetRoundSize { size, reply })
            .await
    }

    pub async fn set_difficulty(&self, difficulty: Difficulty) -> Result<RoundState> {
        self.set_round_size(difficulty.round_size()).await
    }

    /// Guess the combination of picker entries `left` (prefix) and `right`
    /// (root).
    ///
    /// Stale indices return [`RuntimeError::InputIgnored`] and leave the round
    /// untouched.
    pub async fn combine(&self, left: usize, right: usize) -> Result<RoundState> {
        self.request(|reply| Command::Combine { left, right, reply })
            .await?
    }

    /// Give up on the current word.
    pub async fn skip(&self) -> Result<RoundState> {
        self.request(|reply| Command::Skip { reply }).await?
    }

    /// Query the current snapshot (read-only)
    pub async fn snapshot(&self) -> Result<RoundState> {
        self.request(|reply| Command::Snapshot { reply }).await
    }

    /// Filter used by the current round.
    pub async fn active_filter(&self) -> Result<Option<RoundFilter>> {
        self.request(|reply| Command::ActiveFilter { reply }).await
    }

    /// Flip the favorite flag of the last answered word.
    pub async fn toggle_favorite_last(&self) -> Result<Word> {
        self.toggle_history(None, WordFlag::Favorite).await
    }

    /// Flip the learned flag of the last answered word.
    pub async fn toggle_learned_last(&self) -> Result<Word> {
        self.toggle_history(None, WordFlag::Learned).await
    }

    /// Flip `flag` on a finished word of the current round.
    ///
    /// `position` indexes [`RoundState::history`] (oldest first); `None`
    /// picks the most recent word.
    pub async fn toggle_history(&self, position: Option<usize>, flag: WordFlag) -> Result<Word> {
        self.request(|reply| Command::ToggleHistory {
            position,
            flag,
            reply,
        })
        .await?
    }

    /// Wait until every pending statistics write has resolved and been
    /// merged back into the round.
    pub async fn settle(&self) -> Result<()> {
        self.request(|reply| Command::Settle { reply }).await
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Round` - Snapshots and transient notices
    /// - `Topic::Stats` - Statistics write results
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use runtime::Topic;
    ///
    /// let mut round_rx = handle.subscribe(Topic::Round);
    /// while let Ok(event) = round_rx.recv().await {
    ///     // Render the snapshot
    /// }
    /// ```
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Get a reference to the event bus for advanced usage
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }
}

//! Round worker that owns the authoritative [`RoundEngine`].
//!
//! Receives commands from [`crate::RoundHandle`], applies them to the engine,
//! publishes snapshots and notices, and runs the statistics writes each
//! transition requests in the background. Write results are merged back
//! between commands; a snapshot never waits for a write.

use rand::rngs::StdRng;
use tokio::sync::{mpsc, oneshot};
use tokio::task::{JoinError, JoinSet};
use tracing::{debug, info, warn};

use drill_core::{
    IgnoredInput, RoundConfig, RoundEngine, RoundFilter, RoundState, StatEffect, StatKind,
    StatTarget, Transition, Word,
};

use crate::api::{Result, RuntimeError};
use crate::catalog::{WordCatalog, WordFlag};
use crate::events::{Event, EventBus, RoundEvent, StatsEvent};
use crate::pool::PoolSelector;
use crate::repository::RepositoryError;
use crate::stats::{Recorded, StatRecorder};

/// Commands that can be sent to the round worker
pub enum Command {
    /// Start a round with a new active filter.
    StartRound {
        filter: Option<RoundFilter>,
        reply: oneshot::Sender<RoundState>,
    },
    /// Start a round with the active filter.
    Restart { reply: oneshot::Sender<RoundState> },
    /// Change the round size, restarting when it differs.
    SetRoundSize {
        size: usize,
        reply: oneshot::Sender<RoundState>,
    },
    Combine {
        left: usize,
        right: usize,
        reply: oneshot::Sender<Result<RoundState>>,
    },
    Skip {
        reply: oneshot::Sender<Result<RoundState>>,
    },
    /// Query the current snapshot (read-only).
    Snapshot { reply: oneshot::Sender<RoundState> },
    ActiveFilter {
        reply: oneshot::Sender<Option<RoundFilter>>,
    },
    /// Flip a flag on a finished word of the round (`None` = the last one).
    ToggleHistory {
        position: Option<usize>,
        flag: WordFlag,
        reply: oneshot::Sender<Result<Word>>,
    },
    /// Reply once no statistics write is pending.
    Settle { reply: oneshot::Sender<()> },
}

/// Outcome of one background statistics write.
struct WriteOutcome {
    target: StatTarget,
    kind: StatKind,
    result: std::result::Result<Recorded, RepositoryError>,
}

/// Services the worker drives on behalf of the round.
pub struct RoundServices {
    pub selector: PoolSelector,
    pub recorder: StatRecorder,
    pub catalog: WordCatalog,
}

/// Background task that processes round commands.
pub struct RoundWorker {
    engine: RoundEngine,
    config: RoundConfig,
    filter: Option<RoundFilter>,
    services: RoundServices,
    rng: StdRng,
    writes: JoinSet<WriteOutcome>,
    command_rx: mpsc::Receiver<Command>,
    event_bus: EventBus,
}

impl RoundWorker {
    pub fn new(
        engine: RoundEngine,
        config: RoundConfig,
        services: RoundServices,
        rng: StdRng,
        command_rx: mpsc::Receiver<Command>,
        event_bus: EventBus,
    ) -> Self {
        info!(round_size = config.round_size, "RoundWorker initialized");

        Self {
            engine,
            config,
            filter: None,
            services,
            rng,
            writes: JoinSet::new(),
            command_rx,
            event_bus,
        }
    }

    /// Main worker loop.
    ///
    /// Finished writes are merged before the next command is handled. Pending
    /// writes are drained once every handle is dropped.
    pub async fn run(mut self) {
        loop {
            tokio::select! {
                biased;
                Some(joined) = self.writes.join_next(), if !self.writes.is_empty() => {
                    self.on_write(joined);
                }
                cmd = self.command_rx.recv() => match cmd {
                    Some(cmd) => self.handle_command(cmd).await,
                    None => break,
                },
            }
        }

        self.drain_writes().await;
        debug!("RoundWorker stopped");
    }

    async fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::StartRound { filter, reply } => {
                self.filter = filter;
                let state = self.start_round().await;
                if reply.send(state).is_err() {
                    debug!("StartRound reply channel closed (caller dropped)");
                }
            }
            Command::Restart { reply } => {
                let state = self.start_round().await;
                if reply.send(state).is_err() {
                    debug!("Restart reply channel closed (caller dropped)");
                }
            }
            Command::SetRoundSize { size, reply } => {
                let config = RoundConfig::with_round_size(size);
                let state = if config != self.config {
                    info!(from = self.config.round_size, to = config.round_size, "round size changed");
                    self.config = config;
                    self.start_round().await
                } else {
                    self.engine.snapshot()
                };
                if reply.send(state).is_err() {
                    debug!("SetRoundSize reply channel closed (caller dropped)");
                }
            }
            Command::Combine { left, right, reply } => {
                let result = self.engine.handle_combine(left, right);
                let result = self.settle_transition(result);
                if reply.send(result).is_err() {
                    debug!("Combine reply channel closed (caller dropped)");
                }
            }
            Command::Skip { reply } => {
                let result = self.engine.handle_skip();
                let result = self.settle_transition(result);
                if reply.send(result).is_err() {
                    debug!("Skip reply channel closed (caller dropped)");
                }
            }
            Command::Snapshot { reply } => {
                if reply.send(self.engine.snapshot()).is_err() {
                    debug!("Snapshot reply channel closed (caller dropped)");
                }
            }
            Command::ActiveFilter { reply } => {
                if reply.send(self.filter.clone()).is_err() {
                    debug!("ActiveFilter reply channel closed (caller dropped)");
                }
            }
            Command::ToggleHistory {
                position,
                flag,
                reply,
            } => {
                let result = self.toggle_history(position, flag).await;
                if reply.send(result).is_err() {
                    debug!("ToggleHistory reply channel closed (caller dropped)");
                }
            }
            Command::Settle { reply } => {
                self.drain_writes().await;
                if reply.send(()).is_err() {
                    debug!("Settle reply channel closed (caller dropped)");
                }
            }
        }
    }

    async fn start_round(&mut self) -> RoundState {
        let size = self.config.round_size;
        let pool = self
            .services
            .selector
            .select(self.filter.as_ref(), size)
            .await;
        let exclude_learned = self.filter.is_none();

        let transition = self
            .engine
            .start(pool, size, exclude_learned, &mut self.rng);

        info!(
            epoch = self.engine.epoch(),
            words = self.engine.words().len(),
            filter = ?self.filter,
            "round started"
        );

        self.apply(transition)
    }

    fn settle_transition(
        &mut self,
        result: std::result::Result<Transition, IgnoredInput>,
    ) -> Result<RoundState> {
        match result {
            Ok(transition) => Ok(self.apply(transition)),
            Err(reason) => {
                debug!(%reason, "input ignored");
                Err(RuntimeError::InputIgnored(reason))
            }
        }
    }

    /// Dispatches the transition's writes and publishes the new snapshot.
    fn apply(&mut self, transition: Transition) -> RoundState {
        let Transition { effects, notice } = transition;

        for effect in effects {
            self.dispatch(effect);
        }

        if let Some(notice) = notice {
            let message = self.engine.labels().notice(&notice);
            self.event_bus
                .publish(Event::Round(RoundEvent::Notice { notice, message }));
        }

        let snapshot = self.engine.snapshot();
        self.event_bus
            .publish(Event::Round(RoundEvent::Snapshot(snapshot.clone())));
        snapshot
    }

    fn dispatch(&mut self, effect: StatEffect) {
        let recorder = self.services.recorder.clone();
        self.writes.spawn(async move {
            let StatEffect { target, kind } = effect;
            let result = recorder.record(&target.word, kind).await;
            WriteOutcome {
                target,
                kind,
                result,
            }
        });
    }

    fn on_write(&mut self, joined: std::result::Result<WriteOutcome, JoinError>) {
        let outcome = match joined {
            Ok(outcome) => outcome,
            Err(error) => {
                warn!(%error, "stat write task failed");
                return;
            }
        };

        let WriteOutcome {
            target,
            kind,
            result,
        } = outcome;

        match result {
            Ok(Recorded { word, revision }) => {
                let merged = self
                    .engine
                    .merge(target.epoch, target.slot, word.clone(), revision);
                debug!(
                    id = %word.id,
                    kind = kind.as_str(),
                    epoch = target.epoch,
                    revision,
                    merged,
                    "stat write resolved"
                );
                self.event_bus
                    .publish(Event::Stats(StatsEvent::Recorded { word, kind }));
            }
            Err(error) => {
                warn!(
                    id = %target.word.id,
                    kind = kind.as_str(),
                    %error,
                    "stat write failed"
                );
                self.event_bus.publish(Event::Stats(StatsEvent::WriteFailed {
                    id: target.word.id,
                    kind,
                    error: error.to_string(),
                }));
            }
        }
    }

    async fn drain_writes(&mut self) {
        while let Some(joined) = self.writes.join_next().await {
            self.on_write(joined);
        }
    }

    async fn toggle_history(&mut self, position: Option<usize>, flag: WordFlag) -> Result<Word> {
        let history = self.engine.history();
        let word = match position {
            None => history.last().ok_or(RuntimeError::NoLastWord)?,
            Some(position) => history
                .get(position)
                .ok_or(RuntimeError::HistoryOutOfRange {
                    position,
                    len: history.len(),
                })?,
        };
        let id = word.id;

        // Pending writes re-read the word too; let them land first.
        self.drain_writes().await;

        let word = self.services.catalog.toggle(id, flag).await?;
        self.engine.refresh(&word);
        self.event_bus
            .publish(Event::Round(RoundEvent::Snapshot(self.engine.snapshot())));
        Ok(word)
    }
}

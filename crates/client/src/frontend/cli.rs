//! Line-based terminal frontend.
use std::io::{self, Stdout, Write};

use anyhow::Result;
use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Stdin};
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, warn};

use runtime::{
    Event, RoundEvent, RoundHandle, RuntimeError, StatsEvent, Topic, WordCatalog, WordFlag,
};

use super::Frontend;
use super::command::{HELP, Input};
use super::render::{self, StatsView};

/// Reads commands line by line and prints every published snapshot.
pub struct CliFrontend<R, W> {
    input: R,
    out: W,
}

impl CliFrontend<BufReader<Stdin>, Stdout> {
    pub fn stdio() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()), io::stdout())
    }
}

impl<R, W> CliFrontend<R, W> {
    pub fn new(input: R, out: W) -> Self {
        Self { input, out }
    }

    pub fn into_output(self) -> W {
        self.out
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

#[async_trait]
impl<R, W> Frontend for CliFrontend<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: Write + Send,
{
    async fn run(&mut self, handle: RoundHandle, catalog: WordCatalog) -> Result<()> {
        let mut round_rx = handle.subscribe(Topic::Round);
        let mut stats_rx = handle.subscribe(Topic::Stats);
        let out = &mut self.out;
        let mut lines = (&mut self.input).lines();

        writeln!(out, "Type 'help' for commands.")?;
        handle.start_round(None).await?;

        loop {
            tokio::select! {
                biased;
                event = round_rx.recv() => match event {
                    Ok(Event::Round(RoundEvent::Snapshot(state))) => render::render_state(out, &state)?,
                    Ok(Event::Round(RoundEvent::Notice { message, .. })) => render::render_notice(out, &message)?,
                    Ok(_) => {}
                    Err(RecvError::Lagged(skipped)) => warn!(skipped, "round events lagged"),
                    Err(RecvError::Closed) => break,
                },
                event = stats_rx.recv() => match event {
                    Ok(Event::Stats(StatsEvent::WriteFailed { id, error, .. })) => {
                        render::render_error(out, &format!("Could not save progress for {id}: {error}"))?;
                    }
                    Ok(_) => {}
                    Err(RecvError::Lagged(skipped)) => debug!(skipped, "stats events lagged"),
                    Err(RecvError::Closed) => break,
                },
                line = lines.next_line() => {
                    let Some(line) = line? else { break };
                    if line.trim().is_empty() {
                        continue;
                    }
                    if handle_line(&line, &handle, &catalog, out).await? == Flow::Quit {
                        break;
                    }
                }
            }
        }

        debug!("CLI frontend stopped");
        Ok(())
    }
}

async fn handle_line<W: Write>(
    line: &str,
    handle: &RoundHandle,
    catalog: &WordCatalog,
    out: &mut W,
) -> Result<Flow> {
    let input = match line.parse::<Input>() {
        Ok(input) => input,
        Err(message) => {
            render::render_error(out, &message)?;
            return Ok(Flow::Continue);
        }
    };

    let outcome = match input {
        Input::Combine { left, right } => handle.combine(left, right).await.map(|_| None),
        Input::Skip => handle.skip().await.map(|_| None),
        Input::NewRound => handle.restart().await.map(|_| None),
        Input::Filter(filter) => handle.start_round(filter).await.map(|_| None),
        Input::Difficulty(difficulty) => handle.set_difficulty(difficulty).await.map(|_| None),
        Input::ToggleFavorite(position) => handle
            .toggle_history(position, WordFlag::Favorite)
            .await
            .map(|word| {
                let change = if word.is_favorite { "added to" } else { "removed from" };
                Some(format!("{} {} favorites", word.display_form(), change))
            }),
        Input::ToggleLearned(position) => handle
            .toggle_history(position, WordFlag::Learned)
            .await
            .map(|word| {
                let change = if word.is_learned {
                    "marked as learned"
                } else {
                    "back in practice"
                };
                Some(format!("{} {}", word.display_form(), change))
            }),
        Input::Stats => {
            render::render_stats(out, &stats_view(catalog).await?)?;
            Ok(None)
        }
        Input::Help => {
            writeln!(out, "{HELP}")?;
            Ok(None)
        }
        Input::Quit => return Ok(Flow::Quit),
    };

    match outcome {
        Ok(Some(message)) => render::render_notice(out, &message)?,
        Ok(None) => {}
        Err(RuntimeError::InputIgnored(reason)) => {
            render::render_error(out, &format!("Ignored: {reason}"))?;
        }
        Err(RuntimeError::NoLastWord) => {
            render::render_error(out, "Answer a word first.")?;
        }
        Err(RuntimeError::HistoryOutOfRange { len, .. }) => {
            render::render_error(out, &format!("Only {len} words are finished."))?;
        }
        Err(error) => return Err(error.into()),
    }
    Ok(Flow::Continue)
}

async fn stats_view(catalog: &WordCatalog) -> Result<StatsView> {
    let limit = WordCatalog::DEFAULT_LIMIT;
    Ok(StatsView {
        recent_failures: catalog.recent_failures(limit).await?,
        top_correct: catalog.top_correct(limit).await?,
        top_failed: catalog.top_failed(limit).await?,
        favorites: catalog.favorites().await?,
        learned: catalog.learned().await?,
        prefixes: catalog.prefix_progress().await?,
    })
}

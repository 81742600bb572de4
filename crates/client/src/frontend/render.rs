//! Plain-terminal rendering of round snapshots and catalog views.
use std::io::{self, Write};

use crossterm::style::{Color, Stylize};
use drill_core::{Picker, PrefixProgress, RoundState, StatusColor, Word};

const BAR_WIDTH: usize = 20;

fn color(tag: StatusColor) -> Color {
    match tag {
        StatusColor::Neutral => Color::Cyan,
        StatusColor::Success => Color::Green,
        StatusColor::Warning => Color::Yellow,
        StatusColor::Error => Color::Red,
    }
}

/// `[####------] 2/5`: wrong tries spent against the retry budget.
pub fn progress_bar(value: usize, max: usize) -> String {
    let filled = if max == 0 {
        0
    } else {
        (value.min(max) * BAR_WIDTH) / max
    };
    format!(
        "[{}{}] {}/{}",
        "#".repeat(filled),
        "-".repeat(BAR_WIDTH - filled),
        value,
        max
    )
}

fn picker_line(picker: &Picker) -> String {
    picker
        .display()
        .iter()
        .enumerate()
        .map(|(i, label)| format!("{}) {}", i + 1, label))
        .collect::<Vec<_>>()
        .join("  ")
}

pub fn render_state<W: Write>(out: &mut W, state: &RoundState) -> io::Result<()> {
    writeln!(out)?;
    match &state.next_word {
        Some(word) => writeln!(out, "{} {}", "Translate:".bold(), word.translation)?,
        None if state.round_ended => writeln!(out, "{}", "Round over. Type 'n' for a new one.".bold())?,
        None => {}
    }

    if !state.translation.is_empty() {
        let mut lines = state.translation.lines();
        if let Some(form) = lines.next() {
            let meaning = lines.collect::<Vec<_>>().join(" ");
            writeln!(out, "{} {} ({})", "Last:".bold(), form, meaning)?;
        }
    }
    if !state.example.is_empty() {
        writeln!(out, "{}", state.example.as_str().italic())?;
    }

    if !state.history.is_empty() {
        let finished: Vec<String> = state
            .history
            .iter()
            .enumerate()
            .map(|(i, word)| {
                let mark = if word.is_favorite { "*" } else { "" };
                format!("{}) {}{}", i + 1, word.display_form(), mark)
            })
            .collect();
        writeln!(out, "{} {}", "Finished:".bold(), finished.join("  "))?;
    }

    if !state.status_label.is_empty() {
        let label = state.status_label.as_str();
        match state.status_color {
            Some(tag) => writeln!(out, "{}", label.with(color(tag)))?,
            None => writeln!(out, "{label}")?,
        }
    }

    if !state.round_ended {
        writeln!(
            out,
            "Tries {}",
            progress_bar(state.progress.value, state.progress.max)
        )?;
        writeln!(out, "{} {}", "Prefixes:".bold(), picker_line(&state.prefixes))?;
        writeln!(out, "{} {}", "Roots:   ".bold(), picker_line(&state.roots))?;
    }

    out.flush()
}

pub fn render_notice<W: Write>(out: &mut W, message: &str) -> io::Result<()> {
    writeln!(out, "{}", format!("» {message}").with(Color::Magenta))?;
    out.flush()
}

pub fn render_error<W: Write>(out: &mut W, message: &str) -> io::Result<()> {
    writeln!(out, "{}", message.with(Color::DarkRed))?;
    out.flush()
}

/// Catalog views shown by the `stats` command.
#[derive(Debug, Default)]
pub struct StatsView {
    pub recent_failures: Vec<Word>,
    pub top_correct: Vec<Word>,
    pub top_failed: Vec<Word>,
    pub favorites: Vec<Word>,
    pub learned: Vec<Word>,
    pub prefixes: Vec<PrefixProgress>,
}

pub fn render_stats<W: Write>(out: &mut W, view: &StatsView) -> io::Result<()> {
    word_section(out, "Recent failures", &view.recent_failures)?;
    word_section(out, "Most correct", &view.top_correct)?;
    word_section(out, "Most failed", &view.top_failed)?;
    word_section(out, "Favorites", &view.favorites)?;
    word_section(out, "Learned", &view.learned)?;

    writeln!(out, "{}", "Prefix progress".bold())?;
    if view.prefixes.is_empty() {
        writeln!(out, "  (no activity yet)")?;
    }
    for progress in &view.prefixes {
        writeln!(
            out,
            "  {:<8} {:>3}% correct ({} ok, {} failed, {} words)",
            progress.prefix,
            progress.percent(),
            progress.correct,
            progress.failed,
            progress.total
        )?;
    }
    out.flush()
}

fn word_section<W: Write>(out: &mut W, title: &str, words: &[Word]) -> io::Result<()> {
    writeln!(out, "{}", title.bold())?;
    if words.is_empty() {
        writeln!(out, "  (none)")?;
    }
    for word in words {
        let stats = &word.stats;
        writeln!(
            out,
            "  {:<20} {:<24} +{} -{}",
            word.display_form(),
            word.translation,
            stats.correct_count,
            stats.failed_count
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use drill_core::{Labels, RoundEngine, WordEntry, WordId};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn rendered(state: &RoundState) -> String {
        let mut out = Vec::new();
        render_state(&mut out, state).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn progress_bar_fills_proportionally() {
        assert_eq!(progress_bar(0, 4), format!("[{}] 0/4", "-".repeat(BAR_WIDTH)));
        assert_eq!(
            progress_bar(2, 4),
            format!("[{}{}] 2/4", "#".repeat(10), "-".repeat(10))
        );
        assert_eq!(progress_bar(0, 0), format!("[{}] 0/0", "-".repeat(BAR_WIDTH)));
    }

    #[test]
    fn in_progress_snapshot_lists_numbered_pickers() {
        let words = vec![
            Word::from_entry(WordId(1), WordEntry::new("be", "kommen", "to receive", "")),
            Word::from_entry(WordId(2), WordEntry::new("ver", "stehen", "to understand", "")),
        ];
        let mut engine = RoundEngine::new(Labels::default());
        engine.start(words, 5, false, &mut StdRng::seed_from_u64(3));

        let text = rendered(&engine.snapshot());

        assert!(text.contains("Translate:"));
        assert!(text.contains("1) "));
        assert!(text.contains("2) "));
        assert!(text.contains("kommen"));
        assert!(text.contains("0/2"));
    }

    #[test]
    fn ended_snapshot_hides_pickers() {
        let mut engine = RoundEngine::new(Labels::default());
        engine.start(Vec::new(), 5, false, &mut StdRng::seed_from_u64(3));

        let text = rendered(&engine.snapshot());

        assert!(text.contains("Round over"));
        assert!(text.contains(&Labels::default().status_no_words));
        assert!(!text.contains("Prefixes"));
    }
}

//! Ranking queries over word statistics.
//!
//! All functions are pure over a word slice so that every store backend shares
//! the same ordering rules.

use std::cmp::Reverse;
use std::collections::BTreeMap;

use crate::word::Word;

/// Default length of the ranked lists.
pub const DEFAULT_LIST_LIMIT: usize = 20;

/// A distinct filter value with the number of words carrying it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LabelCount {
    pub label: String,
    pub count: usize,
}

/// Progress of one prefix, judged by each word's most recent attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PrefixProgress {
    pub prefix: String,
    pub correct: usize,
    pub failed: usize,
    pub total: usize,
}

impl PrefixProgress {
    /// Share of words whose last attempt was correct, 0..=100.
    pub fn percent(&self) -> usize {
        if self.total == 0 {
            0
        } else {
            self.correct * 100 / self.total
        }
    }
}

fn percent_of(count: u32, tries: u32) -> u32 {
    if tries == 0 { 0 } else { count * 100 / tries }
}

fn ranked<K: Ord>(
    words: &[Word],
    keep: impl Fn(&Word) -> bool,
    key: impl Fn(&Word) -> K,
    limit: usize,
) -> Vec<Word> {
    let mut selected: Vec<Word> = words.iter().filter(|w| keep(w)).cloned().collect();
    selected.sort_by_key(|w| key(w));
    selected.truncate(limit);
    selected
}

pub fn recent_failures(words: &[Word], limit: usize) -> Vec<Word> {
    ranked(
        words,
        |w| w.stats.failed_count > 0,
        |w| Reverse(w.stats.last_failed_at),
        limit,
    )
}

pub fn recent_correct(words: &[Word], limit: usize) -> Vec<Word> {
    ranked(
        words,
        |w| w.stats.correct_count > 0,
        |w| Reverse(w.stats.last_correct_at),
        limit,
    )
}

/// Most often solved: count, then hit rate, then total tries.
pub fn top_correct(words: &[Word], limit: usize) -> Vec<Word> {
    ranked(
        words,
        |w| w.stats.correct_count > 0,
        |w| {
            let s = &w.stats;
            Reverse((
                s.correct_count,
                percent_of(s.correct_count, s.tries_count),
                s.tries_count,
            ))
        },
        limit,
    )
}

pub fn top_failed(words: &[Word], limit: usize) -> Vec<Word> {
    ranked(
        words,
        |w| w.stats.failed_count > 0,
        |w| {
            let s = &w.stats;
            Reverse((
                s.failed_count,
                percent_of(s.failed_count, s.tries_count),
                s.tries_count,
            ))
        },
        limit,
    )
}

pub fn learned_sorted(words: &[Word]) -> Vec<Word> {
    ranked(
        words,
        |w| w.is_learned,
        |w| Reverse(w.stats.balance()),
        usize::MAX,
    )
}

pub fn favorites_sorted(words: &[Word]) -> Vec<Word> {
    ranked(
        words,
        |w| w.is_favorite,
        |w| Reverse(w.stats.balance()),
        usize::MAX,
    )
}

/// Per-prefix progress, sorted by prefix. Prefixes without any attempt are
/// left out.
pub fn prefix_progress(words: &[Word]) -> Vec<PrefixProgress> {
    let mut groups: BTreeMap<&str, PrefixProgress> = BTreeMap::new();
    for word in words {
        let entry = groups
            .entry(word.prefix.as_str())
            .or_insert_with(|| PrefixProgress {
                prefix: word.prefix.clone(),
                correct: 0,
                failed: 0,
                total: 0,
            });
        entry.total += 1;
        match word.stats.last_attempt_correct() {
            Some(true) => entry.correct += 1,
            Some(false) => entry.failed += 1,
            None => {}
        }
    }
    groups
        .into_values()
        .filter(|p| p.correct > 0 || p.failed > 0)
        .collect()
}

/// Distinct values produced by `label`, sorted, with occurrence counts.
pub fn label_counts<'a>(words: &'a [Word], label: impl Fn(&'a Word) -> &'a str) -> Vec<LabelCount> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for word in words {
        *counts.entry(label(word)).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .map(|(label, count)| LabelCount {
            label: label.to_owned(),
            count,
        })
        .collect()
}

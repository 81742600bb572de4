//! Picker builder: scrambled, deduplicated option lists for one round.
//!
//! Several words in a round may share a prefix or a root. Each picker exposes
//! every distinct raw value exactly once and hints at ambiguity with an
//! occurrence suffix (`"be (x3)"`). Raw values are what guesses are matched
//! against; display strings are for rendering only.

use std::collections::HashMap;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::labels::Labels;
use crate::word::Word;

/// One selectable label list: raw values paired index-wise with display strings.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Picker {
    items: Vec<String>,
    display: Vec<String>,
}

impl Picker {
    /// Shuffles `values`, keeps each distinct value once (first occurrence
    /// after the shuffle) and labels it with its occurrence count.
    pub fn build<R, F>(mut values: Vec<String>, rng: &mut R, label: F) -> Self
    where
        R: Rng + ?Sized,
        F: Fn(&str) -> String,
    {
        values.shuffle(rng);

        let mut counts: HashMap<&str, usize> = HashMap::new();
        for value in &values {
            *counts.entry(value.as_str()).or_insert(0) += 1;
        }

        let mut items: Vec<String> = Vec::with_capacity(counts.len());
        for value in &values {
            if !items.contains(value) {
                items.push(value.clone());
            }
        }

        let display = items
            .iter()
            .map(|item| {
                let base = label(item);
                match counts.get(item.as_str()).copied().unwrap_or(0) {
                    count if count > 1 => format!("{base} (x{count})"),
                    _ => base,
                }
            })
            .collect();

        Self { items, display }
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn display(&self) -> &[String] {
        &self.display
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.items.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// The two pickers presented for a round.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pickers {
    pub prefixes: Picker,
    pub roots: Picker,
}

impl Pickers {
    pub fn build<R: Rng + ?Sized>(words: &[Word], labels: &Labels, rng: &mut R) -> Self {
        let prefixes = Picker::build(
            words.iter().map(|word| word.prefix.clone()).collect(),
            rng,
            |prefix| labels.prefix(prefix).to_owned(),
        );
        let roots = Picker::build(
            words.iter().map(Word::root_label).collect(),
            rng,
            str::to_owned,
        );
        Self { prefixes, roots }
    }

    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty() || self.roots.is_empty()
    }
}

//! In-memory word index shared by every store backend.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Mutex, RwLock};

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use drill_core::filter::admits;
use drill_core::{RoundFilter, Word, WordEntry, WordId};

use super::{RepositoryError, Result};

/// Serialized form of a word index (the file store's on-disk document).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordDocument {
    #[serde(default)]
    pub version: Option<u32>,
    #[serde(default)]
    pub next_id: u32,
    #[serde(default)]
    pub words: Vec<Word>,
}

/// Words keyed by id plus the id counter and synced word-list version.
#[derive(Clone, Debug)]
pub struct WordIndex {
    words: BTreeMap<WordId, Word>,
    next_id: u32,
    version: Option<u32>,
}

impl Default for WordIndex {
    fn default() -> Self {
        Self {
            words: BTreeMap::new(),
            next_id: 1,
            version: None,
        }
    }
}

impl WordIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds an index; the id counter never falls behind stored ids.
    pub fn from_document(document: WordDocument) -> Self {
        let max_id = document.words.iter().map(|w| w.id.0).max().unwrap_or(0);
        let words = document.words.into_iter().map(|w| (w.id, w)).collect();
        Self {
            words,
            next_id: document.next_id.max(max_id + 1),
            version: document.version,
        }
    }

    pub fn to_document(&self) -> WordDocument {
        WordDocument {
            version: self.version,
            next_id: self.next_id,
            words: self.words.values().cloned().collect(),
        }
    }

    pub fn matching(&self, filter: Option<&RoundFilter>) -> Vec<Word> {
        self.words
            .values()
            .filter(|word| admits(filter, word))
            .cloned()
            .collect()
    }

    pub fn get(&self, id: WordId) -> Option<&Word> {
        self.words.get(&id)
    }

    pub fn upsert(&mut self, word: Word) -> Word {
        if word.id.0 >= self.next_id {
            self.next_id = word.id.0 + 1;
        }
        self.words.insert(word.id, word.clone());
        word
    }

    pub fn insert_entries(&mut self, entries: Vec<WordEntry>) -> Vec<Word> {
        entries
            .into_iter()
            .map(|entry| {
                let word = Word::from_entry(WordId(self.next_id), entry);
                self.next_id += 1;
                self.words.insert(word.id, word.clone());
                word
            })
            .collect()
    }

    pub fn delete(&mut self, ids: &[WordId]) -> usize {
        ids.iter()
            .filter(|id| self.words.remove(*id).is_some())
            .count()
    }

    pub fn all(&self) -> Vec<Word> {
        self.words.values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn version(&self) -> Option<u32> {
        self.version
    }

    pub fn set_version(&mut self, version: u32) {
        self.version = Some(version);
    }

    pub fn distinct_prefixes(&self) -> Vec<String> {
        let prefixes: BTreeSet<&str> = self.words.values().map(|w| w.prefix.as_str()).collect();
        prefixes.into_iter().map(str::to_owned).collect()
    }

    pub fn distinct_roots(&self) -> Vec<String> {
        let roots: BTreeSet<&str> = self.words.values().map(|w| w.root.as_str()).collect();
        roots.into_iter().map(str::to_owned).collect()
    }
}

/// Lock-guarded index with its own sampling RNG.
///
/// Guards never outlive a closure, so callers can hold no lock across an
/// `.await`.
pub(crate) struct SharedIndex {
    index: RwLock<WordIndex>,
    rng: Mutex<StdRng>,
}

impl SharedIndex {
    pub(crate) fn new(index: WordIndex, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            index: RwLock::new(index),
            rng: Mutex::new(rng),
        }
    }

    pub(crate) fn read<T>(&self, f: impl FnOnce(&WordIndex) -> T) -> Result<T> {
        let index = self
            .index
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(f(&index))
    }

    pub(crate) fn write<T>(&self, f: impl FnOnce(&mut WordIndex) -> T) -> Result<T> {
        let mut index = self
            .index
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(f(&mut index))
    }

    pub(crate) fn sample(&self, filter: Option<&RoundFilter>, limit: usize) -> Result<Vec<Word>> {
        let mut candidates = self.read(|index| index.matching(filter))?;
        let mut rng = self.rng.lock().map_err(|_| RepositoryError::LockPoisoned)?;
        candidates.shuffle(&mut *rng);
        candidates.truncate(limit);
        Ok(candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(prefix: &str, root: &str) -> WordEntry {
        WordEntry::new(prefix, root, format!("{prefix}{root}"), "")
    }

    #[test]
    fn ids_are_sequential_from_one() {
        let mut index = WordIndex::new();
        let words = index.insert_entries(vec![entry("be", "kommen"), entry("ver", "stehen")]);
        assert_eq!(words[0].id, WordId(1));
        assert_eq!(words[1].id, WordId(2));

        index.delete(&[WordId(2)]);
        let next = index.insert_entries(vec![entry("an", "rufen")]);
        assert_eq!(next[0].id, WordId(3));
    }

    #[test]
    fn document_round_trip_keeps_counter_ahead_of_ids() {
        let mut index = WordIndex::new();
        index.insert_entries(vec![entry("be", "kommen"), entry("ab", "fahren")]);
        index.set_version(4);

        let mut document = index.to_document();
        document.next_id = 0;
        let restored = WordIndex::from_document(document);

        assert_eq!(restored.len(), 2);
        assert_eq!(restored.version(), Some(4));
        assert_eq!(restored.to_document().next_id, 3);
    }

    #[test]
    fn sample_respects_filter_and_limit() {
        let mut index = WordIndex::new();
        let mut words = index.insert_entries(vec![
            entry("be", "kommen"),
            entry("be", "stehen"),
            entry("ver", "stehen"),
            entry("be", "finden"),
        ]);
        words[0].is_learned = true;
        index.upsert(words[0].clone());

        let shared = SharedIndex::new(index, Some(11));

        let mixed = shared.sample(None, 10).unwrap();
        assert_eq!(mixed.len(), 3);
        assert!(mixed.iter().all(|w| !w.is_learned));

        let by_prefix = shared.sample(Some(&RoundFilter::prefix("be")), 10).unwrap();
        assert_eq!(by_prefix.len(), 3);

        let by_root = shared.sample(Some(&RoundFilter::root("stehen")), 1).unwrap();
        assert_eq!(by_root.len(), 1);
        assert_eq!(by_root[0].root, "stehen");

        assert!(shared.sample(Some(&RoundFilter::favorites()), 5).unwrap().is_empty());
    }

    #[test]
    fn distinct_values_are_sorted() {
        let mut index = WordIndex::new();
        index.insert_entries(vec![entry("ver", "a"), entry("", "b"), entry("ver", "a")]);
        assert_eq!(index.distinct_prefixes(), vec!["".to_string(), "ver".to_string()]);
        assert_eq!(index.distinct_roots(), vec!["a".to_string(), "b".to_string()]);
    }
}

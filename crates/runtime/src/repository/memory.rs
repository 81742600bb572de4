//! In-memory WordStore implementation for tests and throwaway sessions.

use async_trait::async_trait;

use drill_core::{RoundFilter, Word, WordEntry, WordId};

use super::index::{SharedIndex, WordIndex};
use super::{Result, WordStore};

/// In-memory implementation of WordStore.
///
/// Nothing survives the process; ids are assigned sequentially from 1.
pub struct InMemoryWordStore {
    index: SharedIndex,
}

impl InMemoryWordStore {
    /// Create a new empty store with an entropy-seeded sampler.
    pub fn new() -> Self {
        Self {
            index: SharedIndex::new(WordIndex::new(), None),
        }
    }

    /// Create an empty store whose sampling order is reproducible.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            index: SharedIndex::new(WordIndex::new(), Some(seed)),
        }
    }
}

impl Default for InMemoryWordStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WordStore for InMemoryWordStore {
    async fn sample(&self, filter: Option<&RoundFilter>, limit: usize) -> Result<Vec<Word>> {
        self.index.sample(filter, limit)
    }

    async fn get_by_id(&self, id: WordId) -> Result<Option<Word>> {
        self.index.read(|index| index.get(id).cloned())
    }

    async fn update(&self, word: Word) -> Result<Word> {
        self.index.write(|index| index.upsert(word))
    }

    async fn all_words(&self) -> Result<Vec<Word>> {
        self.index.read(WordIndex::all)
    }

    async fn count(&self) -> Result<usize> {
        self.index.read(WordIndex::len)
    }

    async fn insert_many(&self, entries: Vec<WordEntry>) -> Result<Vec<Word>> {
        self.index.write(|index| index.insert_entries(entries))
    }

    async fn update_many(&self, words: Vec<Word>) -> Result<()> {
        self.index.write(|index| {
            for word in words {
                index.upsert(word);
            }
        })
    }

    async fn delete_many(&self, ids: &[WordId]) -> Result<usize> {
        self.index.write(|index| index.delete(ids))
    }

    async fn word_list_version(&self) -> Result<Option<u32>> {
        self.index.read(WordIndex::version)
    }

    async fn set_word_list_version(&self, version: u32) -> Result<()> {
        self.index.write(|index| index.set_version(version))
    }

    async fn distinct_prefixes(&self) -> Result<Vec<String>> {
        self.index.read(WordIndex::distinct_prefixes)
    }

    async fn distinct_roots(&self) -> Result<Vec<String>> {
        self.index.read(WordIndex::distinct_roots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn update_is_an_upsert_by_id() {
        let store = InMemoryWordStore::with_seed(1);
        let mut words = store
            .insert_many(vec![WordEntry::new("be", "kommen", "to receive", "")])
            .await
            .unwrap();
        assert!(!store.is_empty().await.unwrap());

        let mut word = words.remove(0);
        word.stats.record_shown(77);
        let stored = store.update(word.clone()).await.unwrap();
        assert_eq!(stored, word);
        assert_eq!(
            store.get_by_id(word.id).await.unwrap().map(|w| w.stats.times_shown),
            Some(1)
        );

        assert_eq!(store.delete_many(&[word.id, WordId(99)]).await.unwrap(), 1);
        assert_eq!(store.get_by_id(word.id).await.unwrap(), None);
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn word_list_version_starts_unset() {
        let store = InMemoryWordStore::new();
        assert_eq!(store.word_list_version().await.unwrap(), None);
        store.set_word_list_version(3).await.unwrap();
        assert_eq!(store.word_list_version().await.unwrap(), Some(3));
    }
}

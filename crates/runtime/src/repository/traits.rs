//! Word store contract.

use async_trait::async_trait;

use drill_core::{RoundFilter, Word, WordEntry, WordId};

use super::Result;

/// Durable collection of words with their statistics.
///
/// Injected into the runtime as `Arc<dyn WordStore>`.
#[async_trait]
pub trait WordStore: Send + Sync {
    /// Random sample of at most `limit` words admitted by `filter`.
    ///
    /// Explicit filters select their subset regardless of the learned flag;
    /// `None` samples every word not yet learned.
    async fn sample(&self, filter: Option<&RoundFilter>, limit: usize) -> Result<Vec<Word>>;

    async fn get_by_id(&self, id: WordId) -> Result<Option<Word>>;

    /// Full-record upsert by id. Returns the persisted value.
    async fn update(&self, word: Word) -> Result<Word>;

    async fn all_words(&self) -> Result<Vec<Word>>;

    async fn count(&self) -> Result<usize>;

    async fn is_empty(&self) -> Result<bool> {
        Ok(self.count().await? == 0)
    }

    /// Stores new words, assigning fresh ids.
    async fn insert_many(&self, entries: Vec<WordEntry>) -> Result<Vec<Word>>;

    async fn update_many(&self, words: Vec<Word>) -> Result<()>;

    /// Returns how many of `ids` were present.
    async fn delete_many(&self, ids: &[WordId]) -> Result<usize>;

    /// Version of the word list the store was last synced with.
    async fn word_list_version(&self) -> Result<Option<u32>>;

    async fn set_word_list_version(&self, version: u32) -> Result<()>;

    /// Distinct raw prefixes, sorted.
    async fn distinct_prefixes(&self) -> Result<Vec<String>>;

    /// Distinct raw roots, sorted.
    async fn distinct_roots(&self) -> Result<Vec<String>>;
}

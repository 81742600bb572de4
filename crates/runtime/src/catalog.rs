//! Word catalog: statistics views and per-word options.

use std::sync::Arc;

use drill_core::stats::{self, DEFAULT_LIST_LIMIT};
use drill_core::{LabelCount, PrefixProgress, Word, WordId};

use crate::repository::{RepositoryError, Result, WordStore};

/// User-controlled word flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WordFlag {
    Favorite,
    Learned,
}

/// Read-mostly service over the word store for stats screens and flag toggles.
#[derive(Clone)]
pub struct WordCatalog {
    store: Arc<dyn WordStore>,
}

impl WordCatalog {
    pub const DEFAULT_LIMIT: usize = DEFAULT_LIST_LIMIT;

    pub fn new(store: Arc<dyn WordStore>) -> Self {
        Self { store }
    }

    pub async fn recent_failures(&self, limit: usize) -> Result<Vec<Word>> {
        Ok(stats::recent_failures(&self.store.all_words().await?, limit))
    }

    pub async fn recent_correct(&self, limit: usize) -> Result<Vec<Word>> {
        Ok(stats::recent_correct(&self.store.all_words().await?, limit))
    }

    pub async fn top_correct(&self, limit: usize) -> Result<Vec<Word>> {
        Ok(stats::top_correct(&self.store.all_words().await?, limit))
    }

    pub async fn top_failed(&self, limit: usize) -> Result<Vec<Word>> {
        Ok(stats::top_failed(&self.store.all_words().await?, limit))
    }

    pub async fn learned(&self) -> Result<Vec<Word>> {
        Ok(stats::learned_sorted(&self.store.all_words().await?))
    }

    pub async fn favorites(&self) -> Result<Vec<Word>> {
        Ok(stats::favorites_sorted(&self.store.all_words().await?))
    }

    pub async fn prefix_progress(&self) -> Result<Vec<PrefixProgress>> {
        Ok(stats::prefix_progress(&self.store.all_words().await?))
    }

    /// Prefix filter choices with word counts.
    pub async fn prefix_choices(&self) -> Result<Vec<LabelCount>> {
        let words = self.store.all_words().await?;
        Ok(stats::label_counts(&words, |w| w.prefix.as_str()))
    }

    /// Root filter choices with word counts.
    pub async fn root_choices(&self) -> Result<Vec<LabelCount>> {
        let words = self.store.all_words().await?;
        Ok(stats::label_counts(&words, |w| w.root.as_str()))
    }

    pub async fn toggle_favorite(&self, id: WordId) -> Result<Word> {
        self.toggle(id, WordFlag::Favorite).await
    }

    pub async fn toggle_learned(&self, id: WordId) -> Result<Word> {
        self.toggle(id, WordFlag::Learned).await
    }

    /// Re-reads the word, flips `flag` and returns the persisted value.
    pub async fn toggle(&self, id: WordId, flag: WordFlag) -> Result<Word> {
        let mut word = self
            .store
            .get_by_id(id)
            .await?
            .ok_or(RepositoryError::WordNotFound(id))?;
        match flag {
            WordFlag::Favorite => word.is_favorite = !word.is_favorite,
            WordFlag::Learned => word.is_learned = !word.is_learned,
        }
        tracing::debug!(%id, ?flag, "toggled word flag");
        self.store.update(word).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryWordStore;
    use drill_core::WordEntry;

    async fn catalog() -> (WordCatalog, Vec<Word>) {
        let store = Arc::new(InMemoryWordStore::new());
        let words = store
            .insert_many(vec![
                WordEntry::new("be", "kommen", "to receive", ""),
                WordEntry::new("be", "stehen", "to consist", ""),
                WordEntry::new("ver", "stehen", "to understand", ""),
            ])
            .await
            .unwrap();
        (WordCatalog::new(store), words)
    }

    #[tokio::test]
    async fn toggles_flip_and_persist() {
        let (catalog, words) = catalog().await;

        let on = catalog.toggle_favorite(words[0].id).await.unwrap();
        assert!(on.is_favorite);
        assert_eq!(catalog.favorites().await.unwrap(), vec![on.clone()]);

        let off = catalog.toggle_favorite(words[0].id).await.unwrap();
        assert!(!off.is_favorite);

        let learned = catalog.toggle_learned(words[2].id).await.unwrap();
        assert!(learned.is_learned);
        assert_eq!(catalog.learned().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn toggling_unknown_word_fails() {
        let (catalog, _) = catalog().await;
        let err = catalog.toggle_learned(WordId(404)).await.unwrap_err();
        assert!(matches!(err, RepositoryError::WordNotFound(WordId(404))));
    }

    #[tokio::test]
    async fn filter_choices_count_words() {
        let (catalog, _) = catalog().await;

        let prefixes = catalog.prefix_choices().await.unwrap();
        assert_eq!(prefixes[0], LabelCount { label: "be".into(), count: 2 });

        let roots = catalog.root_choices().await.unwrap();
        assert_eq!(roots.len(), 2);
        assert_eq!(roots[1], LabelCount { label: "stehen".into(), count: 2 });
    }
}

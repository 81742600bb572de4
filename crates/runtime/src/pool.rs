//! Pool selection: the candidate words a round is built from.

use std::sync::Arc;

use drill_core::{RoundFilter, Word};
use tracing::warn;

use crate::repository::WordStore;

/// Fetches round candidates from the word store.
#[derive(Clone)]
pub struct PoolSelector {
    store: Arc<dyn WordStore>,
}

impl PoolSelector {
    pub fn new(store: Arc<dyn WordStore>) -> Self {
        Self { store }
    }

    /// Random pool of at most `size` words for `filter` (`None` = mixed,
    /// learned words excluded).
    ///
    /// Store failures are logged and yield an empty pool, which the round
    /// handles as "no words".
    pub async fn select(&self, filter: Option<&RoundFilter>, size: usize) -> Vec<Word> {
        match self.store.sample(filter, size).await {
            Ok(mut pool) => {
                pool.truncate(size);
                pool
            }
            Err(error) => {
                let filter = filter.map_or_else(|| "mixed".to_owned(), ToString::to_string);
                warn!(%error, %filter, "pool selection failed; starting an empty round");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{InMemoryWordStore, Result};
    use async_trait::async_trait;
    use drill_core::{WordEntry, WordId};

    struct BrokenStore;

    #[async_trait]
    impl WordStore for BrokenStore {
        async fn sample(&self, _: Option<&RoundFilter>, _: usize) -> Result<Vec<Word>> {
            Err(crate::repository::RepositoryError::LockPoisoned)
        }
        async fn get_by_id(&self, _: WordId) -> Result<Option<Word>> {
            Ok(None)
        }
        async fn update(&self, word: Word) -> Result<Word> {
            Ok(word)
        }
        async fn all_words(&self) -> Result<Vec<Word>> {
            Ok(Vec::new())
        }
        async fn count(&self) -> Result<usize> {
            Ok(0)
        }
        async fn insert_many(&self, _: Vec<WordEntry>) -> Result<Vec<Word>> {
            Ok(Vec::new())
        }
        async fn update_many(&self, _: Vec<Word>) -> Result<()> {
            Ok(())
        }
        async fn delete_many(&self, _: &[WordId]) -> Result<usize> {
            Ok(0)
        }
        async fn word_list_version(&self) -> Result<Option<u32>> {
            Ok(None)
        }
        async fn set_word_list_version(&self, _: u32) -> Result<()> {
            Ok(())
        }
        async fn distinct_prefixes(&self) -> Result<Vec<String>> {
            Ok(Vec::new())
        }
        async fn distinct_roots(&self) -> Result<Vec<String>> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn store_errors_degrade_to_empty_pool() {
        let selector = PoolSelector::new(Arc::new(BrokenStore));
        assert!(selector.select(None, 5).await.is_empty());
    }

    #[tokio::test]
    async fn pool_never_exceeds_size() {
        let store = Arc::new(InMemoryWordStore::with_seed(3));
        let entries = (0..8)
            .map(|i| WordEntry::new("ab", format!("root{i}"), "t", ""))
            .collect();
        store.insert_many(entries).await.unwrap();

        let selector = PoolSelector::new(store);
        assert_eq!(selector.select(None, 5).await.len(), 5);
        assert_eq!(
            selector.select(Some(&RoundFilter::prefix("ab")), 20).await.len(),
            8
        );
    }
}

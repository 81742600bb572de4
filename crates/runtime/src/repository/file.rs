//! File-based WordStore implementation.

use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;

use drill_core::{RoundFilter, Word, WordEntry, WordId};

use super::index::{SharedIndex, WordDocument, WordIndex};
use super::{RepositoryError, Result, WordStore};

/// File-based implementation of WordStore.
///
/// The whole index lives in memory and is written back as a single JSON
/// [`WordDocument`] after every mutation.
///
/// # File Format
///
/// `words.json` holds `{ "version", "next_id", "words" }`. Writes go to
/// `words.json.tmp` first and are renamed over the original, so a crash never
/// leaves a half-written document behind.
pub struct FileWordStore {
    path: PathBuf,
    index: SharedIndex,
    /// Serializes mutate-then-persist sequences so documents land in order.
    write_lock: Mutex<()>,
}

impl FileWordStore {
    pub const FILE_NAME: &'static str = "words.json";

    /// Open (or create) the store in `base_dir`.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        Self::open(base_dir, None)
    }

    /// Like [`FileWordStore::new`] with a reproducible sampling order.
    pub fn with_seed(base_dir: impl AsRef<Path>, seed: u64) -> Result<Self> {
        Self::open(base_dir, Some(seed))
    }

    fn open(base_dir: impl AsRef<Path>, seed: Option<u64>) -> Result<Self> {
        let base_dir = base_dir.as_ref();
        fs::create_dir_all(base_dir).map_err(RepositoryError::Io)?;
        let path = base_dir.join(Self::FILE_NAME);

        let index = if path.exists() {
            let bytes = fs::read(&path).map_err(RepositoryError::Io)?;
            let document: WordDocument = serde_json::from_slice(&bytes).map_err(|e| {
                RepositoryError::CorruptedData(format!("{}: {}", path.display(), e))
            })?;
            tracing::debug!(
                "Loaded {} words from {}",
                document.words.len(),
                path.display()
            );
            WordIndex::from_document(document)
        } else {
            WordIndex::new()
        };

        Ok(Self {
            path,
            index: SharedIndex::new(index, seed),
            write_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Apply `f` to a copy of the index, persist it, then publish the copy.
    ///
    /// The shared index only changes once the document is on disk, so a failed
    /// write leaves readers on the last persisted state.
    async fn mutate<T>(&self, f: impl FnOnce(&mut WordIndex) -> T) -> Result<T> {
        let _guard = self.write_lock.lock().await;

        let mut staged = self.index.read(WordIndex::clone)?;
        let value = f(&mut staged);
        let document = staged.to_document();

        let bytes =
            serde_json::to_vec_pretty(&document).map_err(|e| RepositoryError::Json(e.to_string()))?;
        let temp_path = self.path.with_extension("json.tmp");

        tokio::fs::write(&temp_path, bytes)
            .await
            .map_err(RepositoryError::Io)?;
        tokio::fs::rename(&temp_path, &self.path)
            .await
            .map_err(RepositoryError::Io)?;

        self.index.write(|index| *index = staged)?;

        tracing::debug!(
            "Saved {} words to {}",
            document.words.len(),
            self.path.display()
        );

        Ok(value)
    }
}

#[async_trait]
impl WordStore for FileWordStore {
    async fn sample(&self, filter: Option<&RoundFilter>, limit: usize) -> Result<Vec<Word>> {
        self.index.sample(filter, limit)
    }

    async fn get_by_id(&self, id: WordId) -> Result<Option<Word>> {
        self.index.read(|index| index.get(id).cloned())
    }

    async fn update(&self, word: Word) -> Result<Word> {
        self.mutate(|index| index.upsert(word)).await
    }

    async fn all_words(&self) -> Result<Vec<Word>> {
        self.index.read(WordIndex::all)
    }

    async fn count(&self) -> Result<usize> {
        self.index.read(WordIndex::len)
    }

    async fn insert_many(&self, entries: Vec<WordEntry>) -> Result<Vec<Word>> {
        self.mutate(|index| index.insert_entries(entries)).await
    }

    async fn update_many(&self, words: Vec<Word>) -> Result<()> {
        self.mutate(|index| {
            for word in words {
                index.upsert(word);
            }
        })
        .await
    }

    async fn delete_many(&self, ids: &[WordId]) -> Result<usize> {
        self.mutate(|index| index.delete(ids)).await
    }

    async fn word_list_version(&self) -> Result<Option<u32>> {
        self.index.read(WordIndex::version)
    }

    async fn set_word_list_version(&self, version: u32) -> Result<()> {
        self.mutate(|index| index.set_version(version)).await
    }

    async fn distinct_prefixes(&self) -> Result<Vec<String>> {
        self.index.read(WordIndex::distinct_prefixes)
    }

    async fn distinct_roots(&self) -> Result<Vec<String>> {
        self.index.read(WordIndex::distinct_roots)
    }
}

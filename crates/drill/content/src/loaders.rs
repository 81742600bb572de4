//! File loaders for word lists.

use std::path::Path;

use crate::format::{WordList, parse};

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}

/// Loader for `;`-separated word-list files.
pub struct WordListLoader;

impl WordListLoader {
    /// Reads and parses the word list at `path`.
    ///
    /// Malformed rows do not fail the load; they are reported in
    /// [`WordList::skipped`] so the caller can log them.
    pub fn load(path: &Path) -> LoadResult<WordList> {
        let content = read_file(path)?;
        let list = parse(&content);
        if list.is_empty() && !list.skipped.is_empty() {
            anyhow::bail!(
                "Word list {} has no valid rows ({} malformed)",
                path.display(),
                list.skipped.len()
            );
        }
        Ok(list)
    }
}

//! Word-list content: the text format the vocabulary ships in, and the
//! reconciliation plan used to bring a populated store up to date with a new
//! list.
//!
//! Parsing is pure (`parse`); file access lives behind the `loaders` feature.

pub mod format;
pub mod sync;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use format::{SkippedRow, WordList, parse, parse_root_field};
pub use sync::{SyncPlan, plan_sync};

#[cfg(feature = "loaders")]
pub use loaders::{LoadResult, WordListLoader};

//! Repository layer for word data.
//!
//! Words are the only data that changes during play: statistics after every
//! attempt, flags on user request, and the whole set when a new word list is
//! synced. Both stores share [`WordIndex`] for query semantics and differ only
//! in durability.

mod error;
mod file;
mod index;
mod memory;
mod traits;

pub use error::{RepositoryError, Result};
pub use file::FileWordStore;
pub use index::{WordDocument, WordIndex};
pub use memory::InMemoryWordStore;
pub use traits::WordStore;

//! Round filters selecting which words are eligible for a pool.

use core::fmt;

use crate::word::Word;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FilterKind {
    Prefix,
    Root,
    Favorites,
}

/// An explicit filter. Absence of a filter means "mixed" mode.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoundFilter {
    pub kind: FilterKind,
    pub value: String,
}

impl RoundFilter {
    pub fn prefix(value: impl Into<String>) -> Self {
        Self {
            kind: FilterKind::Prefix,
            value: value.into(),
        }
    }

    pub fn root(value: impl Into<String>) -> Self {
        Self {
            kind: FilterKind::Root,
            value: value.into(),
        }
    }

    pub fn favorites() -> Self {
        Self {
            kind: FilterKind::Favorites,
            value: String::new(),
        }
    }

    /// Whether `word` belongs to the subset this filter selects.
    pub fn matches(&self, word: &Word) -> bool {
        match self.kind {
            FilterKind::Prefix => word.prefix == self.value,
            FilterKind::Root => word.root == self.value,
            FilterKind::Favorites => word.is_favorite,
        }
    }
}

impl fmt::Display for RoundFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            FilterKind::Prefix => write!(f, "prefix '{}'", self.value),
            FilterKind::Root => write!(f, "root '{}'", self.value),
            FilterKind::Favorites => f.write_str("favorites"),
        }
    }
}

/// Pool eligibility: explicit filters select their subset as-is, mixed mode
/// admits every word not yet learned.
pub fn admits(filter: Option<&RoundFilter>, word: &Word) -> bool {
    match filter {
        Some(filter) => filter.matches(word),
        None => !word.is_learned,
    }
}

//! Word records and their learning statistics.

use core::fmt;

/// Stable identity assigned to a word by the store.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WordId(pub u32);

impl fmt::Display for WordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Marker appended to the display form of reflexive roots.
pub const REFLEXIVE_MARKER: &str = "(sich)";

/// Display root-form: `root`, or `root (sich)` for reflexive verbs.
pub fn format_root(root: &str, is_reflexive: bool) -> String {
    if is_reflexive {
        format!("{root} {REFLEXIVE_MARKER}")
    } else {
        root.to_owned()
    }
}

/// An imported word before the store assigns it an id.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WordEntry {
    pub prefix: String,
    pub root: String,
    pub is_reflexive: bool,
    pub translation: String,
    pub example: String,
}

impl WordEntry {
    pub fn new(
        prefix: impl Into<String>,
        root: impl Into<String>,
        translation: impl Into<String>,
        example: impl Into<String>,
    ) -> Self {
        Self {
            prefix: prefix.into(),
            root: root.into(),
            is_reflexive: false,
            translation: translation.into(),
            example: example.into(),
        }
    }

    #[must_use]
    pub fn reflexive(mut self, is_reflexive: bool) -> Self {
        self.is_reflexive = is_reflexive;
        self
    }

    /// Identity used when reconciling a new word list with stored words.
    pub fn key(&self) -> String {
        word_key(&self.prefix, &self.root, self.is_reflexive)
    }
}

fn word_key(prefix: &str, root: &str, is_reflexive: bool) -> String {
    format!("{prefix};{root};{is_reflexive}")
}

/// Per-word learning counters. Timestamps are Unix milliseconds, 0 = never.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WordStats {
    pub times_shown: u32,
    pub correct_count: u32,
    pub failed_count: u32,
    pub tries_count: u32,
    pub last_shown_at: i64,
    pub last_correct_at: i64,
    pub last_failed_at: i64,
}

impl WordStats {
    pub fn record_shown(&mut self, now: i64) {
        self.times_shown += 1;
        self.last_shown_at = now;
    }

    pub fn record_attempt(&mut self, correct: bool, now: i64) {
        self.tries_count += 1;
        if correct {
            self.correct_count += 1;
            self.last_correct_at = now;
        } else {
            self.failed_count += 1;
            self.last_failed_at = now;
        }
    }

    /// Net score used to order learned and favorite lists.
    pub fn balance(&self) -> i64 {
        i64::from(self.correct_count) - i64::from(self.failed_count)
    }

    /// Whether the most recent attempt was correct (`None` if never tried).
    pub fn last_attempt_correct(&self) -> Option<bool> {
        if self.last_correct_at > 0 && self.last_correct_at > self.last_failed_at {
            Some(true)
        } else if self.last_failed_at > 0 && self.last_failed_at > self.last_correct_at {
            Some(false)
        } else {
            None
        }
    }
}

/// A vocabulary unit: prefix + root with translation and statistics.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Word {
    pub id: WordId,
    pub prefix: String,
    pub root: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub is_reflexive: bool,
    pub translation: String,
    pub example: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub is_favorite: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub is_learned: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub stats: WordStats,
}

impl Word {
    pub fn from_entry(id: WordId, entry: WordEntry) -> Self {
        Self {
            id,
            prefix: entry.prefix,
            root: entry.root,
            is_reflexive: entry.is_reflexive,
            translation: entry.translation,
            example: entry.example,
            ..Self::default()
        }
    }

    /// Root-form shown in the picker and compared against guesses.
    pub fn root_label(&self) -> String {
        format_root(&self.root, self.is_reflexive)
    }

    /// Full combined word, e.g. `verstehen` or `befinden (sich)`.
    pub fn display_form(&self) -> String {
        format!("{}{}", self.prefix, self.root_label())
    }

    pub fn key(&self) -> String {
        word_key(&self.prefix, &self.root, self.is_reflexive)
    }

    /// Whether a re-imported entry carries different display text.
    pub fn differs_from(&self, entry: &WordEntry) -> bool {
        self.translation != entry.translation || self.example != entry.example
    }

    /// Exact, case-sensitive comparison on raw picker values.
    pub fn matches_guess(&self, prefix: &str, root_label: &str) -> bool {
        self.prefix == prefix && self.root_label() == root_label
    }

    /// Copies display fields from a re-imported entry, keeping stats and flags.
    pub fn apply_entry(&mut self, entry: &WordEntry) {
        self.prefix.clone_from(&entry.prefix);
        self.root.clone_from(&entry.root);
        self.is_reflexive = entry.is_reflexive;
        self.translation.clone_from(&entry.translation);
        self.example.clone_from(&entry.example);
    }
}

/// Round configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoundConfig {
    /// Number of words drawn for one round.
    pub round_size: usize,
}

impl RoundConfig {
    pub const DEFAULT_ROUND_SIZE: usize = 5;
    pub const MIN_ROUND_SIZE: usize = 1;

    pub fn new() -> Self {
        Self {
            round_size: Self::DEFAULT_ROUND_SIZE,
        }
    }

    pub fn with_round_size(round_size: usize) -> Self {
        Self {
            round_size: round_size.max(Self::MIN_ROUND_SIZE),
        }
    }

    pub fn with_difficulty(difficulty: Difficulty) -> Self {
        Self::with_round_size(difficulty.round_size())
    }

    /// Difficulty preset matching the current size, if any.
    pub fn difficulty(&self) -> Option<Difficulty> {
        Difficulty::from_round_size(self.round_size)
    }
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Named round-size presets offered to the learner.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const fn round_size(self) -> usize {
        match self {
            Self::Easy => 3,
            Self::Medium => 5,
            Self::Hard => 10,
        }
    }

    pub fn from_round_size(size: usize) -> Option<Self> {
        use strum::IntoEnumIterator;
        Self::iter().find(|difficulty| difficulty.round_size() == size)
    }
}

//! Deterministic round logic and data types shared across the drill crates.
//!
//! `drill-core` defines the canonical word model, the picker builder and the
//! round state machine. It performs no I/O: every transition on
//! [`round::RoundEngine`] mutates session state synchronously and returns the
//! statistics writes it wants performed, leaving persistence to the runtime.
pub mod config;
pub mod filter;
pub mod labels;
pub mod picker;
pub mod round;
pub mod stats;
pub mod word;

pub use config::{Difficulty, RoundConfig};
pub use filter::{FilterKind, RoundFilter};
pub use labels::Labels;
pub use picker::{Picker, Pickers};
pub use round::{
    IgnoredInput, Notice, Progress, RoundEngine, RoundPhase, RoundState, RoundStatus, StatEffect,
    StatKind, StatTarget, StatusColor, Transition,
};
pub use stats::{LabelCount, PrefixProgress};
pub use word::{Word, WordEntry, WordId, WordStats, format_root};

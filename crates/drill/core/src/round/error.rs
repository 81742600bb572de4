/// Input rejected by the round engine without changing state.
///
/// These come from stale UI events (a tap after the round ended, an index from
/// an outdated picker) and are never fatal.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum IgnoredInput {
    #[error("no word is awaiting a guess")]
    NoActiveWord,

    #[error("pickers are empty")]
    EmptyPickers,

    #[error("prefix index {index} out of range for {len} options")]
    PrefixOutOfRange { index: usize, len: usize },

    #[error("root index {index} out of range for {len} options")]
    RootOutOfRange { index: usize, len: usize },
}

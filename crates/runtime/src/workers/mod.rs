//! Worker tasks that back the runtime orchestration.
//!
//! The round worker owns the round engine and executes every command against
//! it, so transitions are serialized without locks.

mod round;

pub use round::{Command, RoundServices, RoundWorker};

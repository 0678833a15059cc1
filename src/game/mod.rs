//! Round state machine, activity log, and engine.

pub mod engine;
pub mod log;
pub mod phase;
pub mod state;

pub use engine::GameEngine;
pub use log::{ActivityLog, LogEntry};
pub use phase::Phase;
pub use state::{GameSnapshot, Player, PlayerSnapshot, RoundState};

//! Follow one NFL team's game state as a periodically refreshed record.
//!
//! The crate polls ESPN's public scoreboard for a single configured team,
//! normalizes the irregular upstream schema into a fixed-shape
//! [`GameRecord`], and republishes it on an adaptive cadence: every ten
//! minutes off-game, every five seconds near and during live play. A host
//! automation platform consumes the record through
//! [`PollCoordinator::subscribe`] and supplies [`TeamConfig`] from its own
//! config storage.

pub mod config;
pub mod coordinator;

pub use config::{DEFAULT_TIMEOUT_SECS, TeamConfig};
pub use coordinator::{
    FAST_INTERVAL, PollCoordinator, PollState, PublishedState, SLOW_INTERVAL, UpdateError,
};
pub use nfl_api::{GameRecord, GameState};

//! Race status state machine.

use serde::{Deserialize, Serialize};
use strum::Display;

/// Where the race stands.
///
/// `Running` is the only non-terminal status; nothing leaves a terminal one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum RaceStatus {
    /// Decisions are still being requested.
    #[default]
    Running,
    /// The centre of the board matches the goal.
    Complete,
    /// The racer asked for an illegal move or failed to answer.
    Retire,
    /// The racer missed its deadline.
    Timeout,
}

impl RaceStatus {
    /// True for every status except `Running`.
    pub fn is_terminal(self) -> bool {
        self != RaceStatus::Running
    }

    /// Short message shown to the player once the race is over.
    pub fn message(self) -> Option<&'static str> {
        match self {
            RaceStatus::Running => None,
            RaceStatus::Complete => Some("Completed!"),
            RaceStatus::Retire => Some("Retire!"),
            RaceStatus::Timeout => Some("Timeout!"),
        }
    }
}

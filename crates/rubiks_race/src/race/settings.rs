//! Timing knobs shared by the controller and the clock.

use derive_setters::Setters;
use std::time::Duration;

/// Pacing and deadline settings for one race.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Setters)]
#[setters(prefix = "with_")]
pub struct RaceSettings {
    /// Time between presentation ticks.
    tick_interval: Duration,
    /// Ticks each move is animated for before the next decision.
    frames_per_move: u32,
    /// How long a racer may take to answer.
    decision_timeout: Duration,
}

impl RaceSettings {
    /// Time between presentation ticks.
    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    /// Ticks each move is animated for.
    pub fn frames_per_move(&self) -> u32 {
        self.frames_per_move
    }

    /// Deadline for each racer decision.
    pub fn decision_timeout(&self) -> Duration {
        self.decision_timeout
    }
}

impl Default for RaceSettings {
    /// 10 ticks per second, 3 frames per move, 5 second decisions.
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(100),
            frames_per_move: 3,
            decision_timeout: Duration::from_secs(5),
        }
    }
}

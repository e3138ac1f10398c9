//! Read-only view of a race published to renderers.

use super::RaceStatus;
use derive_getters::Getters;
use rubiks_puzzle::{BOARD_SIZE, Cube, Direction, GOAL_SIZE};
use std::time::{Duration, Instant};

/// Everything a renderer needs for one frame.
///
/// Snapshots are copies; the controller publishes a fresh one after every
/// change, so a reader never sees a half-applied move.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct RaceSnapshot {
    /// Board cubes, row-major.
    pub(crate) cubes: [Cube; BOARD_SIZE],
    /// Goal cubes, row-major.
    pub(crate) goal: [Cube; GOAL_SIZE],
    /// Current blank position.
    pub(crate) blank_index: usize,
    /// Race status.
    pub(crate) status: RaceStatus,
    /// Decisions attempted so far.
    pub(crate) try_count: u32,
    /// When the race started.
    pub(crate) started_at: Instant,
    /// Frozen elapsed time once the race is over.
    pub(crate) finished_after: Option<Duration>,
    /// Cell holding the cube moved last.
    pub(crate) active_cell: Option<usize>,
    /// Direction of the last successful move.
    pub(crate) last_direction: Option<Direction>,
    /// Animation progress of the last move.
    pub(crate) animation_frame: u32,
    /// Frames a move is animated for.
    pub(crate) frames_per_move: u32,
}

impl RaceSnapshot {
    /// Time since the race started, frozen once it is over.
    pub fn elapsed(&self) -> Duration {
        self.finished_after
            .unwrap_or_else(|| self.started_at.elapsed())
    }

    /// True while the last moved cube is still sliding.
    pub fn is_animating(&self) -> bool {
        self.status == RaceStatus::Running
            && self.active_cell.is_some()
            && self.last_direction.is_some()
            && self.animation_frame < self.frames_per_move
    }
}

//! Final outcome of a race.

use super::RaceStatus;
use derive_getters::Getters;
use derive_new::new;
use rubiks_puzzle::{Cube, Direction};
use std::fmt;
use std::time::Duration;

/// One applied move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, new)]
pub struct MoveRecord {
    /// Try on which the move was made.
    try_count: u32,
    /// The cube that slid.
    cube: Cube,
    /// Index the cube left (the racer's answer).
    from: usize,
    /// Index the cube landed on (the blank before the move).
    to: usize,
    /// Direction the blank travelled.
    direction: Direction,
}

/// What the controller hands back when its loop ends.
#[derive(Debug, Clone, PartialEq, Eq, Getters, new)]
pub struct RaceReport {
    /// Final status; `Running` only if the race was cut short.
    status: RaceStatus,
    /// Decisions attempted.
    try_count: u32,
    /// Time from start to the terminal status.
    elapsed: Duration,
    /// Every applied move, in order.
    moves: Vec<MoveRecord>,
    /// Final `CUBES:GOAL` layout.
    layout: String,
}

impl fmt::Display for RaceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} after {} tries and {} moves in {:.2?} ({})",
            self.status,
            self.try_count,
            self.moves.len(),
            self.elapsed,
            self.layout
        )
    }
}

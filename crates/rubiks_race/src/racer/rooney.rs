//! Random-walk racer that never aims for the goal.

use super::Racer;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rubiks_puzzle::{BOARD_SIZE, BOARD_WIDTH, Cube};
use tracing::{debug, info};

/// Walks the blank around the board at random.
///
/// Odd tries move the blank sideways, even tries move it vertically. At an
/// edge it bounces back; in the interior it picks a side at random. Every
/// answer is a legal move under either adjacency rule.
#[derive(Debug)]
pub struct RooneyRacer {
    blank: usize,
    rng: StdRng,
}

impl RooneyRacer {
    /// Creates a racer seeded from the OS.
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// Creates a racer whose walk is reproducible.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            blank: BOARD_SIZE - 1,
            rng,
        }
    }
}

impl Default for RooneyRacer {
    fn default() -> Self {
        Self::new()
    }
}

impl Racer for RooneyRacer {
    fn name(&self) -> &str {
        "rooney"
    }

    fn init(&mut self, cubes: &[Cube], _goal: &[Cube]) {
        if let Some(blank) = cubes.iter().position(|c| c.is_blank()) {
            self.blank = blank;
        }
        info!(blank = self.blank, "Racer Rooney initialized");
    }

    fn next(&mut self, try_count: u32) -> usize {
        let last_row = BOARD_SIZE - BOARD_WIDTH;

        if try_count % 2 == 0 {
            if self.blank < BOARD_WIDTH {
                self.blank += BOARD_WIDTH;
            } else if self.blank >= last_row || !self.rng.gen_bool(0.5) {
                self.blank -= BOARD_WIDTH;
            } else {
                self.blank += BOARD_WIDTH;
            }
        } else {
            let col = self.blank % BOARD_WIDTH;
            if col == 0 {
                self.blank += 1;
            } else if col == BOARD_WIDTH - 1 || !self.rng.gen_bool(0.5) {
                self.blank -= 1;
            } else {
                self.blank += 1;
            }
        }

        debug!(try_count, next = self.blank, "Racer Rooney chose a cube");
        self.blank
    }
}

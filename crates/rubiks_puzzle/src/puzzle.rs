//! Board state and move rules.

use crate::error::MoveError;
use crate::layout::PuzzleLayout;
use crate::types::{Adjacency, Cube, Direction};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::{debug, info, instrument, warn};

/// Cells on the board.
pub const BOARD_SIZE: usize = 25;
/// Cells per board row.
pub const BOARD_WIDTH: usize = 5;
/// Cells in the goal pattern.
pub const GOAL_SIZE: usize = 9;

/// Four cubes of each color; the pool every random board and goal is drawn from.
#[rustfmt::skip]
const CANONICAL_CUBES: [Cube; 24] = [
    Cube::G, Cube::R, Cube::O, Cube::W, Cube::B, Cube::Y,
    Cube::G, Cube::R, Cube::O, Cube::W, Cube::B, Cube::Y,
    Cube::G, Cube::R, Cube::O, Cube::W, Cube::B, Cube::Y,
    Cube::G, Cube::R, Cube::O, Cube::W, Cube::B, Cube::Y,
];

/// Board start index and goal start index of each 3-cube row of the win region.
const WIN_WINDOWS: [(usize, usize); 3] = [(6, 0), (11, 3), (16, 6)];

/// A 5x5 sliding puzzle with one blank and a 3x3 goal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Puzzle {
    cubes: [Cube; BOARD_SIZE],
    goal: [Cube; GOAL_SIZE],
    blank: usize,
    adjacency: Adjacency,
}

impl Puzzle {
    /// Creates a random puzzle with strict adjacency.
    pub fn random() -> Self {
        Self::builder().build()
    }

    /// Starts building a puzzle.
    pub fn builder() -> PuzzleBuilder {
        PuzzleBuilder::default()
    }

    /// True when the centre 3x3 of the board matches the goal.
    pub fn is_complete(&self) -> bool {
        WIN_WINDOWS
            .iter()
            .all(|&(c, g)| self.cubes[c..c + 3] == self.goal[g..g + 3])
    }

    /// Slides the cube at `index` into the blank.
    ///
    /// Returns the direction the blank travelled. Non-neighbours (including
    /// anything off the board) leave the puzzle untouched.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError`] if `index` is not next to the blank under the
    /// puzzle's [`Adjacency`].
    #[instrument(skip(self), fields(blank = self.blank))]
    pub fn move_cube(&mut self, index: usize) -> Result<Direction, MoveError> {
        let direction = self.direction_to(index).ok_or(MoveError {
            index,
            blank: self.blank,
        })?;

        self.cubes.swap(index, self.blank);
        self.blank = index;
        debug!(%direction, "Cube moved");
        Ok(direction)
    }

    /// Direction the blank would travel if the cube at `index` moved, or
    /// `None` when that move is illegal.
    pub fn direction_to(&self, index: usize) -> Option<Direction> {
        if index >= BOARD_SIZE {
            return None;
        }

        let blank = self.blank;
        let sideways_ok =
            index / BOARD_WIDTH == blank / BOARD_WIDTH || self.adjacency == Adjacency::Wrapping;

        if index + 1 == blank && sideways_ok {
            Some(Direction::Left)
        } else if index + BOARD_WIDTH == blank {
            Some(Direction::Up)
        } else if index == blank + 1 && sideways_ok {
            Some(Direction::Right)
        } else if index == blank + BOARD_WIDTH {
            Some(Direction::Down)
        } else {
            None
        }
    }

    /// Indices that may legally move right now.
    pub fn movable(&self) -> Vec<usize> {
        (0..BOARD_SIZE)
            .filter(|&i| self.direction_to(i).is_some())
            .collect()
    }

    /// Cube at board index `index`.
    pub fn cube_at(&self, index: usize) -> Option<Cube> {
        self.cubes.get(index).copied()
    }

    /// Cube at goal index `index`.
    pub fn goal_at(&self, index: usize) -> Option<Cube> {
        self.goal.get(index).copied()
    }

    /// Current blank position.
    pub fn blank_index(&self) -> usize {
        self.blank
    }

    /// All board cubes, row-major.
    pub fn cubes(&self) -> &[Cube; BOARD_SIZE] {
        &self.cubes
    }

    /// The goal pattern, row-major.
    pub fn goal(&self) -> &[Cube; GOAL_SIZE] {
        &self.goal
    }

    /// Move rule in force.
    pub fn adjacency(&self) -> Adjacency {
        self.adjacency
    }

    /// `CUBES:GOAL` text form, 25 + 9 characters.
    pub fn layout(&self) -> String {
        let cubes: String = self.cubes.iter().map(|c| c.as_char()).collect();
        let goal: String = self.goal.iter().map(|c| c.as_char()).collect();
        format!("{cubes}:{goal}")
    }
}

/// Builder for [`Puzzle`].
///
/// Fixed cubes and goal are checked only for shape: a board must have 25
/// cubes with exactly one blank and a goal 9 cubes without one. Anything
/// else is replaced by a random default and logged.
#[derive(Debug, Clone, Default)]
pub struct PuzzleBuilder {
    cubes: Option<Vec<Cube>>,
    goal: Option<Vec<Cube>>,
    adjacency: Adjacency,
    seed: Option<u64>,
}

impl PuzzleBuilder {
    /// Uses a fixed board.
    pub fn with_cubes(mut self, cubes: impl Into<Vec<Cube>>) -> Self {
        self.cubes = Some(cubes.into());
        self
    }

    /// Uses a fixed goal.
    pub fn with_goal(mut self, goal: impl Into<Vec<Cube>>) -> Self {
        self.goal = Some(goal.into());
        self
    }

    /// Uses the board and goal of a parsed layout.
    pub fn with_layout(self, layout: PuzzleLayout) -> Self {
        let (cubes, goal) = layout.into_parts();
        self.with_cubes(cubes).with_goal(goal)
    }

    /// Sets the move rule.
    pub fn with_adjacency(mut self, adjacency: Adjacency) -> Self {
        self.adjacency = adjacency;
        self
    }

    /// Seeds the random board and goal.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builds the puzzle.
    #[instrument(skip(self), fields(adjacency = %self.adjacency, seed = ?self.seed))]
    pub fn build(self) -> Puzzle {
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let goal = self
            .goal
            .and_then(accept_goal)
            .unwrap_or_else(|| random_goal(&mut rng));
        let (cubes, blank) = self
            .cubes
            .and_then(accept_cubes)
            .unwrap_or_else(|| random_cubes(&mut rng));

        let puzzle = Puzzle {
            cubes,
            goal,
            blank,
            adjacency: self.adjacency,
        };
        info!(layout = %puzzle.layout(), blank, "Puzzle created");
        puzzle
    }
}

fn accept_cubes(cubes: Vec<Cube>) -> Option<([Cube; BOARD_SIZE], usize)> {
    let cubes: [Cube; BOARD_SIZE] = match cubes.try_into() {
        Ok(cubes) => cubes,
        Err(rejected) => {
            warn!(
                len = rejected.len(),
                expected = BOARD_SIZE,
                "Fixed cubes have the wrong length, using a random board"
            );
            return None;
        }
    };

    let mut blanks = cubes.iter().enumerate().filter(|(_, c)| c.is_blank());
    match (blanks.next(), blanks.next()) {
        (Some((blank, _)), None) => Some((cubes, blank)),
        _ => {
            warn!("Fixed cubes need exactly one blank, using a random board");
            None
        }
    }
}

fn accept_goal(goal: Vec<Cube>) -> Option<[Cube; GOAL_SIZE]> {
    let goal: [Cube; GOAL_SIZE] = match goal.try_into() {
        Ok(goal) => goal,
        Err(rejected) => {
            warn!(
                len = rejected.len(),
                expected = GOAL_SIZE,
                "Fixed goal has the wrong length, using a random goal"
            );
            return None;
        }
    };

    if goal.iter().any(|c| c.is_blank()) {
        warn!("Fixed goal contains a blank, using a random goal");
        return None;
    }
    Some(goal)
}

fn random_cubes(rng: &mut StdRng) -> ([Cube; BOARD_SIZE], usize) {
    let mut pool = CANONICAL_CUBES;
    pool.shuffle(rng);

    let mut cubes = [Cube::X; BOARD_SIZE];
    cubes[..pool.len()].copy_from_slice(&pool);
    (cubes, BOARD_SIZE - 1)
}

fn random_goal(rng: &mut StdRng) -> [Cube; GOAL_SIZE] {
    let mut pool = CANONICAL_CUBES;
    pool.shuffle(rng);

    let mut goal = [Cube::X; GOAL_SIZE];
    goal.copy_from_slice(&pool[..GOAL_SIZE]);
    goal
}

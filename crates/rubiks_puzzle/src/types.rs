//! Core domain types for the Rubik's Race puzzle.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// A single tile value on the board or in the goal.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
pub enum Cube {
    /// Green.
    G,
    /// Red.
    R,
    /// Orange.
    O,
    /// White.
    W,
    /// Blue.
    B,
    /// Yellow.
    Y,
    /// The blank slot.
    X,
}

impl Cube {
    /// The six colors, in canonical order.
    pub const COLORS: [Cube; 6] = [Cube::G, Cube::R, Cube::O, Cube::W, Cube::B, Cube::Y];

    /// Parses the one-character text form (`G R O W B Y X`).
    pub fn from_char(c: char) -> Option<Self> {
        Cube::from_str(c.encode_utf8(&mut [0; 4])).ok()
    }

    /// Returns the one-character text form.
    pub fn as_char(self) -> char {
        let name: &'static str = self.into();
        name.chars().next().unwrap_or('X')
    }

    /// Returns true for the blank slot.
    pub fn is_blank(self) -> bool {
        self == Cube::X
    }
}

/// Way the blank travelled during a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Direction {
    /// Blank moved one row up.
    Up,
    /// Blank moved one column right.
    Right,
    /// Blank moved one row down.
    Down,
    /// Blank moved one column left.
    Left,
}

impl Direction {
    /// Returns the opposite direction, i.e. the way the moved cube travelled.
    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
        }
    }
}

/// Rule deciding which cells count as neighbours of the blank.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Adjacency {
    /// Grid neighbours only; left/right moves never leave the blank's row.
    #[default]
    Strict,
    /// Raw `±1`/`±5` index test: a left/right move may wrap across a row
    /// boundary (e.g. index 4 and 5 count as neighbours).
    Wrapping,
}

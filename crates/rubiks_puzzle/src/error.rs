//! Puzzle error types.

use derive_more::{Display, Error};

/// A move whose target is not a neighbour of the blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display("the cube at {index} can't move (blank at {blank})")]
pub struct MoveError {
    /// Index the caller asked to move.
    pub index: usize,
    /// Blank position at the time of the request.
    pub blank: usize,
}

/// Malformed `CUBES:GOAL` layout text.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum LayoutError {
    /// No `:` between the cube and goal parts.
    #[display("layout {text:?} has no ':' between cubes and goal")]
    MissingSeparator {
        /// The offending text.
        text: String,
    },
    /// A character outside `G R O W B Y X`.
    #[display("unknown cube {found:?} at position {position}")]
    UnknownCube {
        /// The offending character.
        found: char,
        /// Character offset within its part.
        position: usize,
    },
}

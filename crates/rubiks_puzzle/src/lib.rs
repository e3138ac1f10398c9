//! Rubik's Race puzzle logic.
//!
//! A 5x5 board of six colors (four cubes each) with one blank slot. Cubes
//! next to the blank slide into it; the puzzle is solved when the centre 3x3
//! of the board matches a 3x3 goal.
//!
//! # Example
//!
//! ```
//! use rubiks_puzzle::{Direction, Puzzle, PuzzleLayout};
//!
//! let layout = PuzzleLayout::parse("GROWBYGROWBYGROWBYGROWBY:GROWBYRGB").unwrap();
//! let mut puzzle = Puzzle::builder().with_layout(layout).build();
//!
//! assert_eq!(puzzle.blank_index(), 24);
//! assert_eq!(puzzle.move_cube(23), Ok(Direction::Left));
//! assert_eq!(puzzle.blank_index(), 23);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod layout;
mod puzzle;
mod types;

pub use error::{LayoutError, MoveError};
pub use layout::PuzzleLayout;
pub use puzzle::{BOARD_SIZE, BOARD_WIDTH, GOAL_SIZE, Puzzle, PuzzleBuilder};
pub use types::{Adjacency, Cube, Direction};

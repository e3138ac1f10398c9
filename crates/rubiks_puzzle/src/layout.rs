//! `CUBES:GOAL` text form of a fixed puzzle.

use crate::error::LayoutError;
use crate::puzzle::BOARD_SIZE;
use crate::types::Cube;
use std::str::FromStr;

/// A fixed board and goal parsed from text such as
/// `GROWBYGROWBYGROWBYGROWBY:GROWBYRGB`.
///
/// A 24-character board gets the blank appended at the last cell. Lengths
/// are not checked here; [`crate::PuzzleBuilder`] falls back to random parts
/// that have the wrong shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PuzzleLayout {
    cubes: Vec<Cube>,
    goal: Vec<Cube>,
}

impl PuzzleLayout {
    /// Parses `CUBES:GOAL`.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError`] when the separator is missing or a character is
    /// not one of `G R O W B Y X`.
    pub fn parse(text: &str) -> Result<Self, LayoutError> {
        let (cubes, goal) = text
            .trim()
            .split_once(':')
            .ok_or_else(|| LayoutError::MissingSeparator {
                text: text.to_string(),
            })?;

        let mut cubes = parse_cubes(cubes)?;
        if cubes.len() == BOARD_SIZE - 1 {
            cubes.push(Cube::X);
        }

        Ok(Self {
            cubes,
            goal: parse_cubes(goal)?,
        })
    }

    /// Board cubes as parsed.
    pub fn cubes(&self) -> &[Cube] {
        &self.cubes
    }

    /// Goal cubes as parsed.
    pub fn goal(&self) -> &[Cube] {
        &self.goal
    }

    /// Splits into board and goal.
    pub fn into_parts(self) -> (Vec<Cube>, Vec<Cube>) {
        (self.cubes, self.goal)
    }
}

impl FromStr for PuzzleLayout {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn parse_cubes(text: &str) -> Result<Vec<Cube>, LayoutError> {
    text.chars()
        .enumerate()
        .map(|(position, found)| {
            Cube::from_char(found).ok_or(LayoutError::UnknownCube { found, position })
        })
        .collect()
}

//! Racer that replays a fixed list of moves.

use super::Racer;
use tracing::debug;

/// Answers with a fixed sequence of board indices.
///
/// Once the script runs out every answer is off the board, which retires
/// the race.
#[derive(Debug, Clone)]
pub struct ScriptedRacer {
    script: Vec<usize>,
    cursor: usize,
}

impl ScriptedRacer {
    /// Creates a racer replaying `script` in order.
    pub fn new(script: impl Into<Vec<usize>>) -> Self {
        Self {
            script: script.into(),
            cursor: 0,
        }
    }

    /// Moves not yet replayed.
    pub fn remaining(&self) -> &[usize] {
        &self.script[self.cursor.min(self.script.len())..]
    }
}

impl Racer for ScriptedRacer {
    fn name(&self) -> &str {
        "scripted"
    }

    fn next(&mut self, try_count: u32) -> usize {
        let index = self.remaining().first().copied().unwrap_or(usize::MAX);
        self.cursor += 1;
        debug!(
            try_count,
            index,
            left = self.remaining().len(),
            "Scripted racer replayed a move"
        );
        index
    }
}

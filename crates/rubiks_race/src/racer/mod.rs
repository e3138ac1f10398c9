//! Racer trait and implementations.

mod registry;
mod rooney;
mod scripted;

pub use registry::{RacerFactory, RacerOptions, RacerRegistry};
pub use rooney::RooneyRacer;
pub use scripted::ScriptedRacer;

use rubiks_puzzle::Cube;

/// Decision maker that picks the next cube to slide into the blank.
///
/// Both calls may block for as long as they like and cannot be cancelled.
/// The race controller runs them on a dedicated thread and stops listening
/// once its deadline expires.
pub trait Racer: Send {
    /// Returns the racer's display name.
    fn name(&self) -> &str;

    /// Called once with the starting board and goal, before the first
    /// [`Racer::next`].
    fn init(&mut self, _cubes: &[Cube], _goal: &[Cube]) {}

    /// Returns the board index (0-24) of the cube to move on try `try_count`
    /// (starting at 1).
    fn next(&mut self, try_count: u32) -> usize;
}

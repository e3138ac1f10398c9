//! Rubik's Race driver.
//!
//! Races a pluggable [`Racer`] against the clock on a
//! [`rubiks_puzzle::Puzzle`]. A [`RaceController`] asks the racer for one
//! cube at a time under a deadline and applies its answers; a
//! [`PresentationClock`] renders snapshots at a fixed rate and paces the
//! slide animation. [`RaceSession`] runs both and reacts to user input.
//!
//! # Architecture
//!
//! - **Racers**: [`Racer`] implementations resolved by name from a [`RacerRegistry`]
//! - **Race**: controller, clock and the [`RaceSnapshot`]s they share
//! - **Session**: task wiring, quit and hold-on-finish
//! - **TUI**: ratatui rendering and crossterm input
//!
//! # Example
//!
//! ```no_run
//! use rubiks_race::{LogRenderer, RaceSession, RaceSettings, RacerOptions, RacerRegistry};
//! use rubiks_puzzle::Puzzle;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let racer = RacerRegistry::with_builtins().create("rooney", &RacerOptions::default())?;
//! let (_events, rx) = tokio::sync::mpsc::unbounded_channel();
//! let outcome = RaceSession::new(Puzzle::random(), racer, RaceSettings::default())
//!     .run(LogRenderer, rx)
//!     .await?;
//! println!("{outcome:?}");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod cli;
mod config;
mod error;
mod logging;
mod race;
mod racer;
mod session;
mod tui;

// Crate-level exports - Command line
pub use cli::{Cli, Command, RaceArgs};

// Crate-level exports - Configuration
pub use config::{MAX_FPS, MAX_FRAMES_PER_MOVE, RaceConfig};

// Crate-level exports - Errors
pub use error::{ConfigError, DecisionError, SessionError};

// Crate-level exports - Logging
pub use logging::{PanicLog, init_file, init_stderr};

// Crate-level exports - Race
pub use race::{
    ClockStop, LogRenderer, MoveRecord, PresentationClock, RaceController, RaceReport,
    RaceSettings, RaceSnapshot, RaceStatus, Renderer,
};

// Crate-level exports - Racers
pub use racer::{Racer, RacerFactory, RacerOptions, RacerRegistry, RooneyRacer, ScriptedRacer};

// Crate-level exports - Session
pub use session::{RaceOutcome, RaceSession, SessionEvent};

// Crate-level exports - Terminal UI
pub use tui::{
    InputListener, TerminalGuard, TerminalRenderer, cube_offset, draw, run_tui, session_event,
};

//! Terminal UI for watching a race.

mod input;
mod ui;

pub use input::{InputListener, session_event};
pub use ui::{cube_offset, draw};

use crate::error::SessionError;
use crate::logging::PanicLog;
use crate::race::{RaceSettings, RaceSnapshot, Renderer};
use crate::racer::Racer;
use crate::session::{RaceOutcome, RaceSession};
use crossterm::{
    cursor::{Hide, Show},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use rubiks_puzzle::Puzzle;
use std::io::{self, Stdout};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

/// Puts the terminal into raw mode on the alternate screen and restores it
/// exactly once, on [`TerminalGuard::restore`] or on drop.
#[derive(Debug)]
pub struct TerminalGuard {
    active: bool,
}

impl TerminalGuard {
    /// Enters raw mode and the alternate screen, hiding the cursor.
    pub fn enter() -> Result<Self, SessionError> {
        enable_raw_mode()?;
        // From here on, a failure restores the terminal through Drop.
        let guard = Self { active: true };
        execute!(io::stdout(), EnterAlternateScreen, Hide)?;
        debug!("Terminal prepared");
        Ok(guard)
    }

    /// Gives the terminal back. Later calls do nothing.
    pub fn restore(&mut self) -> Result<(), SessionError> {
        if !self.active {
            return Ok(());
        }
        self.active = false;

        let raw = disable_raw_mode();
        execute!(io::stdout(), Show, LeaveAlternateScreen)?;
        raw?;
        debug!("Terminal restored");
        Ok(())
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            warn!(error = %e, "Failed to restore terminal");
        }
    }
}

/// Draws snapshots on the real terminal.
pub struct TerminalRenderer {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalRenderer {
    /// Creates a renderer writing to stdout.
    pub fn new() -> Result<Self, SessionError> {
        let terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
        Ok(Self { terminal })
    }
}

impl Renderer for TerminalRenderer {
    fn render(&mut self, snapshot: &RaceSnapshot) -> anyhow::Result<()> {
        self.terminal.draw(|frame| draw(frame, snapshot))?;
        Ok(())
    }

    fn resize(&mut self) -> anyhow::Result<()> {
        self.terminal.autoresize()?;
        self.terminal.clear()?;
        Ok(())
    }
}

/// Runs one race on the terminal.
///
/// The terminal is restored before this returns, whether the race finished,
/// the user quit or something failed.
#[instrument(skip(puzzle, racer, settings), fields(racer = %racer.name()))]
pub async fn run_tui(
    puzzle: Puzzle,
    racer: Box<dyn Racer>,
    settings: RaceSettings,
    hold: bool,
) -> anyhow::Result<RaceOutcome> {
    info!("Starting race TUI");

    // Declared first so the hook outlives the terminal guard.
    let _panic_log = PanicLog::install();
    let mut guard = TerminalGuard::enter()?;
    let renderer = TerminalRenderer::new()?;
    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let input = InputListener::spawn(event_tx)?;

    let outcome = RaceSession::new(puzzle, racer, settings)
        .hold_on_finish(hold)
        .run(renderer, event_rx)
        .await;

    drop(input);
    guard.restore()?;
    outcome
}

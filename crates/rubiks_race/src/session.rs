//! One race from start to teardown: controller, clock and user events.

use crate::race::{
    ClockStop, PresentationClock, RaceController, RaceReport, RaceSettings, RaceSnapshot,
    Renderer,
};
use crate::racer::Racer;
use rubiks_puzzle::Puzzle;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, instrument, warn};

/// Input the session reacts to while a race is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// Stop immediately.
    Quit,
    /// The display changed size.
    Resize,
}

/// How a session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RaceOutcome {
    /// The race reached a terminal status.
    Finished(RaceReport),
    /// The user quit first; holds the last published snapshot.
    Quit(RaceSnapshot),
}

/// Runs one race: the controller and the presentation clock as separate
/// tasks, with user events from a channel.
pub struct RaceSession {
    controller: RaceController,
    clock: PresentationClock,
    hold: bool,
}

impl RaceSession {
    /// Wires a controller for `puzzle` and `racer` to a fresh clock.
    pub fn new(puzzle: Puzzle, racer: Box<dyn Racer>, settings: RaceSettings) -> Self {
        let (clock, ticks) = PresentationClock::new(settings.tick_interval());
        let controller = RaceController::new(puzzle, racer, settings, ticks);
        Self {
            controller,
            clock,
            hold: false,
        }
    }

    /// Keeps the final frame on screen until [`SessionEvent::Quit`].
    pub fn hold_on_finish(mut self, hold: bool) -> Self {
        self.hold = hold;
        self
    }

    /// Receiver of every snapshot the controller publishes.
    pub fn snapshots(&self) -> watch::Receiver<RaceSnapshot> {
        self.controller.subscribe()
    }

    /// Runs the race to its end or until the user quits.
    ///
    /// # Errors
    ///
    /// Returns the renderer's error, or a join error if a task panicked.
    /// Either one aborts the race.
    #[instrument(skip_all, fields(hold = self.hold))]
    pub async fn run<R: Renderer>(
        self,
        renderer: R,
        mut events: mpsc::UnboundedReceiver<SessionEvent>,
    ) -> anyhow::Result<RaceOutcome> {
        let snapshots = self.controller.subscribe();
        let (resize_tx, resize_rx) = mpsc::unbounded_channel();

        let mut race = tokio::spawn(self.controller.run());
        let mut clock = tokio::spawn(self.clock.run(renderer, snapshots.clone(), resize_rx));
        let mut events_open = true;

        let joined = loop {
            tokio::select! {
                joined = &mut clock => break joined,
                event = events.recv(), if events_open => match event {
                    Some(SessionEvent::Quit) => {
                        info!("Quit requested, stopping the race");
                        race.abort();
                        clock.abort();
                        let _ = race.await;
                        let _ = clock.await;
                        let last = snapshots.borrow().clone();
                        return Ok(RaceOutcome::Quit(last));
                    }
                    Some(SessionEvent::Resize) => {
                        let _ = resize_tx.send(());
                    }
                    None => {
                        debug!("Event channel closed");
                        events_open = false;
                    }
                },
            }
        };

        let stop = match joined {
            Ok(Ok(stop)) => stop,
            Ok(Err(e)) => {
                warn!(error = %e, "Presentation failed, aborting the race");
                race.abort();
                let _ = race.await;
                return Err(e);
            }
            Err(e) => {
                race.abort();
                let _ = race.await;
                return Err(e.into());
            }
        };

        let report = race.await?;
        info!(%report, "Race finished");

        if self.hold && events_open {
            hold(stop, &mut events).await?;
        }

        Ok(RaceOutcome::Finished(report))
    }
}

/// Keeps redrawing the final frame on resize until the user quits.
async fn hold<R: Renderer>(
    stop: ClockStop<R>,
    events: &mut mpsc::UnboundedReceiver<SessionEvent>,
) -> anyhow::Result<()> {
    let ClockStop {
        mut renderer,
        last,
    } = stop;
    debug!("Holding the final frame");

    while let Some(event) = events.recv().await {
        match event {
            SessionEvent::Quit => break,
            SessionEvent::Resize => {
                renderer.resize()?;
                renderer.render(&last)?;
            }
        }
    }
    Ok(())
}

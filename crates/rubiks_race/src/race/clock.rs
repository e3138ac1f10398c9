//! Fixed-rate presentation clock.

use super::RaceSnapshot;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::time::MissedTickBehavior;
use tracing::{debug, instrument, trace};

const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Something that can show a [`RaceSnapshot`].
pub trait Renderer: Send + 'static {
    /// Draws one frame.
    fn render(&mut self, snapshot: &RaceSnapshot) -> anyhow::Result<()>;

    /// Called when the display size changed.
    fn resize(&mut self) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Renderer for headless runs: each frame becomes a `trace!` event.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogRenderer;

impl Renderer for LogRenderer {
    fn render(&mut self, snapshot: &RaceSnapshot) -> anyhow::Result<()> {
        trace!(
            status = %snapshot.status(),
            try_count = snapshot.try_count(),
            frame = snapshot.animation_frame(),
            blank = snapshot.blank_index(),
            "Frame"
        );
        Ok(())
    }
}

/// How the clock stopped: the renderer and the final snapshot it drew.
#[derive(Debug)]
pub struct ClockStop<R> {
    /// The renderer, handed back for any further drawing.
    pub renderer: R,
    /// The terminal snapshot rendered last.
    pub last: RaceSnapshot,
}

/// Renders the latest snapshot on a fixed schedule and publishes a tick
/// counter the race controller paces its animation on.
#[derive(Debug)]
pub struct PresentationClock {
    interval: Duration,
    ticks: watch::Sender<u64>,
}

impl PresentationClock {
    /// Creates a clock ticking every `interval`, plus the receiver the
    /// controller waits on.
    pub fn new(interval: Duration) -> (Self, watch::Receiver<u64>) {
        let (ticks, rx) = watch::channel(0);
        (Self { interval, ticks }, rx)
    }

    /// Ticks until a terminal snapshot has been rendered once.
    ///
    /// Never blocks on the controller: each tick renders whatever snapshot
    /// was published last. Resize requests arriving on `resizes` are passed
    /// to [`Renderer::resize`].
    ///
    /// # Errors
    ///
    /// Returns the renderer's error if drawing fails.
    #[instrument(skip_all, fields(interval = ?self.interval))]
    pub async fn run<R: Renderer>(
        self,
        mut renderer: R,
        mut snapshots: watch::Receiver<RaceSnapshot>,
        mut resizes: mpsc::UnboundedReceiver<()>,
    ) -> anyhow::Result<ClockStop<R>> {
        // A zero period would panic inside tokio.
        let period = self.interval.max(MIN_INTERVAL);
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut tick: u64 = 0;

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    let snapshot = snapshots.borrow_and_update().clone();
                    renderer.render(&snapshot)?;

                    if snapshot.status().is_terminal() {
                        debug!(ticks = tick, status = %snapshot.status(), "Final frame rendered");
                        return Ok(ClockStop { renderer, last: snapshot });
                    }

                    tick += 1;
                    self.ticks.send_replace(tick);
                }
                Some(()) = resizes.recv() => {
                    debug!("Display resized");
                    renderer.resize()?;
                }
            }
        }
    }
}

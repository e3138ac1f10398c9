//! Race controller: asks the racer for moves and applies them to the puzzle.

use super::decision::{self, Decision, Opening};
use super::{MoveRecord, RaceReport, RaceSettings, RaceSnapshot, RaceStatus};
use crate::error::DecisionError;
use crate::racer::Racer;
use rubiks_puzzle::{Direction, Puzzle};
use std::time::{Duration, Instant};
use tokio::sync::watch;
use tracing::{debug, error, info, instrument, warn};

/// Mutable race bookkeeping, owned by the controller alone.
#[derive(Debug)]
struct RaceState {
    status: RaceStatus,
    try_count: u32,
    active_cell: Option<usize>,
    last_direction: Option<Direction>,
    animation_frame: u32,
    started_at: Instant,
    finished_after: Option<Duration>,
}

impl RaceState {
    fn new(frames_per_move: u32) -> Self {
        Self {
            status: RaceStatus::Running,
            try_count: 0,
            active_cell: None,
            last_direction: None,
            // Nothing is sliding before the first move.
            animation_frame: frames_per_move,
            started_at: Instant::now(),
            finished_after: None,
        }
    }

    fn elapsed(&self) -> Duration {
        self.finished_after
            .unwrap_or_else(|| self.started_at.elapsed())
    }
}

/// Drives decision/apply cycles until the race reaches a terminal status.
///
/// The controller is the only writer of the puzzle and race state. Readers
/// get [`RaceSnapshot`]s through [`RaceController::subscribe`]. Animation
/// pacing comes from the presentation clock's tick counter: after each move
/// the controller waits for `frames_per_move` fresh ticks before asking the
/// racer again.
pub struct RaceController {
    puzzle: Puzzle,
    racer: Option<Box<dyn Racer>>,
    racer_name: String,
    settings: RaceSettings,
    state: RaceState,
    moves: Vec<MoveRecord>,
    snapshots: watch::Sender<RaceSnapshot>,
    ticks: watch::Receiver<u64>,
}

impl RaceController {
    /// Creates a controller for `puzzle`, paced by the clock's `ticks`.
    pub fn new(
        puzzle: Puzzle,
        racer: Box<dyn Racer>,
        settings: RaceSettings,
        ticks: watch::Receiver<u64>,
    ) -> Self {
        let state = RaceState::new(settings.frames_per_move());
        let racer_name = racer.name().to_string();
        let (snapshots, _) = watch::channel(capture(&puzzle, &state, &settings));

        Self {
            puzzle,
            racer: Some(racer),
            racer_name,
            settings,
            state,
            moves: Vec::new(),
            snapshots,
            ticks,
        }
    }

    /// Returns a receiver that always holds the latest snapshot.
    pub fn subscribe(&self) -> watch::Receiver<RaceSnapshot> {
        self.snapshots.subscribe()
    }

    /// Current snapshot.
    pub fn snapshot(&self) -> RaceSnapshot {
        capture(&self.puzzle, &self.state, &self.settings)
    }

    /// Runs the race loop to a terminal status.
    ///
    /// Returns early, with status still `Running`, only if the presentation
    /// clock stops ticking.
    #[instrument(skip(self), fields(racer = %self.racer_name))]
    pub async fn run(mut self) -> RaceReport {
        self.state.started_at = Instant::now();
        self.publish();
        info!(layout = %self.puzzle.layout(), "Race started");

        while self.state.status == RaceStatus::Running {
            if !self.wait_for_animation().await {
                warn!(
                    try_count = self.state.try_count,
                    "Presentation clock stopped, leaving the race unfinished"
                );
                break;
            }

            if self.puzzle.is_complete() {
                self.finish(RaceStatus::Complete);
                info!(
                    try_count = self.state.try_count,
                    elapsed = ?self.state.elapsed(),
                    "COMPLETE"
                );
                break;
            }

            self.decide().await;
        }

        RaceReport::new(
            self.state.status,
            self.state.try_count,
            self.state.elapsed(),
            self.moves,
            self.puzzle.layout(),
        )
    }

    /// Waits for the moving cube to finish sliding, one tick per frame.
    ///
    /// Returns false if the clock is gone.
    async fn wait_for_animation(&mut self) -> bool {
        while self.state.animation_frame < self.settings.frames_per_move() {
            if self.ticks.changed().await.is_err() {
                return false;
            }
            self.state.animation_frame += 1;
            self.publish();
        }
        true
    }

    /// One decision cycle: ask the racer, then apply or end the race.
    async fn decide(&mut self) {
        let Some(racer) = self.racer.take() else {
            error!("Racer is gone, retiring");
            self.finish(RaceStatus::Retire);
            return;
        };

        let opening = (self.state.try_count == 0).then(|| Opening {
            cubes: self.puzzle.cubes().to_vec(),
            goal: self.puzzle.goal().to_vec(),
        });
        self.state.try_count += 1;
        let try_count = self.state.try_count;
        self.publish();
        debug!(try_count, "Asking racer for the next cube");

        match decision::request(racer, opening, try_count, self.settings.decision_timeout()).await
        {
            Ok(Decision { racer, index }) => {
                self.racer = Some(racer);
                self.apply(index);
            }
            Err(e @ DecisionError::Timeout { .. }) => {
                error!(try_count, error = %e, "Racer timed out");
                self.finish(RaceStatus::Timeout);
            }
            Err(e) => {
                error!(try_count, error = %e, "Racer gave no answer, retiring");
                self.finish(RaceStatus::Retire);
            }
        }
    }

    /// Applies the racer's answer.
    fn apply(&mut self, index: usize) {
        let try_count = self.state.try_count;
        let landing = self.puzzle.blank_index();
        self.state.active_cell = Some(landing);

        match self.puzzle.move_cube(index) {
            Ok(direction) => {
                let cube = self.puzzle.cubes()[landing];
                self.state.last_direction = Some(direction);
                self.state.animation_frame = 0;
                self.moves
                    .push(MoveRecord::new(try_count, cube, index, landing, direction));
                info!(try_count, cube = %cube, index, %direction, "MOVE");

                // Ticks seen while the racer was thinking must not count
                // towards this move's animation.
                self.ticks.mark_unchanged();
                self.publish();
            }
            Err(e) => {
                error!(
                    try_count,
                    error = %e,
                    movable = ?self.puzzle.movable(),
                    "Invalid move, retiring"
                );
                self.finish(RaceStatus::Retire);
            }
        }
    }

    fn finish(&mut self, status: RaceStatus) {
        self.state.status = status;
        self.state.finished_after = Some(self.state.started_at.elapsed());
        self.publish();
    }

    fn publish(&self) {
        self.snapshots
            .send_replace(capture(&self.puzzle, &self.state, &self.settings));
    }
}

fn capture(puzzle: &Puzzle, state: &RaceState, settings: &RaceSettings) -> RaceSnapshot {
    RaceSnapshot {
        cubes: *puzzle.cubes(),
        goal: *puzzle.goal(),
        blank_index: puzzle.blank_index(),
        status: state.status,
        try_count: state.try_count,
        started_at: state.started_at,
        finished_after: state.finished_after,
        active_cell: state.active_cell,
        last_direction: state.last_direction,
        animation_frame: state.animation_frame,
        frames_per_move: settings.frames_per_move(),
    }
}

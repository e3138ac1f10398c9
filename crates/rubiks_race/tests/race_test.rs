//! Tests for the race loop: decisions, deadlines, pacing and quitting.

use rubiks_puzzle::{Cube, Direction, Puzzle, PuzzleLayout};
use rubiks_race::{
    LogRenderer, RaceOutcome, RaceReport, RaceSession, RaceSettings, RaceSnapshot, RaceStatus,
    Racer, Renderer, ScriptedRacer, SessionEvent,
};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// Centre matches `GROWBYGRO` except the blank at 18; moving 19 solves it.
const ONE_MOVE: &str = "YYYYYYGROYYWBYYYGRXOYYYYY:GROWBYGRO";
/// Centre already matches the goal.
const SOLVED: &str = "YYYYYYGROYYWBYYYGROYYYYYX:GROWBYGRO";

fn puzzle(layout: &str) -> Puzzle {
    let layout = PuzzleLayout::parse(layout).expect("Invalid test layout");
    Puzzle::builder().with_layout(layout).build()
}

fn fast_settings() -> RaceSettings {
    RaceSettings::default()
        .with_tick_interval(Duration::from_millis(2))
        .with_frames_per_move(3)
        .with_decision_timeout(Duration::from_millis(200))
}

async fn race(puzzle: Puzzle, racer: impl Racer + 'static, settings: RaceSettings) -> RaceReport {
    let (_events, rx) = mpsc::unbounded_channel();
    let outcome = RaceSession::new(puzzle, Box::new(racer), settings)
        .run(LogRenderer, rx)
        .await
        .expect("Race failed");

    match outcome {
        RaceOutcome::Finished(report) => report,
        RaceOutcome::Quit(_) => panic!("Race ended by quit"),
    }
}

/// Records every call it receives and replays a script.
struct RecordingRacer {
    calls: Arc<Mutex<Vec<String>>>,
    script: ScriptedRacer,
}

impl RecordingRacer {
    fn new(script: Vec<usize>) -> (Self, Arc<Mutex<Vec<String>>>) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let racer = Self {
            calls: Arc::clone(&calls),
            script: ScriptedRacer::new(script),
        };
        (racer, calls)
    }
}

impl Racer for RecordingRacer {
    fn name(&self) -> &str {
        "recording"
    }

    fn init(&mut self, cubes: &[Cube], goal: &[Cube]) {
        let blank = cubes.iter().position(|c| c.is_blank());
        self.calls
            .lock()
            .unwrap()
            .push(format!("init {:?} {}", blank, goal.len()));
    }

    fn next(&mut self, try_count: u32) -> usize {
        self.calls.lock().unwrap().push(format!("next {try_count}"));
        self.script.next(try_count)
    }
}

/// Sleeps before answering with `answer`.
struct SlowRacer {
    delay: Duration,
    answer: usize,
}

impl Racer for SlowRacer {
    fn name(&self) -> &str {
        "slow"
    }

    fn next(&mut self, _try_count: u32) -> usize {
        std::thread::sleep(self.delay);
        self.answer
    }
}

struct PanickingRacer;

impl Racer for PanickingRacer {
    fn name(&self) -> &str {
        "panicking"
    }

    fn next(&mut self, _try_count: u32) -> usize {
        panic!("racer failure");
    }
}

/// Keeps every snapshot it is asked to draw.
#[derive(Clone, Default)]
struct RecordingRenderer {
    frames: Arc<Mutex<Vec<RaceSnapshot>>>,
}

impl Renderer for RecordingRenderer {
    fn render(&mut self, snapshot: &RaceSnapshot) -> anyhow::Result<()> {
        self.frames.lock().unwrap().push(snapshot.clone());
        Ok(())
    }
}

#[tokio::test]
async fn test_one_move_completes() {
    let report = race(puzzle(ONE_MOVE), ScriptedRacer::new(vec![19]), fast_settings()).await;

    assert_eq!(*report.status(), RaceStatus::Complete);
    assert_eq!(*report.try_count(), 1);
    assert_eq!(report.moves().len(), 1);

    let record = report.moves()[0];
    assert_eq!(*record.cube(), Cube::O);
    assert_eq!(*record.from(), 19);
    assert_eq!(*record.to(), 18);
    assert_eq!(*record.direction(), Direction::Right);
}

#[tokio::test]
async fn test_solved_board_never_asks_the_racer() {
    let (racer, calls) = RecordingRacer::new(vec![23]);
    let report = race(puzzle(SOLVED), racer, fast_settings()).await;

    assert_eq!(*report.status(), RaceStatus::Complete);
    assert_eq!(*report.try_count(), 0);
    assert!(report.moves().is_empty());
    assert!(calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_init_runs_once_before_first_next() {
    let (racer, calls) = RecordingRacer::new(vec![13, 18, 19]);
    let report = race(puzzle(ONE_MOVE), racer, fast_settings()).await;

    assert_eq!(*report.status(), RaceStatus::Complete);
    assert_eq!(
        *calls.lock().unwrap(),
        vec!["init Some(18) 9", "next 1", "next 2", "next 3"]
    );
}

#[tokio::test]
async fn test_invalid_first_move_retires() {
    let start = puzzle(SOLVED.replace("GROWBYGRO", "RRRRRRRRR").as_str());
    let layout = start.layout();

    let report = race(start, ScriptedRacer::new(vec![0]), fast_settings()).await;

    assert_eq!(*report.status(), RaceStatus::Retire);
    assert_eq!(*report.try_count(), 1);
    assert!(report.moves().is_empty());
    assert_eq!(report.layout(), &layout);
}

#[tokio::test]
async fn test_exhausted_script_retires() {
    let report = race(puzzle(ONE_MOVE), ScriptedRacer::new(vec![13]), fast_settings()).await;

    assert_eq!(*report.status(), RaceStatus::Retire);
    assert_eq!(*report.try_count(), 2);
    assert_eq!(report.moves().len(), 1);
}

#[tokio::test]
async fn test_panicking_racer_retires() {
    let report = race(puzzle(ONE_MOVE), PanickingRacer, fast_settings()).await;

    assert_eq!(*report.status(), RaceStatus::Retire);
    assert_eq!(*report.try_count(), 1);
}

#[tokio::test]
async fn test_slow_racer_times_out() {
    let racer = SlowRacer {
        delay: Duration::from_secs(1),
        answer: 19,
    };
    let settings = fast_settings().with_decision_timeout(Duration::from_millis(100));
    let report = race(puzzle(ONE_MOVE), racer, settings).await;

    assert_eq!(*report.status(), RaceStatus::Timeout);
    assert_eq!(*report.try_count(), 1);
    assert!(report.moves().is_empty());
}

#[tokio::test]
async fn test_late_answer_is_discarded() {
    let start = puzzle(ONE_MOVE);
    let cubes = *start.cubes();
    let racer = SlowRacer {
        delay: Duration::from_millis(300),
        answer: 19,
    };
    let settings = fast_settings().with_decision_timeout(Duration::from_millis(100));

    let session = RaceSession::new(start, Box::new(racer), settings);
    let snapshots = session.snapshots();
    let (_events, rx) = mpsc::unbounded_channel();
    let outcome = session.run(LogRenderer, rx).await.expect("Race failed");
    assert!(matches!(outcome, RaceOutcome::Finished(_)));

    // Give the racer time to answer after the deadline.
    tokio::time::sleep(Duration::from_millis(500)).await;

    let last = snapshots.borrow().clone();
    assert_eq!(*last.status(), RaceStatus::Timeout);
    assert_eq!(*last.try_count(), 1);
    assert_eq!(*last.cubes(), cubes);
    assert_eq!(*last.blank_index(), 18);
}

#[tokio::test]
async fn test_default_deadline_is_five_seconds() {
    let racer = SlowRacer {
        delay: Duration::from_secs(8),
        answer: 19,
    };
    let settings = RaceSettings::default().with_tick_interval(Duration::from_millis(5));
    let report = race(puzzle(ONE_MOVE), racer, settings).await;

    assert_eq!(*report.status(), RaceStatus::Timeout);
    assert_eq!(*report.try_count(), 1);
    assert!(*report.elapsed() >= Duration::from_secs(5));
}

#[tokio::test]
async fn test_races_are_deterministic() {
    let first = race(puzzle(ONE_MOVE), ScriptedRacer::new(vec![13, 18, 19]), fast_settings()).await;
    let second = race(puzzle(ONE_MOVE), ScriptedRacer::new(vec![13, 18, 19]), fast_settings()).await;

    assert_eq!(*first.status(), RaceStatus::Complete);
    assert_eq!(first.status(), second.status());
    assert_eq!(first.try_count(), second.try_count());
    assert_eq!(first.moves(), second.moves());
    assert_eq!(first.layout(), second.layout());
}

#[tokio::test]
async fn test_terminal_frame_rendered_once_after_full_animations() {
    let renderer = RecordingRenderer::default();
    let frames = Arc::clone(&renderer.frames);
    let (_events, rx) = mpsc::unbounded_channel();

    let session = RaceSession::new(
        puzzle(ONE_MOVE),
        Box::new(ScriptedRacer::new(vec![13, 18, 19])),
        fast_settings(),
    );
    let outcome = session.run(renderer, rx).await.expect("Race failed");
    assert!(matches!(outcome, RaceOutcome::Finished(_)));

    let frames = frames.lock().unwrap();
    let terminal: Vec<_> = frames.iter().filter(|f| f.status().is_terminal()).collect();
    assert_eq!(terminal.len(), 1);
    assert!(frames.last().unwrap().status().is_terminal());
    assert!(frames.len() >= 3 * 3);

    // Every animation frame of every move reaches the screen before the
    // next decision.
    for try_count in 1..=3 {
        for frame in 0..3 {
            assert!(
                frames.iter().any(|f| *f.try_count() == try_count
                    && *f.animation_frame() == frame
                    && *f.status() == RaceStatus::Running),
                "try {try_count} frame {frame} never rendered"
            );
        }
    }
}

#[tokio::test]
async fn test_quit_stops_a_hung_race() {
    let racer = SlowRacer {
        delay: Duration::from_secs(10),
        answer: 19,
    };
    let settings = fast_settings().with_decision_timeout(Duration::from_secs(30));
    let (events, rx) = mpsc::unbounded_channel();

    let session = tokio::spawn(RaceSession::new(puzzle(ONE_MOVE), Box::new(racer), settings).run(LogRenderer, rx));
    tokio::time::sleep(Duration::from_millis(50)).await;

    let quit_at = Instant::now();
    events.send(SessionEvent::Quit).unwrap();
    let outcome = tokio::time::timeout(Duration::from_secs(1), session)
        .await
        .expect("Quit took too long")
        .expect("Session task failed")
        .expect("Race failed");

    assert!(quit_at.elapsed() < Duration::from_secs(1));
    match outcome {
        RaceOutcome::Quit(last) => {
            assert_eq!(*last.status(), RaceStatus::Running);
            assert_eq!(*last.try_count(), 1);
        }
        RaceOutcome::Finished(report) => panic!("Race finished: {report}"),
    }
}

#[tokio::test]
async fn test_hold_waits_for_quit() {
    let (events, rx) = mpsc::unbounded_channel();
    let session = RaceSession::new(puzzle(SOLVED), Box::new(ScriptedRacer::new(vec![23])), fast_settings())
        .hold_on_finish(true);
    let run = tokio::spawn(session.run(LogRenderer, rx));

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(!run.is_finished());

    events.send(SessionEvent::Resize).unwrap();
    events.send(SessionEvent::Quit).unwrap();
    let outcome = tokio::time::timeout(Duration::from_secs(1), run)
        .await
        .expect("Hold did not end on quit")
        .expect("Session task failed")
        .expect("Race failed");

    match outcome {
        RaceOutcome::Finished(report) => assert_eq!(*report.status(), RaceStatus::Complete),
        RaceOutcome::Quit(_) => panic!("Finished race reported as quit"),
    }
}

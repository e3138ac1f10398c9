//! Race configuration loaded from TOML and command-line overrides.

use crate::error::ConfigError;
use crate::race::RaceSettings;
use crate::racer::RacerOptions;
use derive_getters::Getters;
use derive_setters::Setters;
use rubiks_puzzle::{Adjacency, Puzzle, PuzzleLayout};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Everything needed to set up one race.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
#[setters(prefix = "with_")]
pub struct RaceConfig {
    /// Registered racer name.
    #[serde(default = "default_racer")]
    racer: String,

    /// Fixed `CUBES:GOAL` layout; random when absent.
    #[serde(default)]
    puzzle: Option<String>,

    /// Seed for the random layout and seedable racers.
    #[serde(default)]
    seed: Option<u64>,

    /// Move rule.
    #[serde(default)]
    adjacency: Adjacency,

    /// Presentation ticks per second.
    #[serde(default = "default_fps")]
    fps: u32,

    /// Ticks each move is animated for.
    #[serde(default = "default_frames_per_move")]
    frames_per_move: u32,

    /// Deadline for each racer decision, in milliseconds.
    #[serde(default = "default_decision_timeout_ms")]
    decision_timeout_ms: u64,

    /// Indices replayed by the `scripted` racer.
    #[serde(default)]
    script: Vec<usize>,

    /// Where the TUI writes its log.
    #[serde(default = "default_log_file")]
    log_file: PathBuf,
}

/// Fastest presentation rate accepted, in ticks per second.
pub const MAX_FPS: u32 = 1_000;

/// Longest slide animation accepted, in ticks.
pub const MAX_FRAMES_PER_MOVE: u32 = 600;

fn default_racer() -> String {
    "rooney".to_string()
}

fn default_fps() -> u32 {
    10
}

fn default_frames_per_move() -> u32 {
    3
}

fn default_decision_timeout_ms() -> u64 {
    5_000
}

fn default_log_file() -> PathBuf {
    PathBuf::from("rubiks.log")
}

impl Default for RaceConfig {
    fn default() -> Self {
        Self {
            racer: default_racer(),
            puzzle: None,
            seed: None,
            adjacency: Adjacency::default(),
            fps: default_fps(),
            frames_per_move: default_frames_per_move(),
            decision_timeout_ms: default_decision_timeout_ms(),
            script: Vec::new(),
            log_file: default_log_file(),
        }
    }
}

impl RaceConfig {
    /// Loads configuration from TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            ConfigError::new(format!("Failed to read config file: {}", e))
        })?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(racer = %config.racer, "Config loaded successfully");
        Ok(config)
    }

    /// Rejects settings the race loop cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.racer.trim().is_empty() {
            return Err(ConfigError::new("racer name is empty"));
        }
        if !(1..=MAX_FPS).contains(&self.fps) {
            return Err(ConfigError::new(format!(
                "fps must be between 1 and {}, got {}",
                MAX_FPS, self.fps
            )));
        }
        if !(1..=MAX_FRAMES_PER_MOVE).contains(&self.frames_per_move) {
            return Err(ConfigError::new(format!(
                "frames_per_move must be between 1 and {}, got {}",
                MAX_FRAMES_PER_MOVE, self.frames_per_move
            )));
        }
        if self.decision_timeout_ms == 0 {
            return Err(ConfigError::new("decision_timeout_ms must be at least 1"));
        }
        Ok(())
    }

    /// Timing settings for the race loop and presentation clock.
    pub fn race_settings(&self) -> RaceSettings {
        RaceSettings::default()
            .with_tick_interval(Duration::from_secs(1) / self.fps.clamp(1, MAX_FPS))
            .with_frames_per_move(self.frames_per_move)
            .with_decision_timeout(Duration::from_millis(self.decision_timeout_ms))
    }

    /// Options handed to the racer factory.
    pub fn racer_options(&self) -> RacerOptions {
        RacerOptions::new(self.seed, self.script.clone())
    }

    /// Builds the starting puzzle.
    ///
    /// A malformed layout is logged and replaced by a random puzzle.
    #[instrument(skip(self), fields(layout = ?self.puzzle))]
    pub fn build_puzzle(&self) -> Puzzle {
        let mut builder = Puzzle::builder().with_adjacency(self.adjacency);
        if let Some(seed) = self.seed {
            builder = builder.with_seed(seed);
        }

        if let Some(text) = &self.puzzle {
            match PuzzleLayout::parse(text) {
                Ok(layout) => builder = builder.with_layout(layout),
                Err(e) => warn!(error = %e, "Ignoring malformed puzzle layout, using a random puzzle"),
            }
        }

        builder.build()
    }
}

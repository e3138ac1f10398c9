//! Command-line interface for rubiks_race.

use crate::config::RaceConfig;
use crate::error::ConfigError;
use clap::{Args, Parser, Subcommand};
use rubiks_puzzle::Adjacency;
use std::path::PathBuf;

/// Rubik's Race - watch a racer solve the sliding puzzle against the clock
#[derive(Parser, Debug)]
#[command(name = "rubiks_race")]
#[command(about = "Real-time Rubik's Race driver for pluggable racers", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a race in the terminal UI
    Run {
        /// Race options
        #[command(flatten)]
        race: RaceArgs,

        /// Leave as soon as the race is over instead of waiting for ESC
        #[arg(long)]
        exit_on_finish: bool,
    },

    /// Run a race without a terminal and print the report
    Headless {
        /// Race options
        #[command(flatten)]
        race: RaceArgs,
    },

    /// List the available racers
    Racers,
}

/// Race options shared by `run` and `headless`.
#[derive(Args, Debug, Clone, Default)]
pub struct RaceArgs {
    /// TOML config file, loaded before the flags below are applied
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Racer name
    #[arg(short, long)]
    pub racer: Option<String>,

    /// Fixed puzzle as CUBES:GOAL (24 or 25 board cubes, 9 goal cubes)
    #[arg(short, long)]
    pub puzzle: Option<String>,

    /// Seed for the random puzzle and seedable racers
    #[arg(long)]
    pub seed: Option<u64>,

    /// Move rule: strict or wrapping
    #[arg(long)]
    pub adjacency: Option<Adjacency>,

    /// Presentation ticks per second
    #[arg(long)]
    pub fps: Option<u32>,

    /// Ticks each move is animated for
    #[arg(long)]
    pub frames_per_move: Option<u32>,

    /// Deadline for each racer decision, in milliseconds
    #[arg(long = "timeout-ms")]
    pub timeout_ms: Option<u64>,

    /// Comma-separated board indices for the scripted racer
    #[arg(long, value_delimiter = ',')]
    pub script: Vec<usize>,

    /// Log file for the terminal UI
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl RaceArgs {
    /// Loads the config file (or defaults), applies the flags and validates.
    pub fn resolve(&self) -> Result<RaceConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => RaceConfig::from_file(path)?,
            None => RaceConfig::default(),
        };

        if let Some(racer) = &self.racer {
            config = config.with_racer(racer.clone());
        }
        if let Some(puzzle) = &self.puzzle {
            config = config.with_puzzle(Some(puzzle.clone()));
        }
        if let Some(seed) = self.seed {
            config = config.with_seed(Some(seed));
        }
        if let Some(adjacency) = self.adjacency {
            config = config.with_adjacency(adjacency);
        }
        if let Some(fps) = self.fps {
            config = config.with_fps(fps);
        }
        if let Some(frames) = self.frames_per_move {
            config = config.with_frames_per_move(frames);
        }
        if let Some(timeout_ms) = self.timeout_ms {
            config = config.with_decision_timeout_ms(timeout_ms);
        }
        if !self.script.is_empty() {
            config = config.with_script(self.script.clone());
        }
        if let Some(log_file) = &self.log_file {
            config = config.with_log_file(log_file.clone());
        }

        config.validate()?;
        Ok(config)
    }
}

//! Tests for config files, command-line overrides and puzzle setup.

use clap::Parser;
use rubiks_puzzle::{Adjacency, Cube};
use rubiks_race::{Cli, Command, MAX_FPS, MAX_FRAMES_PER_MOVE, RaceArgs, RaceConfig};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::TempDir;

fn write_config(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("race.toml");
    fs::write(&path, content).expect("Failed to write TOML");
    path
}

fn race_args(args: &[&str]) -> RaceArgs {
    let argv = ["rubiks_race", "headless"].iter().chain(args);
    match Cli::try_parse_from(argv).expect("Failed to parse CLI").command {
        Command::Headless { race } => race,
        other => panic!("unexpected command {other:?}"),
    }
}

#[test]
fn test_defaults() {
    let config = RaceConfig::default();
    assert_eq!(config.racer(), "rooney");
    assert_eq!(*config.fps(), 10);
    assert_eq!(*config.frames_per_move(), 3);
    assert_eq!(*config.decision_timeout_ms(), 5_000);
    assert_eq!(*config.adjacency(), Adjacency::Strict);
    assert!(config.validate().is_ok());

    let settings = config.race_settings();
    assert_eq!(settings.tick_interval(), Duration::from_millis(100));
    assert_eq!(settings.frames_per_move(), 3);
    assert_eq!(settings.decision_timeout(), Duration::from_secs(5));
}

#[test]
fn test_empty_file_uses_defaults() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_config(&dir, "");
    let config = RaceConfig::from_file(&path).expect("Failed to load config");
    assert_eq!(config, RaceConfig::default());
}

#[test]
fn test_file_values_are_loaded() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_config(
        &dir,
        r#"racer = "scripted"
puzzle = "YYYYYYGROYYWBYYYGRXOYYYYY:GROWBYGRO"
seed = 42
adjacency = "wrapping"
fps = 20
frames_per_move = 4
decision_timeout_ms = 250
script = [19]
log_file = "race.log"
"#,
    );

    let config = RaceConfig::from_file(&path).expect("Failed to load config");
    assert_eq!(config.racer(), "scripted");
    assert_eq!(*config.seed(), Some(42));
    assert_eq!(*config.adjacency(), Adjacency::Wrapping);
    assert_eq!(config.script(), &[19]);
    assert_eq!(config.log_file(), &PathBuf::from("race.log"));

    let settings = config.race_settings();
    assert_eq!(settings.tick_interval(), Duration::from_millis(50));
    assert_eq!(settings.frames_per_move(), 4);
    assert_eq!(settings.decision_timeout(), Duration::from_millis(250));
}

#[test]
fn test_unknown_key_is_rejected() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_config(&dir, "speed = 3\n");
    assert!(RaceConfig::from_file(&path).is_err());
}

#[test]
fn test_missing_file_is_an_error() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let err = RaceConfig::from_file(dir.path().join("absent.toml")).unwrap_err();
    assert!(err.message.contains("Failed to read config file"));
}

#[test]
fn test_validate_rejects_zero_rates() {
    let config = RaceConfig::default();
    assert!(config.clone().with_fps(0).validate().is_err());
    assert!(config.clone().with_frames_per_move(0).validate().is_err());
    assert!(config.clone().with_decision_timeout_ms(0).validate().is_err());
    assert!(config.with_racer("  ".to_string()).validate().is_err());
}

#[test]
fn test_validate_bounds_rates() {
    let config = RaceConfig::default();
    assert!(config.clone().with_fps(MAX_FPS).validate().is_ok());
    assert!(config.clone().with_fps(MAX_FPS + 1).validate().is_err());
    assert!(config.clone().with_fps(u32::MAX).validate().is_err());
    assert!(
        config
            .clone()
            .with_frames_per_move(MAX_FRAMES_PER_MOVE)
            .validate()
            .is_ok()
    );
    assert!(
        config
            .with_frames_per_move(MAX_FRAMES_PER_MOVE + 1)
            .validate()
            .is_err()
    );
}

#[test]
fn test_fastest_rate_keeps_a_nonzero_tick() {
    let settings = RaceConfig::default().with_fps(MAX_FPS).race_settings();
    assert_eq!(settings.tick_interval(), Duration::from_millis(1));
}

#[test]
fn test_fixed_puzzle_is_built() {
    let config = RaceConfig::default()
        .with_puzzle(Some("YYYYYYGROYYWBYYYGRXOYYYYY:GROWBYGRO".to_string()))
        .with_adjacency(Adjacency::Wrapping);
    let puzzle = config.build_puzzle();

    assert_eq!(puzzle.blank_index(), 18);
    assert_eq!(puzzle.adjacency(), Adjacency::Wrapping);
    assert_eq!(puzzle.layout(), "YYYYYYGROYYWBYYYGRXOYYYYY:GROWBYGRO");
}

#[test]
fn test_malformed_puzzle_falls_back_to_random() {
    let config = RaceConfig::default().with_puzzle(Some("not a layout".to_string()));
    let puzzle = config.build_puzzle();

    assert_eq!(puzzle.blank_index(), 24);
    assert_eq!(puzzle.cubes().iter().filter(|c| c.is_blank()).count(), 1);
    assert!(!puzzle.goal().contains(&Cube::X));
}

#[test]
fn test_seeded_config_builds_the_same_puzzle() {
    let config = RaceConfig::default().with_seed(Some(11));
    assert_eq!(config.build_puzzle(), config.build_puzzle());
    assert_eq!(*config.racer_options().seed(), Some(11));
}

#[test]
fn test_flags_override_defaults() {
    let config = race_args(&[
        "--racer",
        "scripted",
        "--script",
        "19,18,13",
        "--fps",
        "25",
        "--timeout-ms",
        "300",
        "--adjacency",
        "wrapping",
    ])
    .resolve()
    .expect("Failed to resolve config");

    assert_eq!(config.racer(), "scripted");
    assert_eq!(config.script(), &[19, 18, 13]);
    assert_eq!(*config.fps(), 25);
    assert_eq!(*config.decision_timeout_ms(), 300);
    assert_eq!(*config.adjacency(), Adjacency::Wrapping);
    assert_eq!(config.racer_options().script(), &[19, 18, 13]);
}

#[test]
fn test_flags_override_config_file() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_config(&dir, "racer = \"scripted\"\nscript = [1]\nfps = 5\n");
    let path = path.to_str().expect("Temp path is not UTF-8");

    let config = race_args(&["--config", path, "--fps", "30"])
        .resolve()
        .expect("Failed to resolve config");

    assert_eq!(config.racer(), "scripted");
    assert_eq!(config.script(), &[1]);
    assert_eq!(*config.fps(), 30);
}

#[test]
fn test_resolve_validates() {
    assert!(race_args(&["--frames-per-move", "0"]).resolve().is_err());
    assert!(race_args(&["--frames-per-move", "4294967295"]).resolve().is_err());
    assert!(race_args(&["--fps", "2000000000"]).resolve().is_err());
    assert!(race_args(&["--fps", "1001"]).resolve().is_err());
    assert!(race_args(&["--fps", "1000"]).resolve().is_ok());
    assert!(Cli::try_parse_from(["rubiks_race", "headless", "--adjacency", "diagonal"]).is_err());
}

#[test]
fn test_run_command_flags() {
    let cli = Cli::try_parse_from(["rubiks_race", "run", "--exit-on-finish", "--seed", "3"])
        .expect("Failed to parse CLI");
    match cli.command {
        Command::Run {
            race,
            exit_on_finish,
        } => {
            assert!(exit_on_finish);
            assert_eq!(race.seed, Some(3));
        }
        other => panic!("unexpected command {other:?}"),
    }

    let cli = Cli::try_parse_from(["rubiks_race", "racers"]).expect("Failed to parse CLI");
    assert!(matches!(cli.command, Command::Racers));
}

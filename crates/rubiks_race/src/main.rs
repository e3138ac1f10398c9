//! Rubik's Race - unified CLI
//!
//! Runs a race in the terminal, headless, or lists the racers.

use anyhow::{Context, Result};
use clap::Parser;
use rubiks_race::{
    Cli, Command, LogRenderer, RaceArgs, RaceOutcome, RaceSession, RacerRegistry, SessionEvent,
};
use tokio::sync::mpsc;
use tracing::{info, instrument, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Run {
            race,
            exit_on_finish,
        } => run_terminal(race, exit_on_finish).await,
        Command::Headless { race } => run_headless(race).await,
        Command::Racers => {
            for name in RacerRegistry::with_builtins().names() {
                println!("{name}");
            }
            Ok(())
        }
    }
}

/// Run a race in the terminal UI
async fn run_terminal(args: RaceArgs, exit_on_finish: bool) -> Result<()> {
    let config = args.resolve().context("Invalid race configuration")?;

    // The TUI owns stdout, so logs go to a file
    rubiks_race::init_file(config.log_file())?;
    info!(racer = %config.racer(), "Starting Rubik's Race");

    let racer = RacerRegistry::with_builtins()
        .create(config.racer(), &config.racer_options())
        .context("Failed to create racer")?;
    let puzzle = config.build_puzzle();

    let outcome =
        rubiks_race::run_tui(puzzle, racer, config.race_settings(), !exit_on_finish).await?;
    report(&outcome);
    Ok(())
}

/// Run a race with no terminal, logging to stderr
#[instrument(skip_all)]
async fn run_headless(args: RaceArgs) -> Result<()> {
    rubiks_race::init_stderr();
    let config = args.resolve().context("Invalid race configuration")?;
    info!(racer = %config.racer(), "Starting headless race");

    let racer = RacerRegistry::with_builtins()
        .create(config.racer(), &config.racer_options())
        .context("Failed to create racer")?;
    let puzzle = config.build_puzzle();

    let (event_tx, event_rx) = mpsc::unbounded_channel();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = event_tx.send(SessionEvent::Quit);
        }
    });

    let outcome = RaceSession::new(puzzle, racer, config.race_settings())
        .run(LogRenderer, event_rx)
        .await?;
    report(&outcome);
    Ok(())
}

fn report(outcome: &RaceOutcome) {
    match outcome {
        RaceOutcome::Finished(report) => println!("{report}"),
        RaceOutcome::Quit(last) => {
            warn!(try_count = last.try_count(), "Race abandoned by user");
            println!("Quit after {} tries", last.try_count());
        }
    }
}

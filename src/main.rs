use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::Parser;
use grid_snake::config::{config_path, load_config, GameConfig};
use grid_snake::error::{ConfigError, GameError};
use grid_snake::game::{GamePhase, GameSession, TickOutcome};
use grid_snake::input::{Direction, GameInput, InputHandler, PendingDirection};
use grid_snake::terminal_runtime::TerminalGuard;
use log::{error, info, warn, LevelFilter};
use rand::Rng;
use simplelog::WriteLogger;
use thiserror::Error;

const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(16);

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Board width in cells.
    #[arg(long)]
    width: Option<u16>,

    /// Board height in cells.
    #[arg(long)]
    height: Option<u16>,

    /// Seed for food placement.
    #[arg(long)]
    seed: Option<u64>,

    /// Read settings from this JSON file instead of the default location.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Write a debug log to this file.
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

#[derive(Debug, Error)]
enum RunError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Game(#[from] GameError),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("grid-snake: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), RunError> {
    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let config = resolve_config(&cli)?;
    let mut session = GameSession::new(config)?;
    info!("starting with config {:?}", session.config());

    let mut terminal = TerminalGuard::enter()?;
    let mut input = InputHandler::new(INPUT_POLL_INTERVAL);
    let mut pending = PendingDirection::default();
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(&session)?;

        if let Some(game_input) = input.poll_input()? {
            match game_input {
                GameInput::Quit => break,
                GameInput::Confirm => match session.phase() {
                    GamePhase::NotStarted => {
                        session.start();
                        last_tick = Instant::now();
                    }
                    GamePhase::GameOver => {
                        session = session.restart()?;
                        pending = PendingDirection::default();
                    }
                    GamePhase::Running => {}
                },
                GameInput::Direction(direction) => {
                    if session.phase() == GamePhase::Running {
                        pending.offer(direction);
                    }
                }
            }
        }

        if session.phase() == GamePhase::Running && last_tick.elapsed() >= session.tick_interval() {
            advance(&mut session, pending.take());
            last_tick = Instant::now();
        }
    }

    info!("quit with score {}", session.score());
    Ok(())
}

/// Runs one tick. A food placement failure has already ended the session,
/// so it is logged and the game-over screen takes over.
fn advance<R: Rng>(session: &mut GameSession<R>, direction: Direction) -> TickOutcome {
    session.tick(direction).unwrap_or_else(|e| {
        warn!("session ended: {e}");
        TickOutcome::GameOver
    })
}

fn resolve_config(cli: &Cli) -> Result<GameConfig, ConfigError> {
    let path = cli.config.clone().unwrap_or_else(config_path);
    let mut config = load_config(&path)?;

    if let Some(width) = cli.width {
        config.width = width;
    }
    if let Some(height) = cli.height {
        config.height = height;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    config.validate()?;
    Ok(config)
}

fn init_logging(path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    WriteLogger::init(LevelFilter::Debug, simplelog::Config::default(), file)
        .map_err(io::Error::other)
}

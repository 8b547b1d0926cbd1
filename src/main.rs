use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::{Parser, ValueEnum};
use log::{LevelFilter, error, info, warn};
use simplelog::{Config, WriteLogger};
use torus_snake::clock::TickClock;
use torus_snake::config::{Difficulty, GameConfig, RESERVED_TERMINAL_ROWS};
use torus_snake::game::{GameState, GameStatus};
use torus_snake::grid::GridSize;
use torus_snake::high_scores::{HighScoreStore, HighScores};
use torus_snake::input::InputHandler;
use torus_snake::terminal_runtime::{TerminalSession, install_panic_hook};

/// Redraw cadence while no run is ticking.
const IDLE_WAIT: Duration = Duration::from_millis(50);

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// JSON file overriding the built-in game parameters and themes.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid width in cells.
    #[arg(long)]
    width: Option<u16>,

    /// Grid height in cells.
    #[arg(long)]
    height: Option<u16>,

    /// Size the grid to the current terminal.
    #[arg(long, conflicts_with_all = ["width", "height"])]
    fit: bool,

    /// Theme selected in the menu at startup.
    #[arg(long)]
    theme: Option<String>,

    /// Difficulty selected in the menu at startup.
    #[arg(long, value_enum)]
    difficulty: Option<Difficulty>,

    /// Seed for reproducible food placement.
    #[arg(long)]
    seed: Option<u64>,

    /// High score file (defaults to the platform data directory).
    #[arg(long)]
    scores: Option<PathBuf>,

    /// Write a log to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log level used with --log-file.
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => Self::Error,
            LogLevel::Warn => Self::Warn,
            LogLevel::Info => Self::Info,
            LogLevel::Debug => Self::Debug,
            LogLevel::Trace => Self::Trace,
        }
    }
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        let file = File::create(path)?;
        if let Err(error) = WriteLogger::init(cli.log_level.into(), Config::default(), file) {
            eprintln!("Failed to initialize logging: {error}");
        }
    }

    let config = load_config(&cli)?;
    let store = cli
        .scores
        .clone()
        .map_or_else(HighScoreStore::at_default_location, HighScoreStore::new);
    let high_scores = store.load().unwrap_or_else(|error| {
        warn!("{error}, starting with an empty table");
        HighScores::placeholders()
    });

    let mut state = match cli.seed {
        Some(seed) => GameState::new_with_seed(config, high_scores, seed),
        None => GameState::new(config, high_scores),
    };
    if let Some(theme) = &cli.theme {
        if !state.select_theme(theme) {
            eprintln!("Unknown theme {theme:?}, using {}", state.theme_id());
        }
    }
    if let Some(difficulty) = cli.difficulty {
        state.set_difficulty(difficulty);
    }

    install_panic_hook();
    info!(
        "starting on a {:?} grid, high scores at {}",
        state.bounds(),
        store.path().display()
    );

    let mut session = TerminalSession::enter()?;
    run(&mut session, &mut state, &store)?;
    drop(session);

    println!("...bye");
    Ok(())
}

fn load_config(cli: &Cli) -> io::Result<GameConfig> {
    let mut config = match &cli.config {
        Some(path) => GameConfig::load(path).map_err(io::Error::other)?,
        None => GameConfig::default(),
    };

    if cli.fit {
        let (columns, rows) = crossterm::terminal::size()?;
        config.grid = GridSize::fit_terminal(columns, rows, RESERVED_TERMINAL_ROWS);
    }
    if let Some(width) = cli.width {
        config.grid.width = width;
    }
    if let Some(height) = cli.height {
        config.grid.height = height;
    }

    config.validate().map_err(io::Error::other)?;
    Ok(config)
}

fn run(
    session: &mut TerminalSession,
    state: &mut GameState,
    store: &HighScoreStore,
) -> io::Result<()> {
    let mut input = InputHandler::new();
    let mut clock = TickClock::new(Instant::now(), state.tick_interval());

    loop {
        session.draw(&state.snapshot())?;

        let wait = if state.status == GameStatus::Playing {
            clock.until_next(Instant::now())
        } else {
            IDLE_WAIT
        };

        if let Some(game_input) = input.poll_input(wait)? {
            let was_playing = state.status == GameStatus::Playing;
            state.apply_input(game_input);

            if state.status == GameStatus::Quit {
                break;
            }
            if !was_playing && state.status == GameStatus::Playing {
                clock.restart(Instant::now(), state.tick_interval());
            }
        }

        persist_high_scores(state, store);

        while state.status == GameStatus::Playing && clock.is_due(Instant::now()) {
            let interval = state.tick_interval();
            state.tick(interval);
            clock.advance(Instant::now(), state.tick_interval());
        }
    }

    persist_high_scores(state, store);
    info!("quit with final score {}", state.final_score());
    Ok(())
}

fn persist_high_scores(state: &mut GameState, store: &HighScoreStore) {
    if let Some(scores) = state.take_high_scores_update() {
        if let Err(error) = store.save(scores) {
            error!("failed to save high scores: {error}");
        }
    }
}

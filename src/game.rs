use std::time::Duration;

use log::{debug, info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::collision;
use crate::config::{Difficulty, GameConfig};
use crate::food::{Food, SpawnError};
use crate::growth::GrowthScheduler;
use crate::grid::{GridSize, Position};
use crate::high_scores::{HighScoreEntry, HighScores, MAX_INITIALS};
use crate::input::{Direction, GameInput};
use crate::scoring::ScoreEngine;
use crate::snake::Snake;
use crate::theme::{ThemeCatalog, ThemeColors};

/// Current high-level session state.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    Menu,
    Playing,
    GameOver,
    Quit,
}

/// Why the last run ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameOverReason {
    SelfCollision,
    Aborted,
    BoardFilled,
}

/// One body segment as the presentation layer sees it.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct SegmentView {
    pub position: Position,
    /// Render intensity in percent: 100 at the head, fading to 50 at the tail.
    pub intensity: u8,
}

/// Read-only view of the session handed to the renderer every frame.
#[derive(Debug, Clone)]
pub struct Snapshot<'a> {
    pub bounds: GridSize,
    pub status: GameStatus,
    pub game_over_reason: Option<GameOverReason>,
    pub segments: Vec<SegmentView>,
    pub food: Option<Position>,
    pub theme: &'a ThemeColors,
    pub theme_id: &'a str,
    pub difficulty: Difficulty,
    pub score: u32,
    pub tick_rate: u32,
    pub foods_until_bonus: u32,
    /// Best of the stored table and the current score.
    pub best_score: u32,
    pub high_scores: &'a [HighScoreEntry],
    /// Initials typed so far while a qualifying score awaits submission.
    pub initials: Option<&'a str>,
}

/// Fade hint for the segment at `index` in a body of `len` segments.
#[must_use]
pub fn segment_intensity(index: usize, len: usize) -> u8 {
    if len <= 1 {
        return 100;
    }

    let fade = 50 * index.min(len - 1) / (len - 1);
    // fade is at most 50.
    100 - fade as u8
}

/// Complete mutable state for one program session: menu selections, the
/// current run and the high-score table.
#[derive(Debug, Clone)]
pub struct GameState {
    pub snake: Snake,
    pub food: Option<Food>,
    pub status: GameStatus,
    pub tick_count: u64,
    game_over_reason: Option<GameOverReason>,
    config: GameConfig,
    growth: GrowthScheduler,
    scoring: ScoreEngine,
    themes: ThemeCatalog,
    difficulty: Difficulty,
    high_scores: HighScores,
    initials: Option<String>,
    high_scores_changed: bool,
    rng: StdRng,
}

impl GameState {
    /// Creates a session in the menu, seeded from system entropy.
    #[must_use]
    pub fn new(config: GameConfig, high_scores: HighScores) -> Self {
        Self::with_rng(config, high_scores, StdRng::from_entropy())
    }

    /// Creates a deterministic session for tests and reproducible simulations.
    #[must_use]
    pub fn new_with_seed(config: GameConfig, high_scores: HighScores, seed: u64) -> Self {
        Self::with_rng(config, high_scores, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, high_scores: HighScores, rng: StdRng) -> Self {
        let themes = ThemeCatalog::with_overrides(&config.themes);
        let start = config.grid.center();
        let snake = Snake::new(start, Direction::Right, config.direction_queue_capacity);
        let scoring = ScoreEngine::new(&config, config.start_tick_rate(Difficulty::default()));

        Self {
            snake,
            food: None,
            status: GameStatus::Menu,
            tick_count: 0,
            game_over_reason: None,
            config,
            growth: GrowthScheduler::new(),
            scoring,
            themes,
            difficulty: Difficulty::default(),
            high_scores,
            initials: None,
            high_scores_changed: false,
            rng,
        }
    }

    /// Resets the board and enters `Playing` with the current selections.
    pub fn start_run(&mut self) {
        let bounds = self.config.grid;
        let mut snake = Snake::new(
            bounds.center(),
            Direction::Right,
            self.config.direction_queue_capacity,
        );
        for _ in 1..self.config.start_length {
            snake.grow(bounds);
        }

        self.snake = snake;
        self.growth = GrowthScheduler::new();
        self.scoring = ScoreEngine::new(&self.config, self.config.start_tick_rate(self.difficulty));
        self.tick_count = 0;
        self.game_over_reason = None;
        self.initials = None;
        self.status = GameStatus::Playing;

        info!(
            "run started: theme {}, difficulty {}, {} ticks/s",
            self.themes.current_id(),
            self.difficulty.label(),
            self.scoring.tick_rate()
        );

        match Food::spawn(&mut self.rng, bounds, &self.snake, self.config.spawn_attempts) {
            Ok(food) => self.food = Some(food),
            Err(error) => self.board_filled(error),
        }
    }

    /// Advances the run by one tick; `elapsed` is the time since the previous tick.
    pub fn tick(&mut self, elapsed: Duration) {
        if self.status != GameStatus::Playing {
            return;
        }

        let bounds = self.config.grid;
        let grown = self.growth.tick(elapsed, &mut self.snake, bounds);
        if grown > 0 {
            debug!("grew {grown} segment(s), length {}", self.snake.len());
        }

        self.tick_count += 1;
        self.snake.move_forward(bounds);

        let collisions = collision::check(&self.snake, self.food.as_ref());
        if collisions.food {
            let pulses = self.config.growth_pulses;
            self.growth.arm(pulses, self.config.growth_pulse_delay());
            let outcome = self.scoring.on_food_eaten(pulses);
            debug!(
                "food eaten for {:.1} points, {:.1} total",
                outcome.points,
                self.scoring.score()
            );

            match Food::spawn(&mut self.rng, bounds, &self.snake, self.config.spawn_attempts) {
                Ok(food) => self.food = Some(food),
                Err(error) => {
                    self.board_filled(error);
                    return;
                }
            }
        }

        if collisions.body {
            self.end_run(GameOverReason::SelfCollision);
        }
    }

    /// Applies one external input event.
    pub fn apply_input(&mut self, input: GameInput) {
        if input == GameInput::Quit {
            self.status = GameStatus::Quit;
            return;
        }

        match self.status {
            GameStatus::Menu => self.apply_menu_input(input),
            GameStatus::Playing => self.apply_playing_input(input),
            GameStatus::GameOver if self.initials.is_some() => self.apply_initials_input(input),
            GameStatus::GameOver => self.apply_game_over_input(input),
            GameStatus::Quit => {}
        }
    }

    fn apply_menu_input(&mut self, input: GameInput) {
        match input {
            GameInput::Confirm | GameInput::Char(' ') => self.start_run(),
            GameInput::Cancel | GameInput::Char('q' | 'Q') => self.status = GameStatus::Quit,
            other => self.apply_selection_input(other),
        }
    }

    fn apply_playing_input(&mut self, input: GameInput) {
        match input {
            GameInput::Direction(direction) => {
                self.snake.change_direction(direction);
            }
            GameInput::Char('q' | 'Q') => self.status = GameStatus::Quit,
            GameInput::Char(key) => {
                if let Some(direction) = Direction::from_wasd(key) {
                    self.snake.change_direction(direction);
                }
            }
            GameInput::Cancel => self.end_run(GameOverReason::Aborted),
            _ => {}
        }
    }

    fn apply_initials_input(&mut self, input: GameInput) {
        let Some(initials) = self.initials.as_mut() else {
            return;
        };

        match input {
            GameInput::Char(key) if key.is_ascii_alphanumeric() => {
                if initials.len() < MAX_INITIALS {
                    initials.push(key.to_ascii_uppercase());
                }
            }
            GameInput::Backspace => {
                initials.pop();
            }
            GameInput::Confirm => self.submit_initials(),
            GameInput::Cancel => self.initials = None,
            _ => {}
        }
    }

    fn apply_game_over_input(&mut self, input: GameInput) {
        match input {
            GameInput::Confirm | GameInput::Char('r' | 'R' | ' ') => self.start_run(),
            GameInput::Cancel | GameInput::Char('q' | 'Q') => self.status = GameStatus::Quit,
            other => self.apply_selection_input(other),
        }
    }

    /// Up/down cycle themes, left/right change difficulty.
    fn apply_selection_input(&mut self, input: GameInput) {
        match input {
            GameInput::Direction(Direction::Up) => self.themes.select_previous(),
            GameInput::Direction(Direction::Down) => self.themes.select_next(),
            GameInput::Direction(Direction::Left) => self.difficulty = self.difficulty.previous(),
            GameInput::Direction(Direction::Right) => self.difficulty = self.difficulty.next(),
            _ => {}
        }
    }

    fn end_run(&mut self, reason: GameOverReason) {
        let score = self.final_score();
        self.status = GameStatus::GameOver;
        self.game_over_reason = Some(reason);
        self.initials = self
            .high_scores
            .qualifies(score)
            .then(String::new);

        info!(
            "run over ({reason:?}) after {} ticks: score {score}, length {}",
            self.tick_count,
            self.snake.len()
        );
    }

    fn board_filled(&mut self, error: SpawnError) {
        warn!("{error}");
        self.food = None;
        self.end_run(GameOverReason::BoardFilled);
    }

    fn submit_initials(&mut self) {
        let Some(initials) = self.initials.take() else {
            return;
        };

        let score = self.final_score();
        self.high_scores.submit(score, &initials);
        self.high_scores_changed = true;
        info!("high score {score} entered for {initials:?}");
    }

    /// Returns the table once after every change so the caller can persist it.
    pub fn take_high_scores_update(&mut self) -> Option<&HighScores> {
        if !std::mem::take(&mut self.high_scores_changed) {
            return None;
        }

        Some(&self.high_scores)
    }

    /// Selects a theme by name; returns false when it does not exist.
    pub fn select_theme(&mut self, id: &str) -> bool {
        self.themes.select_by_id(id)
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn theme_id(&self) -> &str {
        self.themes.current_id()
    }

    /// Rounded accumulated score of the current or last run.
    #[must_use]
    pub fn final_score(&self) -> u32 {
        self.scoring.rounded_score()
    }

    #[must_use]
    pub fn scoring(&self) -> &ScoreEngine {
        &self.scoring
    }

    #[must_use]
    pub fn growth(&self) -> &GrowthScheduler {
        &self.growth
    }

    #[must_use]
    pub fn high_scores(&self) -> &HighScores {
        &self.high_scores
    }

    #[must_use]
    pub fn game_over_reason(&self) -> Option<GameOverReason> {
        self.game_over_reason
    }

    #[must_use]
    pub fn is_entering_initials(&self) -> bool {
        self.initials.is_some()
    }

    /// Time between two ticks at the current speed.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        self.scoring.tick_interval()
    }

    #[must_use]
    pub fn bounds(&self) -> GridSize {
        self.config.grid
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot<'_> {
        let len = self.snake.len();
        let segments = self
            .snake
            .segments()
            .enumerate()
            .map(|(index, position)| SegmentView {
                position: *position,
                intensity: segment_intensity(index, len),
            })
            .collect();

        Snapshot {
            bounds: self.config.grid,
            status: self.status,
            game_over_reason: self.game_over_reason,
            segments,
            food: self.food.map(|food| food.position),
            theme: self.themes.current(),
            theme_id: self.themes.current_id(),
            difficulty: self.difficulty,
            score: self.final_score(),
            tick_rate: self.scoring.tick_rate(),
            foods_until_bonus: self
                .config
                .bonus_threshold
                .saturating_sub(self.scoring.eat_count()),
            best_score: self.high_scores.best().max(self.final_score()),
            high_scores: self.high_scores.entries(),
            initials: self.initials.as_deref(),
        }
    }
}

use std::fs;
use std::io;
use std::path::Path;
use std::time::Duration;

use clap::ValueEnum;
use serde::Deserialize;
use thiserror::Error;

use crate::grid::GridSize;
use crate::theme::ThemeDef;

/// Default play-field width in cells.
pub const DEFAULT_GRID_WIDTH: u16 = 30;

/// Default play-field height in cells.
pub const DEFAULT_GRID_HEIGHT: u16 = 20;

/// Body length at the start of a run.
pub const DEFAULT_START_LENGTH: u32 = 2;

/// Ticks per second on medium difficulty.
pub const DEFAULT_TICK_RATE: u32 = 20;

/// Tick-rate shift between difficulty levels.
pub const DIFFICULTY_STEP: u32 = 10;

/// Upper bound for the tick rate after bonus speed-ups.
pub const MAX_TICK_RATE: u32 = 60;

/// Segments gained per food.
pub const GROWTH_PULSES: u32 = 3;

/// Delay between two growth pulses in milliseconds.
pub const GROWTH_PULSE_DELAY_MS: u64 = 100;

/// Score value of one grown segment.
pub const POINTS_PER_SEGMENT: f64 = 2.5;

/// Every n-th food triggers the bonus.
pub const BONUS_THRESHOLD: u32 = 10;

/// Score multiplier applied to a bonus eat.
pub const BONUS_MULTIPLIER: f64 = 2.0;

/// Tick-rate increase applied on every bonus.
pub const SPEED_STEP: u32 = 2;

/// Ticks the frame loop may fall behind before it drops the backlog.
pub const MAX_CATCH_UP_TICKS: u32 = 5;

/// Maximum number of buffered turns.
pub const DIRECTION_QUEUE_CAPACITY: usize = 3;

/// Random food placements tried before scanning for free cells.
pub const SPAWN_ATTEMPTS: u32 = 64;

/// Rows taken by the border and the HUD when fitting the grid to the terminal.
pub const RESERVED_TERMINAL_ROWS: u16 = 3;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Selectable base speed.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default, ValueEnum)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Self; 3] = [Self::Easy, Self::Medium, Self::Hard];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }

    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::Easy => Self::Medium,
            Self::Medium | Self::Hard => Self::Hard,
        }
    }

    #[must_use]
    pub fn previous(self) -> Self {
        match self {
            Self::Hard => Self::Medium,
            Self::Medium | Self::Easy => Self::Easy,
        }
    }

    /// Starting tick rate for this difficulty, never below one tick per second.
    #[must_use]
    pub fn tick_rate(self, base: u32, step: u32) -> u32 {
        let rate = match self {
            Self::Easy => base.saturating_sub(step),
            Self::Medium => base,
            Self::Hard => base.saturating_add(step),
        };
        rate.max(1)
    }
}

/// Every tunable the simulation reads. Missing JSON fields keep their defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub grid: GridSize,
    pub start_length: u32,
    pub base_tick_rate: u32,
    pub difficulty_step: u32,
    pub max_tick_rate: u32,
    pub growth_pulses: u32,
    pub growth_pulse_delay_ms: u64,
    pub points_per_segment: f64,
    pub bonus_threshold: u32,
    pub bonus_multiplier: f64,
    pub speed_step: u32,
    pub direction_queue_capacity: usize,
    pub spawn_attempts: u32,
    pub themes: Vec<ThemeDef>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid: GridSize {
                width: DEFAULT_GRID_WIDTH,
                height: DEFAULT_GRID_HEIGHT,
            },
            start_length: DEFAULT_START_LENGTH,
            base_tick_rate: DEFAULT_TICK_RATE,
            difficulty_step: DIFFICULTY_STEP,
            max_tick_rate: MAX_TICK_RATE,
            growth_pulses: GROWTH_PULSES,
            growth_pulse_delay_ms: GROWTH_PULSE_DELAY_MS,
            points_per_segment: POINTS_PER_SEGMENT,
            bonus_threshold: BONUS_THRESHOLD,
            bonus_multiplier: BONUS_MULTIPLIER,
            speed_step: SPEED_STEP,
            direction_queue_capacity: DIRECTION_QUEUE_CAPACITY,
            spawn_attempts: SPAWN_ATTEMPTS,
            themes: Vec::new(),
        }
    }
}

impl GameConfig {
    /// Loads a JSON config file and validates it.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid.width < 2 || self.grid.height < 2 {
            return Err(ConfigError::Invalid(format!(
                "grid must be at least 2x2, got {}x{}",
                self.grid.width, self.grid.height
            )));
        }
        if self.start_length == 0 {
            return Err(ConfigError::Invalid("start_length must be at least 1".into()));
        }
        if usize::try_from(self.start_length).map_or(true, |len| len > self.grid.total_cells()) {
            return Err(ConfigError::Invalid(
                "start_length does not fit on the grid".into(),
            ));
        }
        if self.base_tick_rate == 0 || self.max_tick_rate == 0 {
            return Err(ConfigError::Invalid("tick rates must be positive".into()));
        }
        if self.bonus_threshold == 0 {
            return Err(ConfigError::Invalid("bonus_threshold must be positive".into()));
        }
        if !(self.points_per_segment.is_finite() && self.points_per_segment >= 0.0) {
            return Err(ConfigError::Invalid(
                "points_per_segment must be a non-negative number".into(),
            ));
        }
        if !(self.bonus_multiplier.is_finite() && self.bonus_multiplier >= 0.0) {
            return Err(ConfigError::Invalid(
                "bonus_multiplier must be a non-negative number".into(),
            ));
        }
        if self.direction_queue_capacity == 0 {
            return Err(ConfigError::Invalid(
                "direction_queue_capacity must be positive".into(),
            ));
        }

        Ok(())
    }

    #[must_use]
    pub fn growth_pulse_delay(&self) -> Duration {
        Duration::from_millis(self.growth_pulse_delay_ms)
    }

    /// Starting tick rate for `difficulty`, clamped to `max_tick_rate`.
    #[must_use]
    pub fn start_tick_rate(&self, difficulty: Difficulty) -> u32 {
        difficulty
            .tick_rate(self.base_tick_rate, self.difficulty_step)
            .min(self.max_tick_rate)
    }
}

/// Converts ticks per second into the time between two ticks.
#[must_use]
pub fn tick_interval_for_rate(tick_rate: u32) -> Duration {
    Duration::from_secs(1) / tick_rate.max(1)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::{ConfigError, Difficulty, GameConfig, tick_interval_for_rate};

    #[test]
    fn defaults_are_valid() {
        let config = GameConfig::default();

        assert!(config.validate().is_ok());
        assert_eq!(config.grid.width, 30);
        assert_eq!(config.grid.height, 20);
        assert_eq!(config.bonus_threshold, 10);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = GameConfig::from_json(
            r##"{
                "grid": { "width": 12, "height": 9 },
                "speed_step": 5,
                "themes": [
                    { "name": "mono", "background": "#000000", "snake": "#FFFFFF", "food": "#808080" }
                ]
            }"##,
        )
        .expect("config should parse");

        assert_eq!(config.grid.width, 12);
        assert_eq!(config.speed_step, 5);
        assert_eq!(config.growth_pulses, 3);
        assert_eq!(config.themes.len(), 1);
        assert_eq!(config.themes[0].name, "mono");
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(
            GameConfig::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            GameConfig::from_json(
                r##"{ "themes": [ { "name": "x", "background": "red", "snake": "#000000", "food": "#000000" } ] }"##
            ),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(matches!(
            GameConfig::from_json(r#"{ "grid": { "width": 1, "height": 10 } }"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            GameConfig::from_json(r#"{ "bonus_threshold": 0 }"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            GameConfig::from_json(r#"{ "direction_queue_capacity": 0 }"#),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn difficulty_shifts_tick_rate() {
        let config = GameConfig::default();

        assert_eq!(config.start_tick_rate(Difficulty::Easy), 10);
        assert_eq!(config.start_tick_rate(Difficulty::Medium), 20);
        assert_eq!(config.start_tick_rate(Difficulty::Hard), 30);
        assert_eq!(Difficulty::Easy.tick_rate(5, 10), 1);
        assert_eq!(Difficulty::Hard.next(), Difficulty::Hard);
        assert_eq!(Difficulty::Medium.previous(), Difficulty::Easy);
    }

    #[test]
    fn tick_interval_is_reciprocal_of_rate() {
        assert_eq!(tick_interval_for_rate(20), Duration::from_millis(50));
        assert_eq!(tick_interval_for_rate(0), Duration::from_secs(1));
    }
}

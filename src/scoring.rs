use std::time::Duration;

use log::info;

use crate::config::{GameConfig, tick_interval_for_rate};

/// Score change caused by one eaten food.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EatOutcome {
    pub points: f64,
    pub bonus: bool,
}

/// Score accumulation and the bonus speed-up.
///
/// Points are credited when food is eaten, from the number of growth pulses
/// armed for it, so the score never depends on how far the deferred growth has
/// progressed.
#[derive(Debug, Clone)]
pub struct ScoreEngine {
    score: f64,
    eat_count: u32,
    foods_eaten: u32,
    tick_rate: u32,
    points_per_segment: f64,
    bonus_threshold: u32,
    bonus_multiplier: f64,
    speed_step: u32,
    max_tick_rate: u32,
}

impl ScoreEngine {
    #[must_use]
    pub fn new(config: &GameConfig, start_tick_rate: u32) -> Self {
        Self {
            score: 0.0,
            eat_count: 0,
            foods_eaten: 0,
            tick_rate: start_tick_rate.max(1),
            points_per_segment: config.points_per_segment,
            bonus_threshold: config.bonus_threshold.max(1),
            bonus_multiplier: config.bonus_multiplier,
            speed_step: config.speed_step,
            max_tick_rate: config.max_tick_rate.max(1),
        }
    }

    /// Credits one eaten food that scheduled `pulses` growth segments.
    pub fn on_food_eaten(&mut self, pulses: u32) -> EatOutcome {
        self.foods_eaten += 1;
        self.eat_count += 1;

        let bonus = self.eat_count >= self.bonus_threshold;
        let multiplier = if bonus { self.bonus_multiplier } else { 1.0 };
        if bonus {
            self.eat_count -= self.bonus_threshold;
            self.tick_rate = self
                .tick_rate
                .saturating_add(self.speed_step)
                .min(self.max_tick_rate);
            info!(
                "bonus after {} foods, tick rate now {}",
                self.foods_eaten, self.tick_rate
            );
        }

        let points = self.points_per_segment * multiplier * f64::from(pulses);
        self.score += points;

        EatOutcome { points, bonus }
    }

    /// Raw accumulated score.
    #[must_use]
    pub fn score(&self) -> f64 {
        self.score
    }

    /// Score rounded for display and the high-score table.
    #[must_use]
    pub fn rounded_score(&self) -> u32 {
        // Non-negative and far below u32::MAX for any real session.
        self.score.round().clamp(0.0, f64::from(u32::MAX)) as u32
    }

    /// Foods eaten since the last bonus.
    #[must_use]
    pub fn eat_count(&self) -> u32 {
        self.eat_count
    }

    #[must_use]
    pub fn foods_eaten(&self) -> u32 {
        self.foods_eaten
    }

    /// Current ticks per second.
    #[must_use]
    pub fn tick_rate(&self) -> u32 {
        self.tick_rate
    }

    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        tick_interval_for_rate(self.tick_rate)
    }
}

use std::time::Duration;

use crate::grid::GridSize;
use crate::snake::Snake;

/// Deferred growth: after eating, the body gains one segment per elapsed
/// interval until the armed pulse count is spent.
#[derive(Debug, Clone, Default)]
pub struct GrowthScheduler {
    remaining: u32,
    interval: Duration,
    accumulated: Duration,
}

impl GrowthScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a fresh schedule, discarding any pulses still outstanding.
    pub fn arm(&mut self, pulses: u32, interval: Duration) {
        self.remaining = pulses;
        self.interval = interval;
        self.accumulated = Duration::ZERO;
    }

    /// Advances the schedule by `elapsed` and grows the snake once for every
    /// whole interval crossed. Returns the number of pulses applied.
    pub fn tick(&mut self, elapsed: Duration, snake: &mut Snake, bounds: GridSize) -> u32 {
        if self.remaining == 0 {
            return 0;
        }

        self.accumulated += elapsed;
        let mut applied = 0;
        while self.remaining > 0 && self.accumulated >= self.interval {
            snake.grow(bounds);
            self.remaining -= 1;
            self.accumulated -= self.interval;
            applied += 1;
        }

        if self.remaining == 0 {
            self.accumulated = Duration::ZERO;
        }

        applied
    }

    #[must_use]
    pub fn remaining(&self) -> u32 {
        self.remaining
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::grid::{GridSize, Position};
    use crate::input::Direction;
    use crate::snake::Snake;

    use super::GrowthScheduler;

    const BOUNDS: GridSize = GridSize {
        width: 30,
        height: 20,
    };
    const PULSE: Duration = Duration::from_millis(100);

    fn snake() -> Snake {
        Snake::new(Position::new(15, 10), Direction::Right, 3)
    }

    #[test]
    fn idle_scheduler_never_grows() {
        let mut scheduler = GrowthScheduler::new();
        let mut snake = snake();

        assert_eq!(scheduler.tick(Duration::from_secs(5), &mut snake, BOUNDS), 0);
        assert_eq!(snake.len(), 1);
    }

    #[test]
    fn pulses_fire_once_per_interval() {
        let mut scheduler = GrowthScheduler::new();
        let mut snake = snake();
        scheduler.arm(3, PULSE);

        assert_eq!(scheduler.tick(Duration::from_millis(50), &mut snake, BOUNDS), 0);
        assert_eq!(scheduler.tick(Duration::from_millis(50), &mut snake, BOUNDS), 1);
        assert_eq!(snake.len(), 2);
        assert_eq!(scheduler.remaining(), 2);

        assert_eq!(scheduler.tick(Duration::from_millis(100), &mut snake, BOUNDS), 1);
        assert_eq!(scheduler.tick(Duration::from_millis(100), &mut snake, BOUNDS), 1);
        assert_eq!(snake.len(), 4);
        assert_eq!(scheduler.remaining(), 0);

        assert_eq!(scheduler.tick(Duration::from_millis(100), &mut snake, BOUNDS), 0);
        assert_eq!(snake.len(), 4);
    }

    #[test]
    fn long_frame_applies_several_pulses_but_never_more_than_armed() {
        let mut scheduler = GrowthScheduler::new();
        let mut snake = snake();
        scheduler.arm(3, PULSE);

        assert_eq!(scheduler.tick(Duration::from_millis(250), &mut snake, BOUNDS), 2);
        assert_eq!(scheduler.tick(Duration::from_secs(10), &mut snake, BOUNDS), 1);
        assert_eq!(snake.len(), 4);
    }

    #[test]
    fn rearming_replaces_outstanding_pulses() {
        let mut scheduler = GrowthScheduler::new();
        let mut snake = snake();
        scheduler.arm(3, PULSE);
        scheduler.tick(PULSE, &mut snake, BOUNDS);
        scheduler.tick(Duration::from_millis(60), &mut snake, BOUNDS);

        scheduler.arm(3, PULSE);
        assert_eq!(scheduler.remaining(), 3);

        // Partial progress from the old schedule is discarded too.
        assert_eq!(scheduler.tick(Duration::from_millis(60), &mut snake, BOUNDS), 0);
        scheduler.tick(Duration::from_secs(1), &mut snake, BOUNDS);
        assert_eq!(snake.len(), 1 + 1 + 3);
    }
}

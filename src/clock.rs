use std::time::{Duration, Instant};

use crate::config::MAX_CATCH_UP_TICKS;

/// Fixed-rate tick deadline for the frame loop.
///
/// Each fired tick moves the deadline forward by the interval in effect at
/// that moment, so overshoot from late wake-ups is carried into the next
/// tick instead of being dropped. A speed change takes effect from the tick
/// right after it.
#[derive(Debug, Clone, Copy)]
pub struct TickClock {
    next_tick: Instant,
}

impl TickClock {
    /// First tick fires one `interval` after `now`.
    #[must_use]
    pub fn new(now: Instant, interval: Duration) -> Self {
        Self {
            next_tick: now + interval,
        }
    }

    pub fn restart(&mut self, now: Instant, interval: Duration) {
        self.next_tick = now + interval;
    }

    #[must_use]
    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.next_tick
    }

    /// Schedules the tick after the one that just fired.
    ///
    /// When the loop has fallen more than `MAX_CATCH_UP_TICKS` intervals
    /// behind (a suspended terminal, a slow draw) the backlog is dropped and
    /// the schedule restarts from `now`.
    pub fn advance(&mut self, now: Instant, interval: Duration) {
        self.next_tick += interval;

        if now.saturating_duration_since(self.next_tick) > interval * MAX_CATCH_UP_TICKS {
            self.next_tick = now + interval;
        }
    }

    /// Time left until the next tick; zero once it is due.
    #[must_use]
    pub fn until_next(&self, now: Instant) -> Duration {
        self.next_tick.saturating_duration_since(now)
    }

    #[must_use]
    pub fn next_tick(&self) -> Instant {
        self.next_tick
    }
}

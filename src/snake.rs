use std::collections::VecDeque;

use crate::grid::{GridSize, Position};
use crate::input::{Direction, direction_change_is_valid};

/// Mutable snake state and movement buffering behavior.
#[derive(Debug, Clone)]
pub struct Snake {
    body: VecDeque<Position>,
    direction: Direction,
    pending: VecDeque<Direction>,
    queue_capacity: usize,
}

impl Snake {
    /// Creates a one-cell snake at `start` with the provided direction.
    #[must_use]
    pub fn new(start: Position, direction: Direction, queue_capacity: usize) -> Self {
        Self::from_segments(vec![start], direction, queue_capacity)
    }

    /// Creates a snake from explicit body segments (front is head).
    #[must_use]
    pub fn from_segments(
        segments: Vec<Position>,
        direction: Direction,
        queue_capacity: usize,
    ) -> Self {
        assert!(!segments.is_empty(), "snake body needs at least one segment");

        Self {
            body: VecDeque::from(segments),
            direction,
            pending: VecDeque::new(),
            queue_capacity: queue_capacity.max(1),
        }
    }

    /// Applies one movement step, consuming at most one queued direction.
    pub fn move_forward(&mut self, bounds: GridSize) {
        debug_assert!(bounds.width > 0 && bounds.height > 0);

        if let Some(next) = self.pending.pop_front() {
            self.direction = next;
        }

        let next_head = self.head().step(self.direction, bounds);
        self.body.push_front(next_head);
        let _ = self.body.pop_back();
    }

    /// Queues a turn for a later tick.
    ///
    /// The request is checked against the most recently queued direction, or
    /// the current one when nothing is queued, so quick turn sequences can be
    /// entered ahead of the simulation. Reversals and requests arriving while
    /// the queue is full are dropped. Returns whether the turn was queued.
    pub fn change_direction(&mut self, direction: Direction) -> bool {
        if !direction_change_is_valid(self.effective_direction(), direction) {
            return false;
        }
        if self.pending.len() >= self.queue_capacity {
            return false;
        }

        self.pending.push_back(direction);
        true
    }

    /// Appends one tail segment that continues the current tail line.
    pub fn grow(&mut self, bounds: GridSize) {
        let tail = self.tail();
        let new_tail = match self.body.len() {
            1 => tail.step(self.direction.opposite(), bounds),
            len => tail.extrapolate_from(self.body[len - 2], bounds),
        };

        self.body.push_back(new_tail);
    }

    /// Returns true when any segment occupies `position`, optionally skipping the head.
    #[must_use]
    pub fn collides_with(&self, position: Position, ignore_head: bool) -> bool {
        let skip = usize::from(ignore_head);
        self.body.iter().skip(skip).any(|segment| *segment == position)
    }

    /// Returns true if any segment occupies `position`.
    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        self.collides_with(position, false)
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        self.body[0]
    }

    #[must_use]
    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Returns true when there are no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Returns the direction applied by the last move.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Last queued direction, or the current one when nothing is queued.
    #[must_use]
    pub fn effective_direction(&self) -> Direction {
        self.pending.back().copied().unwrap_or(self.direction)
    }

    /// Number of turns waiting for upcoming ticks.
    #[must_use]
    pub fn pending_turns(&self) -> usize {
        self.pending.len()
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Position> {
        self.body.iter()
    }
}

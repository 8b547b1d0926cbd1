use log::debug;
use rand::Rng;
use thiserror::Error;

use crate::grid::{GridSize, Position};
use crate::snake::Snake;

/// Food placement failures.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
pub enum SpawnError {
    #[error("no free cell left on the {width}x{height} board")]
    BoardFull { width: u16, height: u16 },
}

/// Food entity currently active on the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Food {
    pub position: Position,
}

impl Food {
    #[must_use]
    pub fn new(position: Position) -> Self {
        Self { position }
    }

    /// Spawns food in an unoccupied cell.
    pub fn spawn<R: Rng + ?Sized>(
        rng: &mut R,
        bounds: GridSize,
        snake: &Snake,
        attempts: u32,
    ) -> Result<Self, SpawnError> {
        spawn_position(rng, bounds, snake, attempts).map(Self::new)
    }
}

/// Picks a uniformly random cell that the snake does not occupy.
///
/// Samples the whole grid up to `attempts` times, then falls back to choosing
/// among the enumerated free cells so a crowded board still terminates.
pub fn spawn_position<R: Rng + ?Sized>(
    rng: &mut R,
    bounds: GridSize,
    snake: &Snake,
    attempts: u32,
) -> Result<Position, SpawnError> {
    for _ in 0..attempts {
        let position = Position {
            x: rng.gen_range(0..i32::from(bounds.width)),
            y: rng.gen_range(0..i32::from(bounds.height)),
        };
        if !snake.occupies(position) {
            return Ok(position);
        }
    }

    debug!("food sampling missed {attempts} times, scanning free cells");

    let mut candidates = Vec::with_capacity(bounds.total_cells().saturating_sub(snake.len()));
    for y in 0..i32::from(bounds.height) {
        for x in 0..i32::from(bounds.width) {
            let position = Position { x, y };
            if !snake.occupies(position) {
                candidates.push(position);
            }
        }
    }

    if candidates.is_empty() {
        return Err(SpawnError::BoardFull {
            width: bounds.width,
            height: bounds.height,
        });
    }

    let index = rng.gen_range(0..candidates.len());
    Ok(candidates[index])
}

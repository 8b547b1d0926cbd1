use serde::Deserialize;

use crate::input::Direction;

/// Logical grid dimensions of the toroidal play field.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Deserialize)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }

    /// Returns the cell in the middle of the grid, rounding down.
    #[must_use]
    pub fn center(self) -> Position {
        Position {
            x: i32::from(self.width / 2),
            y: i32::from(self.height / 2),
        }
    }

    /// Derives the largest grid that fits a terminal of `columns` x `rows`.
    ///
    /// Every cell is two columns wide. `reserved_rows` covers the border and HUD.
    #[must_use]
    pub fn fit_terminal(columns: u16, rows: u16, reserved_rows: u16) -> Self {
        Self {
            width: (columns.saturating_sub(2) / 2).max(1),
            height: rows.saturating_sub(reserved_rows).max(1),
        }
    }
}

/// Grid cell in logical coordinates.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns true when the position lies inside the bounds.
    #[must_use]
    pub fn is_within_bounds(self, bounds: GridSize) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.x < i32::from(bounds.width)
            && self.y < i32::from(bounds.height)
    }

    /// Returns this position wrapped into bounds on both axes.
    #[must_use]
    pub fn wrapped(self, bounds: GridSize) -> Self {
        Self {
            x: wrap_axis(self.x, i32::from(bounds.width)),
            y: wrap_axis(self.y, i32::from(bounds.height)),
        }
    }

    /// One step in `direction`, wrapped around the torus.
    #[must_use]
    pub fn step(self, direction: Direction, bounds: GridSize) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
        .wrapped(bounds)
    }

    /// Continues the line `previous -> self` by one more step.
    #[must_use]
    pub fn extrapolate_from(self, previous: Self, bounds: GridSize) -> Self {
        Self {
            x: 2 * self.x - previous.x,
            y: 2 * self.y - previous.y,
        }
        .wrapped(bounds)
    }

    /// Returns true when `other` is exactly one axis-aligned step away on the torus.
    #[must_use]
    pub fn is_adjacent(self, other: Self, bounds: GridSize) -> bool {
        let dx = axis_distance(self.x, other.x, i32::from(bounds.width));
        let dy = axis_distance(self.y, other.y, i32::from(bounds.height));
        dx + dy == 1
    }
}

fn wrap_axis(value: i32, upper_bound: i32) -> i32 {
    let wrapped = value % upper_bound;
    if wrapped < 0 {
        wrapped + upper_bound
    } else {
        wrapped
    }
}

fn axis_distance(a: i32, b: i32, upper_bound: i32) -> i32 {
    let forward = wrap_axis(a - b, upper_bound);
    forward.min(upper_bound - forward)
}

#[cfg(test)]
mod tests {
    use crate::input::Direction;

    use super::{GridSize, Position};

    const BOUNDS: GridSize = GridSize {
        width: 30,
        height: 20,
    };

    #[test]
    fn position_wrapping_keeps_coordinates_inside_bounds() {
        let bounds = GridSize {
            width: 10,
            height: 8,
        };

        let wrapped_left = Position { x: -1, y: 3 }.wrapped(bounds);
        let wrapped_bottom = Position { x: 4, y: 8 }.wrapped(bounds);

        assert_eq!(wrapped_left, Position { x: 9, y: 3 });
        assert_eq!(wrapped_bottom, Position { x: 4, y: 0 });
    }

    #[test]
    fn stepping_off_every_edge_and_corner_wraps() {
        let corners = [
            Position::new(0, 0),
            Position::new(29, 0),
            Position::new(0, 19),
            Position::new(29, 19),
        ];
        let directions = [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ];

        for corner in corners {
            for direction in directions {
                let next = corner.step(direction, BOUNDS);
                assert!(next.is_within_bounds(BOUNDS), "{corner:?} {direction:?}");
                assert!(corner.is_adjacent(next, BOUNDS));
            }
        }

        assert_eq!(Position::new(29, 5).step(Direction::Right, BOUNDS), Position::new(0, 5));
        assert_eq!(Position::new(3, 0).step(Direction::Up, BOUNDS), Position::new(3, 19));
    }

    #[test]
    fn extrapolation_wraps_across_the_seam() {
        // Moving left across x = 0: ..., (29, 4), (0, 4) is the tail.
        let tail = Position::new(0, 4);
        let previous = Position::new(29, 4);

        assert_eq!(tail.extrapolate_from(previous, BOUNDS), Position::new(1, 4));
    }

    #[test]
    fn center_rounds_down() {
        assert_eq!(BOUNDS.center(), Position::new(15, 10));
        assert_eq!(
            GridSize {
                width: 7,
                height: 5
            }
            .center(),
            Position::new(3, 2)
        );
    }

    #[test]
    fn terminal_fit_uses_two_columns_per_cell() {
        let grid = GridSize::fit_terminal(82, 30, 5);

        assert_eq!(grid, GridSize { width: 40, height: 25 });
        assert_eq!(GridSize::fit_terminal(0, 0, 5), GridSize { width: 1, height: 1 });
    }
}

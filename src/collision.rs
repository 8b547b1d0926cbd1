use crate::food::Food;
use crate::snake::Snake;

/// What the head ran into after a move.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default)]
pub struct Collisions {
    pub food: bool,
    pub body: bool,
}

/// Returns true when the head sits on the food cell.
#[must_use]
pub fn hits_food(snake: &Snake, food: &Food) -> bool {
    snake.head() == food.position
}

/// Returns true when the head overlaps any non-head segment.
#[must_use]
pub fn hits_self(snake: &Snake) -> bool {
    snake.collides_with(snake.head(), true)
}

/// Runs both checks for the current head position. Without food on the
/// board only the body check can fire.
#[must_use]
pub fn check(snake: &Snake, food: Option<&Food>) -> Collisions {
    Collisions {
        food: food.is_some_and(|food| hits_food(snake, food)),
        body: hits_self(snake),
    }
}

#[cfg(test)]
mod tests {
    use crate::food::Food;
    use crate::grid::Position;
    use crate::input::Direction;
    use crate::snake::Snake;

    use super::{Collisions, check, hits_food, hits_self};

    fn coiled() -> Snake {
        Snake::from_segments(
            vec![
                Position::new(2, 2),
                Position::new(1, 2),
                Position::new(1, 3),
                Position::new(2, 3),
                Position::new(2, 2),
            ],
            Direction::Up,
            3,
        )
    }

    #[test]
    fn head_on_food_is_detected() {
        let snake = Snake::new(Position::new(4, 4), Direction::Right, 3);

        assert!(hits_food(&snake, &Food::new(Position::new(4, 4))));
        assert!(!hits_food(&snake, &Food::new(Position::new(5, 4))));
    }

    #[test]
    fn lone_head_never_collides_with_itself() {
        let snake = Snake::new(Position::new(4, 4), Direction::Right, 3);

        assert!(!hits_self(&snake));
    }

    #[test]
    fn head_on_tail_segment_is_self_collision() {
        assert!(hits_self(&coiled()));
    }

    #[test]
    fn both_checks_report_together() {
        let collisions = check(&coiled(), Some(&Food::new(Position::new(2, 2))));

        assert_eq!(
            collisions,
            Collisions {
                food: true,
                body: true
            }
        );
    }

    #[test]
    fn missing_food_only_reports_the_body() {
        let snake = Snake::new(Position::new(4, 4), Direction::Right, 3);

        assert_eq!(check(&snake, None), Collisions::default());
        assert_eq!(
            check(&coiled(), None),
            Collisions {
                food: false,
                body: true
            }
        );
    }
}

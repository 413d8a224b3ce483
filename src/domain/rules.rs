/// Turn arbitration: which key presses may become the queued heading.
///
/// A press is judged against the heading the snake is moving in *now*,
/// never against the queued one. So any burst of presses between two ticks
/// can at most turn 90°; a same-tick 180° reversal is impossible.

use super::grid::Direction;
use super::snake::Snake;

/// The heading to queue for `requested`, or `None` if it would reverse.
pub fn arbitrate(current: Direction, requested: Direction) -> Option<Direction> {
    if requested == current.opposite() {
        None
    } else {
        Some(requested)
    }
}

/// Feed one directional press to the snake. Returns whether it was queued.
/// The latest accepted press before the next tick wins.
pub fn queue_turn(snake: &mut Snake, requested: Direction) -> bool {
    match arbitrate(snake.direction(), requested) {
        Some(dir) => {
            snake.queue_direction(dir);
            true
        }
        None => false,
    }
}

// ══════════════════════════════════════════════════════════════
// Unit tests
// ══════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::grid::{Grid, Position};

    fn snake_heading_right() -> Snake {
        Snake::new(&Grid::new(20, 32, 24))
    }

    #[test]
    fn reversal_is_rejected() {
        for d in Direction::ALL {
            assert_eq!(arbitrate(d, d.opposite()), None);
            assert_eq!(arbitrate(d, d), Some(d));
        }
    }

    #[test]
    fn left_ignored_while_heading_right() {
        let mut s = snake_heading_right();
        assert!(!queue_turn(&mut s, Direction::Left));
        assert_eq!(s.pending_direction(), None);
    }

    #[test]
    fn up_and_down_accepted_while_heading_right() {
        let mut s = snake_heading_right();
        assert!(queue_turn(&mut s, Direction::Up));
        assert_eq!(s.pending_direction(), Some(Direction::Up));
        assert!(queue_turn(&mut s, Direction::Down));
        assert_eq!(s.pending_direction(), Some(Direction::Down));
    }

    #[test]
    fn rejected_press_keeps_earlier_queue() {
        let mut s = snake_heading_right();
        queue_turn(&mut s, Direction::Up);
        queue_turn(&mut s, Direction::Left);
        assert_eq!(s.pending_direction(), Some(Direction::Up));
    }

    #[test]
    fn burst_cannot_chain_into_reversal() {
        // Up then Left while heading Right: Left is judged against Right,
        // so it is dropped and the snake only turns Up.
        let g = Grid::new(20, 32, 24);
        let mut s = Snake::from_body(
            &g,
            &[Position::new(100, 100), Position::new(80, 100), Position::new(60, 100)],
            Direction::Right,
        );
        queue_turn(&mut s, Direction::Up);
        queue_turn(&mut s, Direction::Left);
        s.update_direction();
        assert_eq!(s.direction(), Direction::Up);
    }
}

/// The snake: an ordered run of occupied cells, head first.
///
/// State machine per tick:
///   1. `update_direction()` consumes the queued turn (if any)
///   2. `advance()` moves one cell, grows, or resets on self-collision
///
/// `mark_food_eaten()` arms a one-shot growth flag consumed by the next
/// `advance()`.

use std::collections::{HashSet, VecDeque};

use super::grid::{Direction, Grid, Position};

pub const START_DIRECTION: Direction = Direction::Right;

/// Result of one `advance()`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Advance {
    /// Moved without growing; `vacated` is the tail cell that was dropped.
    Moved { vacated: Position },
    /// Moved and kept the tail (length +1).
    Grew,
    /// The new head hit the body; the snake is back at its start state.
    Reset,
}

#[derive(Clone, Debug)]
pub struct Snake {
    body: VecDeque<Position>,
    current: Direction,
    pending: Option<Direction>,
    growth_pending: bool,
    start: Position,
}

impl Snake {
    /// Length 1 at the grid centre, heading Right.
    pub fn new(grid: &Grid) -> Self {
        let start = grid.center();
        let mut body = VecDeque::with_capacity(64);
        body.push_back(start);
        Snake {
            body,
            current: START_DIRECTION,
            pending: None,
            growth_pending: false,
            start,
        }
    }

    /// Build a snake from an explicit body (head first). Test fixture only.
    #[cfg(test)]
    pub fn from_body(grid: &Grid, body: &[Position], current: Direction) -> Self {
        assert!(!body.is_empty());
        Snake {
            body: body.iter().copied().collect(),
            current,
            pending: None,
            growth_pending: false,
            start: grid.center(),
        }
    }

    // ── Queries ──

    pub fn head(&self) -> Position {
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn body(&self) -> impl Iterator<Item = Position> + '_ {
        self.body.iter().copied()
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Set of occupied cells, for food placement.
    pub fn occupied(&self) -> HashSet<Position> {
        self.body.iter().copied().collect()
    }

    pub fn direction(&self) -> Direction {
        self.current
    }

    #[cfg(test)]
    pub fn pending_direction(&self) -> Option<Direction> {
        self.pending
    }

    #[cfg(test)]
    pub fn growth_pending(&self) -> bool {
        self.growth_pending
    }

    // ── Mutation ──

    /// Queue a heading for the next tick, replacing any unconsumed one.
    /// Reversal filtering happens in `rules::queue_turn`.
    pub fn queue_direction(&mut self, dir: Direction) {
        self.pending = Some(dir);
    }

    /// Apply the queued heading. Runs once per tick, before `advance()`.
    pub fn update_direction(&mut self) {
        if let Some(dir) = self.pending.take() {
            self.current = dir;
        }
    }

    pub fn mark_food_eaten(&mut self) {
        self.growth_pending = true;
    }

    pub fn reset(&mut self) {
        self.body.clear();
        self.body.push_back(self.start);
        self.current = START_DIRECTION;
        self.pending = None;
        self.growth_pending = false;
    }

    /// Move one cell in the current direction.
    ///
    /// The collision check runs against the whole body before anything is
    /// mutated, tail cell included; on collision nothing is inserted.
    pub fn advance(&mut self, grid: &Grid) -> Advance {
        let new_head = grid.step(self.head(), self.current);

        if self.body.contains(&new_head) {
            self.reset();
            return Advance::Reset;
        }

        self.body.push_front(new_head);

        if self.growth_pending {
            self.growth_pending = false;
            return Advance::Grew;
        }

        match self.body.pop_back() {
            Some(vacated) => Advance::Moved { vacated },
            // Unreachable: the body had at least the new head.
            None => Advance::Grew,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board() -> Grid {
        Grid::new(20, 32, 24)
    }

    fn p(x: i32, y: i32) -> Position {
        Position::new(x, y)
    }

    fn assert_distinct(s: &Snake) {
        let cells: Vec<_> = s.body().collect();
        let set = s.occupied();
        assert_eq!(cells.len(), set.len(), "duplicate cell in {cells:?}");
    }

    #[test]
    fn starts_centered_heading_right() {
        let g = board();
        let s = Snake::new(&g);
        assert_eq!(s.len(), 1);
        assert_eq!(s.head(), p(320, 240));
        assert_eq!(s.direction(), Direction::Right);
        assert_eq!(s.pending_direction(), None);
        assert!(!s.growth_pending());
    }

    #[test]
    fn plain_move_drops_tail() {
        let g = board();
        let mut s = Snake::from_body(&g, &[p(300, 220)], Direction::Right);
        let out = s.advance(&g);
        assert_eq!(out, Advance::Moved { vacated: p(300, 220) });
        assert_eq!(s.head(), p(320, 220));
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn head_wraps_at_right_edge() {
        let g = board();
        let mut s = Snake::from_body(&g, &[p(620, 220)], Direction::Right);
        s.advance(&g);
        assert_eq!(s.head(), p(0, 220));
    }

    #[test]
    fn growth_keeps_tail() {
        let g = board();
        let mut s = Snake::from_body(&g, &[p(100, 100), p(80, 100), p(60, 100)], Direction::Right);
        s.mark_food_eaten();
        assert_eq!(s.advance(&g), Advance::Grew);
        assert_eq!(s.len(), 4);
        assert_eq!(s.body().last(), Some(p(60, 100)));
        assert!(!s.growth_pending());

        // Flag is one-shot: the following move is a plain move
        assert_eq!(s.advance(&g), Advance::Moved { vacated: p(60, 100) });
        assert_eq!(s.len(), 4);
    }

    #[test]
    fn mark_food_eaten_is_idempotent() {
        let g = board();
        let mut s = Snake::from_body(&g, &[p(100, 100), p(80, 100)], Direction::Right);
        s.mark_food_eaten();
        s.mark_food_eaten();
        s.advance(&g);
        assert_eq!(s.len(), 3);
        s.advance(&g);
        assert_eq!(s.len(), 3);
    }

    #[test]
    fn hitting_body_resets() {
        let g = board();
        // Head at (100,100) heading Down into (100,120), which is body.
        let body = [p(100, 100), p(120, 100), p(120, 120), p(100, 120), p(80, 120)];
        let mut s = Snake::from_body(&g, &body, Direction::Down);
        assert_eq!(s.advance(&g), Advance::Reset);
        assert_eq!(s.len(), 1);
        assert_eq!(s.head(), g.center());
        assert_eq!(s.direction(), Direction::Right);
    }

    #[test]
    fn moving_onto_current_tail_counts_as_collision() {
        let g = board();
        // 2x2 loop: the tail cell is the next head cell.
        let body = [p(100, 100), p(100, 120), p(120, 120), p(120, 100)];
        let mut s = Snake::from_body(&g, &body, Direction::Right);
        assert_eq!(s.advance(&g), Advance::Reset);
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn reset_clears_flags_and_queue() {
        let g = board();
        let mut s = Snake::from_body(&g, &[p(0, 0), p(20, 0)], Direction::Left);
        s.queue_direction(Direction::Up);
        s.mark_food_eaten();
        s.reset();
        assert_eq!(s.len(), 1);
        assert_eq!(s.head(), g.center());
        assert_eq!(s.direction(), Direction::Right);
        assert_eq!(s.pending_direction(), None);
        assert!(!s.growth_pending());

        let first = s.clone();
        s.reset();
        assert_eq!(s.head(), first.head());
        assert_eq!(s.len(), first.len());
    }

    #[test]
    fn update_direction_consumes_once() {
        let g = board();
        let mut s = Snake::new(&g);
        s.queue_direction(Direction::Up);
        s.update_direction();
        assert_eq!(s.direction(), Direction::Up);
        assert_eq!(s.pending_direction(), None);
        s.update_direction();
        assert_eq!(s.direction(), Direction::Up);
    }

    #[test]
    fn single_cell_never_self_collides() {
        let g = Grid::new(20, 3, 2);
        let mut s = Snake::new(&g);
        let turns = [
            Direction::Up, Direction::Left, Direction::Down, Direction::Right,
            Direction::Down, Direction::Left, Direction::Up, Direction::Right,
        ];
        for i in 0..200 {
            let want = turns[i % turns.len()];
            if want != s.direction().opposite() {
                s.queue_direction(want);
            }
            s.update_direction();
            assert_ne!(s.advance(&g), Advance::Reset);
            assert_eq!(s.len(), 1);
        }
    }

    #[test]
    fn body_stays_distinct_while_growing() {
        let g = board();
        let mut s = Snake::new(&g);
        let route = [Direction::Right, Direction::Down, Direction::Left, Direction::Down];
        for (i, dir) in route.iter().cycle().take(40).enumerate() {
            if i % 3 == 0 {
                s.mark_food_eaten();
            }
            s.queue_direction(*dir);
            s.update_direction();
            let before = s.len();
            let out = s.advance(&g);
            match out {
                Advance::Reset => assert_eq!(s.len(), 1),
                Advance::Grew => assert_eq!(s.len(), before + 1),
                Advance::Moved { .. } => assert_eq!(s.len(), before),
            }
            assert_distinct(&s);
        }
    }
}

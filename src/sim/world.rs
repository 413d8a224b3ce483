/// WorldState: everything the rules mutate during a tick.
///
/// Snake and food are owned side by side; neither knows about the other.
/// All interaction between them goes through `step`.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::domain::food::Food;
use crate::domain::grid::Grid;
use crate::domain::snake::Snake;
use super::port::Status;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Phase {
    Running,
    /// Terminal: set by Quit/Escape, checked at the top of every loop pass.
    Quit,
}

pub struct WorldState {
    pub grid: Grid,
    pub snake: Snake,
    pub food: Food,
    pub rng: StdRng,
    pub phase: Phase,
    pub tick: u64,
    pub best_length: usize,
    pub resets: u32,
}

impl WorldState {
    /// Fresh game. `seed` fixes food placement; `None` seeds from entropy.
    pub fn new(grid: Grid, seed: Option<u64>) -> Self {
        let mut rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        let snake = Snake::new(&grid);
        let food = Food::new(&grid, &snake.occupied(), &mut rng);
        WorldState {
            grid,
            snake,
            food,
            rng,
            phase: Phase::Running,
            tick: 0,
            best_length: 1,
            resets: 0,
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    /// Move the food to a cell the snake does not occupy.
    pub fn relocate_food(&mut self) {
        let occupied = self.snake.occupied();
        self.food.relocate(&self.grid, &occupied, &mut self.rng);
    }

    pub fn status(&self) -> Status {
        Status {
            length: self.snake.len(),
            best_length: self.best_length,
            resets: self.resets,
            tick: self.tick,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_world_keeps_food_off_snake() {
        for seed in 0..50 {
            let w = WorldState::new(Grid::new(20, 2, 2), Some(seed));
            assert_ne!(w.food.position(), w.snake.head());
            assert!(w.is_running());
        }
    }

    #[test]
    fn status_reflects_world() {
        let w = WorldState::new(Grid::new(20, 32, 24), Some(1));
        let st = w.status();
        assert_eq!(st.length, 1);
        assert_eq!(st.best_length, 1);
        assert_eq!(st.resets, 0);
        assert_eq!(st.tick, 0);
    }
}

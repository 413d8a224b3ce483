/// Events emitted during a simulation step.
/// The presentation layer consumes these for sound.

use crate::domain::grid::Position;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameEvent {
    FoodEaten { at: Position },
    SnakeGrew { length: usize },
    /// Self-collision; `length` is how long the snake was when it hit itself.
    SnakeReset { length: usize },
    Restarted,
    QuitRequested,
}

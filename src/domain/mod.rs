/// Game rules with no I/O: board geometry, the snake, food and turn rules.

pub mod draw;
pub mod food;
pub mod grid;
pub mod rules;
pub mod snake;

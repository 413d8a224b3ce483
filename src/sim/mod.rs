/// Tick-level simulation: world state, the step function and the loop that
/// drives it against injected input, render and clock collaborators.

pub mod event;
pub mod game_loop;
pub mod port;
pub mod step;
pub mod world;

/// The step function: advances the world by one tick.
///
/// Processing order:
///   1. Input: turns go through the arbiter, Restart resets in place,
///      Quit/Escape end the game and skip the rest of the tick
///   2. Heading update (consumes the queued turn)
///   3. Movement (move / grow / self-collision reset)
///   4. Food check (arm growth, relocate food)
///
/// The returned `StepReport` tells the presentation side what changed on
/// the board: either everything, or at most one vacated tail cell.

use log::{debug, info};

use crate::domain::grid::Position;
use crate::domain::rules;
use crate::domain::snake::Advance;
use super::event::GameEvent;
use super::port::InputEvent;
use super::world::{Phase, WorldState};

/// How much of the board must be repainted after a tick.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Redraw {
    /// Clear the whole board first.
    Full,
    /// Only the vacated tail cell (if any) needs clearing.
    Partial { vacated: Option<Position> },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StepReport {
    pub events: Vec<GameEvent>,
    pub redraw: Redraw,
}

impl StepReport {
    fn idle() -> Self {
        StepReport { events: vec![], redraw: Redraw::Partial { vacated: None } }
    }
}

// ══════════════════════════════════════════════════════════════
// Main entry point
// ══════════════════════════════════════════════════════════════

pub fn step(world: &mut WorldState, inputs: &[InputEvent]) -> StepReport {
    if !world.is_running() { return StepReport::idle(); }

    let mut events: Vec<GameEvent> = Vec::new();
    let mut full_redraw = false;

    if resolve_input(world, inputs, &mut events, &mut full_redraw) {
        return StepReport { events, redraw: Redraw::Partial { vacated: None } };
    }

    world.tick += 1;
    world.snake.update_direction();
    let vacated = resolve_movement(world, &mut events, &mut full_redraw);
    resolve_food(world, &mut events);

    let redraw = if full_redraw { Redraw::Full } else { Redraw::Partial { vacated } };
    StepReport { events, redraw }
}

/// Returns true when a terminal event was seen.
fn resolve_input(
    world: &mut WorldState,
    inputs: &[InputEvent],
    events: &mut Vec<GameEvent>,
    full_redraw: &mut bool,
) -> bool {
    for &input in inputs {
        match input {
            InputEvent::Turn(dir) => {
                if !rules::queue_turn(&mut world.snake, dir) {
                    debug!("ignored reversal {:?} while heading {:?}", dir, world.snake.direction());
                }
            }
            InputEvent::Restart => {
                restart(world);
                events.push(GameEvent::Restarted);
                *full_redraw = true;
            }
            InputEvent::Quit | InputEvent::Escape => {
                info!("quit requested at tick {}", world.tick);
                world.phase = Phase::Quit;
                events.push(GameEvent::QuitRequested);
                return true;
            }
        }
    }
    false
}

/// External restart request: same start state as a self-collision reset.
pub fn restart(world: &mut WorldState) {
    debug!("restart at length {}", world.snake.len());
    world.snake.reset();
    world.relocate_food();
}

// ══════════════════════════════════════════════════════════════
// Movement
// ══════════════════════════════════════════════════════════════

fn resolve_movement(
    world: &mut WorldState,
    events: &mut Vec<GameEvent>,
    full_redraw: &mut bool,
) -> Option<Position> {
    let length_before = world.snake.len();

    match world.snake.advance(&world.grid) {
        Advance::Moved { vacated } => Some(vacated),
        Advance::Grew => {
            let length = world.snake.len();
            world.best_length = world.best_length.max(length);
            debug!("snake grew to {length}");
            events.push(GameEvent::SnakeGrew { length });
            None
        }
        Advance::Reset => {
            world.resets += 1;
            info!("self-collision at length {length_before}; reset #{}", world.resets);
            world.relocate_food();
            events.push(GameEvent::SnakeReset { length: length_before });
            *full_redraw = true;
            None
        }
    }
}

// ══════════════════════════════════════════════════════════════
// Food
// ══════════════════════════════════════════════════════════════

fn resolve_food(world: &mut WorldState, events: &mut Vec<GameEvent>) {
    let at = world.food.position();
    if world.snake.head() != at { return; }

    world.snake.mark_food_eaten();
    world.relocate_food();
    debug!("food eaten at ({}, {})", at.x, at.y);
    events.push(GameEvent::FoodEaten { at });
}

// ══════════════════════════════════════════════════════════════
// Unit tests
// ══════════════════════════════════════════════════════════════

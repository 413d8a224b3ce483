/// Collaborators the game loop is handed at construction: where input comes
/// from, where frames go, and what paces the ticks.

use crate::domain::draw::CellCanvas;
use crate::domain::grid::Direction;
use crate::error::GameError;

/// One discrete input, already decoded from keyboard or gamepad.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum InputEvent {
    Turn(Direction),
    Restart,
    Escape,
    Quit,
}

pub trait InputSource {
    /// Everything that arrived since the last call. Must not block.
    fn poll_events(&mut self) -> Result<Vec<InputEvent>, GameError>;
}

/// HUD payload shown alongside the board.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Status {
    pub length: usize,
    pub best_length: usize,
    pub resets: u32,
    pub tick: u64,
}

pub trait RenderSink: CellCanvas {
    /// Show the board as painted so far plus the HUD.
    fn present(&mut self, status: &Status) -> Result<(), GameError>;
}

pub trait Clock {
    /// Block until the next tick boundary.
    fn tick(&mut self);
}

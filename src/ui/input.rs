/// Terminal input source.
///
/// Drains every pending crossterm event without blocking, decodes key
/// presses into `InputEvent`s, then appends whatever the gamepad produced.
///
/// Only Press (and auto-repeat) events count. Release events are ignored so
/// terminals with keyboard enhancement don't double-fire.

use std::time::Duration;

use crossterm::event::{self, poll, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::domain::grid::Direction;
use crate::error::GameError;
use crate::sim::port::{InputEvent, InputSource};
use super::gamepad::GamepadState;

// ── Key Constants ──

const KEYS_LEFT: &[KeyCode] = &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')];
const KEYS_RIGHT: &[KeyCode] = &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')];
const KEYS_UP: &[KeyCode] = &[KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')];
const KEYS_DOWN: &[KeyCode] = &[KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')];
const KEYS_RESTART: &[KeyCode] = &[KeyCode::Char('r'), KeyCode::Char('R')];
const KEYS_QUIT: &[KeyCode] = &[KeyCode::Char('q'), KeyCode::Char('Q')];

/// Decode one key event. `None` for keys the game does not use.
pub fn map_key(key: KeyEvent) -> Option<InputEvent> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL)
        && (key.code == KeyCode::Char('c') || key.code == KeyCode::Char('C'))
    {
        return Some(InputEvent::Quit);
    }

    let code = &key.code;
    if *code == KeyCode::Esc {
        Some(InputEvent::Escape)
    } else if KEYS_QUIT.contains(code) {
        Some(InputEvent::Quit)
    } else if KEYS_RESTART.contains(code) {
        Some(InputEvent::Restart)
    } else if KEYS_UP.contains(code) {
        Some(InputEvent::Turn(Direction::Up))
    } else if KEYS_DOWN.contains(code) {
        Some(InputEvent::Turn(Direction::Down))
    } else if KEYS_LEFT.contains(code) {
        Some(InputEvent::Turn(Direction::Left))
    } else if KEYS_RIGHT.contains(code) {
        Some(InputEvent::Turn(Direction::Right))
    } else {
        None
    }
}

pub struct TerminalInput {
    gamepad: GamepadState,
}

impl TerminalInput {
    pub fn new(gamepad: GamepadState) -> Self {
        TerminalInput { gamepad }
    }
}

impl InputSource for TerminalInput {
    fn poll_events(&mut self) -> Result<Vec<InputEvent>, GameError> {
        let mut out = Vec::with_capacity(4);

        // Read all available events without blocking
        while poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                if let Some(ev) = map_key(key) {
                    out.push(ev);
                }
            }
        }

        out.extend(self.gamepad.take_events());
        Ok(out)
    }
}

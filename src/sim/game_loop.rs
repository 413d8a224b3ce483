/// GameLoop: one update-then-render pass per tick.
///
/// Per tick:
///   1. drain input
///   2-4. `step::step` (turn, move, reset, food)
///   5. repaint: whole board after a reset/restart (and on the first frame),
///      otherwise only the vacated tail cell, then food and snake on top
///   6. wait for the clock
///
/// The loop owns the world and borrows its collaborators; it never reaches
/// for a global terminal or timer.

use log::info;

use crate::domain::draw::{Drawable, Palette};
use crate::error::GameError;
use super::event::GameEvent;
use super::port::{Clock, InputSource, RenderSink};
use super::step::{self, Redraw, StepReport};
use super::world::WorldState;

pub struct GameLoop<'a> {
    world: WorldState,
    input: &'a mut dyn InputSource,
    sink: &'a mut dyn RenderSink,
    clock: &'a mut dyn Clock,
    palette: Palette,
    first_frame: bool,
}

impl<'a> GameLoop<'a> {
    pub fn new(
        world: WorldState,
        input: &'a mut dyn InputSource,
        sink: &'a mut dyn RenderSink,
        clock: &'a mut dyn Clock,
        palette: Palette,
    ) -> Self {
        GameLoop { world, input, sink, clock, palette, first_frame: true }
    }

    #[cfg(test)]
    pub fn world(&self) -> &WorldState {
        &self.world
    }

    pub fn into_world(self) -> WorldState {
        self.world
    }

    /// Run until Quit/Escape. `on_events` sees each tick's events.
    pub fn run(&mut self, mut on_events: impl FnMut(&[GameEvent])) -> Result<(), GameError> {
        info!(
            "game start: {}x{} cells of {}",
            self.world.grid.width_cells(),
            self.world.grid.height_cells(),
            self.world.grid.cell_size(),
        );

        while self.world.is_running() {
            let report = self.tick()?;
            on_events(&report.events);
            if self.world.is_running() {
                self.clock.tick();
            }
        }

        info!("game over after {} ticks, best length {}", self.world.tick, self.world.best_length);
        Ok(())
    }

    /// One tick without the clock wait.
    pub fn tick(&mut self) -> Result<StepReport, GameError> {
        let inputs = self.input.poll_events()?;
        let report = step::step(&mut self.world, &inputs);

        if self.world.is_running() {
            self.render(report.redraw)?;
        }
        Ok(report)
    }

    fn render(&mut self, redraw: Redraw) -> Result<(), GameError> {
        let bg = self.palette.background;
        let full = std::mem::replace(&mut self.first_frame, false) || redraw == Redraw::Full;

        if full {
            self.sink.clear_board(bg);
        } else if let Redraw::Partial { vacated: Some(cell) } = redraw {
            self.sink.clear_cell(cell, bg);
        }

        self.world.food.draw(&mut *self.sink, &self.palette);
        self.world.snake.draw(&mut *self.sink, &self.palette);
        self.sink.present(&self.world.status())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    use crate::domain::draw::{CellCanvas, Rgb};
    use crate::domain::food::Food;
    use crate::domain::grid::{Direction, Grid, Position};
    use crate::sim::port::{InputEvent, Status};
    use crate::sim::world::Phase;

    /// Hands out one scripted batch per poll, then nothing.
    struct Script(VecDeque<Vec<InputEvent>>);

    impl InputSource for Script {
        fn poll_events(&mut self) -> Result<Vec<InputEvent>, GameError> {
            Ok(self.0.pop_front().unwrap_or_default())
        }
    }

    #[derive(Debug, PartialEq, Eq)]
    enum Op {
        ClearBoard,
        ClearCell(Position),
        Fill(Position, Rgb),
        Present(Status),
    }

    #[derive(Default)]
    struct Recorder(Vec<Op>);

    impl CellCanvas for Recorder {
        fn fill_cell(&mut self, at: Position, fill: Rgb, _border: Rgb) {
            self.0.push(Op::Fill(at, fill));
        }
        fn clear_cell(&mut self, at: Position, _background: Rgb) {
            self.0.push(Op::ClearCell(at));
        }
        fn clear_board(&mut self, _background: Rgb) {
            self.0.push(Op::ClearBoard);
        }
    }

    impl RenderSink for Recorder {
        fn present(&mut self, status: &Status) -> Result<(), GameError> {
            self.0.push(Op::Present(*status));
            Ok(())
        }
    }

    #[derive(Default)]
    struct CountingClock(u32);

    impl Clock for CountingClock {
        fn tick(&mut self) {
            self.0 += 1;
        }
    }

    /// Food parked in a corner the snake will not reach in these tests.
    fn world() -> WorldState {
        let mut w = WorldState::new(Grid::new(20, 32, 24), Some(17));
        w.food = Food::at(Position::new(0, 0));
        w
    }

    #[test]
    fn first_frame_clears_whole_board() {
        let mut input = Script(VecDeque::new());
        let mut sink = Recorder::default();
        let mut clock = CountingClock::default();
        let mut game = GameLoop::new(world(), &mut input, &mut sink, &mut clock, Palette::default());
        game.tick().unwrap();
        game.tick().unwrap();
        drop(game);

        assert_eq!(sink.0[0], Op::ClearBoard);
        let clears = sink.0.iter().filter(|op| **op == Op::ClearBoard).count();
        assert_eq!(clears, 1);
        // Second frame only clears the cell the snake left.
        assert!(sink.0.contains(&Op::ClearCell(Position::new(340, 240))));
    }

    #[test]
    fn frame_draws_food_then_snake_then_presents() {
        let mut input = Script(VecDeque::new());
        let mut sink = Recorder::default();
        let mut clock = CountingClock::default();
        let palette = Palette::default();
        let mut game = GameLoop::new(world(), &mut input, &mut sink, &mut clock, palette);
        game.tick().unwrap();
        let food = game.world().food.position();
        let head = game.world().snake.head();
        let status = game.world().status();
        drop(game);

        assert_eq!(
            sink.0,
            vec![
                Op::ClearBoard,
                Op::Fill(food, palette.food),
                Op::Fill(head, palette.snake),
                Op::Present(status),
            ]
        );
    }

    #[test]
    fn run_stops_on_escape_without_waiting() {
        let batches = VecDeque::from(vec![
            vec![InputEvent::Turn(Direction::Up)],
            vec![],
            vec![InputEvent::Escape],
        ]);
        let mut input = Script(batches);
        let mut sink = Recorder::default();
        let mut clock = CountingClock::default();
        let mut seen = Vec::new();
        let mut game = GameLoop::new(world(), &mut input, &mut sink, &mut clock, Palette::default());
        game.run(|events| seen.extend_from_slice(events)).unwrap();
        let w = game.into_world();

        assert_eq!(w.phase, Phase::Quit);
        assert_eq!(w.tick, 2);
        assert_eq!(clock.0, 2);
        assert_eq!(seen.last(), Some(&GameEvent::QuitRequested));
        let presents = sink.0.iter().filter(|op| matches!(op, Op::Present(_))).count();
        assert_eq!(presents, 2);
    }

    #[test]
    fn restart_forces_full_redraw() {
        let batches = VecDeque::from(vec![vec![], vec![InputEvent::Restart]]);
        let mut input = Script(batches);
        let mut sink = Recorder::default();
        let mut clock = CountingClock::default();
        let mut game = GameLoop::new(world(), &mut input, &mut sink, &mut clock, Palette::default());
        game.tick().unwrap();
        let report = game.tick().unwrap();
        drop(game);

        assert_eq!(report.redraw, Redraw::Full);
        let clears = sink.0.iter().filter(|op| **op == Op::ClearBoard).count();
        assert_eq!(clears, 2);
    }
}

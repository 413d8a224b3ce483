/// Drawing capability for board entities.
///
/// Entities do not share a base type. Anything that can report where it is
/// and paint itself onto a `CellCanvas` is `Drawable`.

use super::food::Food;
use super::grid::Position;
use super::snake::Snake;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Rgb { r, g, b }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Palette {
    pub background: Rgb,
    pub border: Rgb,
    pub food: Rgb,
    pub snake: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Palette {
            background: Rgb::new(0, 0, 0),
            border: Rgb::new(93, 216, 228),
            food: Rgb::new(255, 0, 0),
            snake: Rgb::new(0, 255, 0),
        }
    }
}

/// Cell-level drawing surface. The board keeps what was painted until a
/// cell is cleared or the whole board is.
pub trait CellCanvas {
    /// Fill one cell with `fill`, outlined 1 unit wide in `border`.
    fn fill_cell(&mut self, at: Position, fill: Rgb, border: Rgb);
    /// Paint one cell back to `background`.
    fn clear_cell(&mut self, at: Position, background: Rgb);
    fn clear_board(&mut self, background: Rgb);
}

pub trait Drawable {
    fn position(&self) -> Position;
    fn draw<C: CellCanvas + ?Sized>(&self, canvas: &mut C, palette: &Palette);
}

impl Drawable for Food {
    fn position(&self) -> Position {
        Food::position(self)
    }

    fn draw<C: CellCanvas + ?Sized>(&self, canvas: &mut C, palette: &Palette) {
        canvas.fill_cell(Food::position(self), palette.food, palette.border);
    }
}

impl Drawable for Snake {
    /// The head.
    fn position(&self) -> Position {
        self.head()
    }

    fn draw<C: CellCanvas + ?Sized>(&self, canvas: &mut C, palette: &Palette) {
        for cell in self.body() {
            canvas.fill_cell(cell, palette.snake, palette.border);
        }
    }
}

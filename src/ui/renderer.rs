/// Presentation layer: double-buffered, diff-based terminal renderer.
///
/// Two levels of state:
///   - `board`: what has been painted on each grid cell. It persists between
///     frames like a drawing surface; the game loop only clears what changed.
///   - `front`/`back`: terminal-cell buffers. Each `present()` composes the
///     board plus HUD into `front`, emits only the cells that differ from
///     `back`, then swaps them.
///
/// Each grid cell maps to `CELL_W` terminal columns. A filled cell is drawn
/// with thin edge glyphs in the border colour over the fill colour.

use std::io::{self, BufWriter, Write};

use crossterm::{
    cursor::{self, MoveTo},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};

use crate::domain::draw::{CellCanvas, Rgb};
use crate::domain::grid::{Grid, Position};
use crate::error::GameError;
use crate::sim::port::{RenderSink, Status};

// ── Cell: the unit of the back-buffer ──

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
struct Cell {
    ch: char,
    fg: Color,
    bg: Color,
}

impl Cell {
    /// Explicit background for terminal cells outside the board. Using the
    /// same RGB for `Clear` and every cell keeps VTE row gaps invisible.
    const BASE_BG: Color = Color::Rgb { r: 22, g: 22, b: 35 };

    const BLANK: Cell = Cell { ch: ' ', fg: Color::White, bg: Cell::BASE_BG };

    /// Sentinel used to invalidate the back buffer.
    /// Different from any real cell, so every position will be diff'd.
    const INVALID: Cell = Cell { ch: '?', fg: Color::Magenta, bg: Color::Magenta };

    fn new(ch: char, fg: Color, bg: Color) -> Self {
        Cell { ch, fg, bg }
    }
}

// ── FrameBuffer: a 2D grid of Cells ──

struct FrameBuffer {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    fn new(w: usize, h: usize) -> Self {
        FrameBuffer { width: w, height: h, cells: vec![Cell::BLANK; w * h] }
    }

    fn resize(&mut self, w: usize, h: usize) {
        if self.width != w || self.height != h {
            self.width = w;
            self.height = h;
            self.cells = vec![Cell::BLANK; w * h];
        }
    }

    fn clear(&mut self) {
        self.cells.fill(Cell::BLANK);
    }

    fn set(&mut self, x: usize, y: usize, cell: Cell) {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = cell;
        }
    }

    fn get(&self, x: usize, y: usize) -> Cell {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x]
        } else {
            Cell::BLANK
        }
    }

    /// Write a string at (x, y) with given colors. Each char occupies 1 column.
    fn put_str(&mut self, x: usize, y: usize, s: &str, fg: Color, bg: Color) {
        for (i, ch) in s.chars().enumerate() {
            if x + i >= self.width { break; }
            self.set(x + i, y, Cell::new(ch, fg, bg));
        }
    }

    fn fill_row(&mut self, y: usize, bg: Color) {
        for x in 0..self.width {
            self.set(x, y, Cell::new(' ', Color::White, bg));
        }
    }
}

// ── Board: painted state per grid cell ──

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Paint {
    Empty(Rgb),
    Filled { fill: Rgb, border: Rgb },
}

// ── Renderer ──

/// Terminal columns per grid cell (terminal cells are ~2:1 tall).
const CELL_W: usize = 2;

/// Vertical offsets
const HUD_ROW: usize = 0;
const BOARD_ROW: usize = 2;

const HUD_BG: Color = Color::Rgb { r: 20, g: 20, b: 60 };

fn to_color(c: Rgb) -> Color {
    Color::Rgb { r: c.r, g: c.g, b: c.b }
}

pub struct TerminalRenderer<W: Write = io::Stdout> {
    writer: BufWriter<W>,
    front: FrameBuffer,
    back: FrameBuffer,
    term_w: usize,
    term_h: usize,
    grid: Grid,
    board: Vec<Paint>,
}

impl TerminalRenderer<io::Stdout> {
    pub fn new(grid: Grid) -> Self {
        Self::with_writer(grid, io::stdout())
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn with_writer(grid: Grid, writer: W) -> Self {
        TerminalRenderer {
            writer: BufWriter::with_capacity(16384, writer),
            front: FrameBuffer::new(0, 0),
            back: FrameBuffer::new(0, 0),
            term_w: 0,
            term_h: 0,
            grid,
            board: vec![Paint::Empty(Rgb::new(0, 0, 0)); grid.cell_count()],
        }
    }

    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            self.writer,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            SetBackgroundColor(Cell::BASE_BG),
            Clear(ClearType::All)
        )?;

        let (tw, th) = terminal::size().unwrap_or((80, 24));
        self.resize(tw as usize, th as usize);
        Ok(())
    }

    pub fn cleanup(&mut self) -> io::Result<()> {
        execute!(
            self.writer,
            ResetColor,
            cursor::Show,
            terminal::LeaveAlternateScreen
        )?;
        terminal::disable_raw_mode()
    }

    /// Terminal size the full board needs: HUD + gap + board + gap + help.
    pub fn required_size(&self) -> (usize, usize) {
        let w = self.grid.width_cells() as usize * CELL_W;
        let h = BOARD_ROW + self.grid.height_cells() as usize + 2;
        (w, h)
    }

    fn resize(&mut self, tw: usize, th: usize) {
        self.term_w = tw;
        self.term_h = th;
        self.front.resize(tw, th);
        self.back.resize(tw, th);
        // Force full repaint: back ≠ front for every cell.
        self.back.cells.fill(Cell::INVALID);
    }

    fn board_index(&self, at: Position) -> Option<usize> {
        if !self.grid.contains(at) {
            return None;
        }
        let (col, row) = self.grid.to_cell(at);
        Some(row as usize * self.grid.width_cells() as usize + col as usize)
    }

    fn paint(&mut self, at: Position, paint: Paint) {
        if let Some(i) = self.board_index(at) {
            self.board[i] = paint;
        }
    }

    // ── Compose: build front buffer content ──

    fn compose(&mut self, status: &Status) {
        self.front.clear();

        // ── HUD row ──
        let hud = format!(
            " GRID SNAKE  Length:{:<4} Best:{:<4} Resets:{:<3} Tick:{} ",
            status.length, status.best_length, status.resets, status.tick,
        );
        self.front.fill_row(HUD_ROW, HUD_BG);
        self.front.put_str(0, HUD_ROW, &hud, Color::White, HUD_BG);

        // ── Board ──
        let cols = self.grid.width_cells() as usize;
        let rows = self.grid.height_cells() as usize;
        for row in 0..rows {
            let y = BOARD_ROW + row;
            if y >= self.front.height { break; }
            for col in 0..cols {
                let x = col * CELL_W;
                if x + 1 >= self.front.width { break; }
                let (left, right) = match self.board[row * cols + col] {
                    Paint::Empty(bg) => {
                        let bg = to_color(bg);
                        (Cell::new(' ', Color::White, bg), Cell::new(' ', Color::White, bg))
                    }
                    Paint::Filled { fill, border } => {
                        let (fg, bg) = (to_color(border), to_color(fill));
                        (Cell::new('▏', fg, bg), Cell::new('▕', fg, bg))
                    }
                };
                self.front.set(x, y, left);
                self.front.set(x + 1, y, right);
            }
        }

        // ── Help bar ──
        let help_row = BOARD_ROW + rows + 1;
        let (need_w, need_h) = self.required_size();
        let help = if self.term_w < need_w || self.term_h < need_h {
            format!(" Terminal too small: need {}x{}  │  Esc/Q:Quit", need_w, need_h)
        } else {
            " Arrows/WASD:Turn  R:Restart  Esc/Q:Quit".to_string()
        };
        let row = help_row.min(self.front.height.saturating_sub(1));
        self.front.put_str(0, row, &help, Color::DarkGrey, Cell::BASE_BG);
    }

    // ── Diff flush: only write changed cells ──

    fn flush_diff(&mut self) -> io::Result<()> {
        let mut last_fg = Color::White;
        let mut last_bg = Cell::BASE_BG;
        let mut need_move = true;
        let mut last_x: usize = 0;
        let mut last_y: usize = 0;

        // Explicit base colors; ResetColor would fall back to the
        // terminal's own default and show line artifacts.
        queue!(self.writer, SetForegroundColor(Color::White), SetBackgroundColor(Cell::BASE_BG))?;

        for y in 0..self.front.height {
            for x in 0..self.front.width {
                let cell = self.front.get(x, y);
                if cell == self.back.get(x, y) {
                    need_move = true;
                    continue;
                }

                if need_move || x != last_x + 1 || y != last_y {
                    queue!(self.writer, MoveTo(x as u16, y as u16))?;
                    need_move = false;
                }
                if cell.fg != last_fg {
                    queue!(self.writer, SetForegroundColor(cell.fg))?;
                    last_fg = cell.fg;
                }
                if cell.bg != last_bg {
                    queue!(self.writer, SetBackgroundColor(cell.bg))?;
                    last_bg = cell.bg;
                }
                queue!(self.writer, Print(cell.ch))?;
                last_x = x;
                last_y = y;
            }
        }

        self.writer.flush()
    }

    fn present_sized(&mut self, tw: usize, th: usize, status: &Status) -> io::Result<()> {
        if tw != self.term_w || th != self.term_h {
            self.resize(tw, th);
            queue!(self.writer, SetBackgroundColor(Cell::BASE_BG), Clear(ClearType::All))?;
        }

        self.compose(status);
        self.flush_diff()?;

        // Swap: current front becomes next back
        std::mem::swap(&mut self.front, &mut self.back);
        Ok(())
    }
}

impl<W: Write> CellCanvas for TerminalRenderer<W> {
    fn fill_cell(&mut self, at: Position, fill: Rgb, border: Rgb) {
        self.paint(at, Paint::Filled { fill, border });
    }

    fn clear_cell(&mut self, at: Position, background: Rgb) {
        self.paint(at, Paint::Empty(background));
    }

    fn clear_board(&mut self, background: Rgb) {
        self.board.fill(Paint::Empty(background));
    }
}

impl<W: Write> RenderSink for TerminalRenderer<W> {
    fn present(&mut self, status: &Status) -> Result<(), GameError> {
        // Detect terminal resize
        let (tw, th) = terminal::size().unwrap_or((80, 24));
        self.present_sized(tw as usize, th as usize, status)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn renderer() -> TerminalRenderer<Vec<u8>> {
        TerminalRenderer::with_writer(Grid::new(20, 4, 3), Vec::new())
    }

    fn status(length: usize) -> Status {
        Status { length, best_length: length, resets: 0, tick: 1 }
    }

    fn written(r: &mut TerminalRenderer<Vec<u8>>) -> String {
        let out = String::from_utf8_lossy(r.writer.get_ref()).into_owned();
        r.writer.get_mut().clear();
        out
    }

    #[test]
    fn fill_and_clear_track_board_cells() {
        let mut r = renderer();
        let red = Rgb::new(255, 0, 0);
        let black = Rgb::new(0, 0, 0);
        let cyan = Rgb::new(93, 216, 228);

        r.clear_board(black);
        r.fill_cell(Position::new(20, 40), red, cyan);
        assert_eq!(r.board[2 * 4 + 1], Paint::Filled { fill: red, border: cyan });

        r.clear_cell(Position::new(20, 40), black);
        assert!(r.board.iter().all(|p| *p == Paint::Empty(black)));

        // Off-board positions are ignored
        r.fill_cell(Position::new(80, 0), red, cyan);
        r.fill_cell(Position::new(10, 0), red, cyan);
        assert!(r.board.iter().all(|p| *p == Paint::Empty(black)));
    }

    #[test]
    fn compose_places_cells_under_the_hud() {
        let mut r = renderer();
        r.resize(40, 10);
        let green = Rgb::new(0, 255, 0);
        r.clear_board(Rgb::new(0, 0, 0));
        r.fill_cell(Position::new(60, 20), green, Rgb::new(1, 2, 3));
        r.compose(&status(3));

        let left = r.front.get(3 * CELL_W, BOARD_ROW + 1);
        let right = r.front.get(3 * CELL_W + 1, BOARD_ROW + 1);
        assert_eq!(left.bg, to_color(green));
        assert_eq!(left.ch, '▏');
        assert_eq!(right.ch, '▕');
        assert_eq!(r.front.get(0, BOARD_ROW).ch, ' ');

        let hud: String = (0..20).map(|x| r.front.get(x, HUD_ROW).ch).collect();
        assert!(hud.contains("GRID SNAKE"));
    }

    #[test]
    fn unchanged_frame_writes_no_glyphs() {
        let mut r = renderer();
        r.clear_board(Rgb::new(0, 0, 0));
        r.present_sized(40, 10, &status(1)).unwrap();
        let first = written(&mut r);
        assert!(first.contains("Length"));

        r.present_sized(40, 10, &status(1)).unwrap();
        let second = written(&mut r);
        assert!(!second.contains("Length"));
        assert!(second.len() < first.len());
    }

    #[test]
    fn small_terminal_shows_size_hint() {
        let mut r = renderer();
        assert_eq!(r.required_size(), (8, 7));
        r.resize(8, 5);
        r.compose(&status(1));
        let bottom: String = (0..8).map(|x| r.front.get(x, 4).ch).collect();
        assert!(bottom.starts_with(" Termina"));
    }
}

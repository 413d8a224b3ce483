/// Board geometry: cell size, cell counts and toroidal wrap-around.
///
/// Positions are kept in screen units (multiples of `cell_size`), so a
/// position is also the top-left corner of the cell it names.

/// One of the four unit headings.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Unit step `(dx, dy)`; screen y grows downwards.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Position { x, y }
    }
}

/// Reduce `coord` into `[0, axis_len)`. Negative inputs wrap to the far edge.
#[inline]
pub fn wrap(coord: i32, axis_len: i32) -> i32 {
    coord.rem_euclid(axis_len)
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Grid {
    cell_size: i32,
    width_cells: i32,
    height_cells: i32,
}

impl Grid {
    /// Callers validate dimensions first (see `config`): each axis must
    /// hold at least two cells.
    pub fn new(cell_size: i32, width_cells: i32, height_cells: i32) -> Self {
        debug_assert!(cell_size > 0 && width_cells >= 2 && height_cells >= 2);
        Grid { cell_size, width_cells, height_cells }
    }

    pub fn cell_size(&self) -> i32 { self.cell_size }
    pub fn width_cells(&self) -> i32 { self.width_cells }
    pub fn height_cells(&self) -> i32 { self.height_cells }
    pub fn screen_width(&self) -> i32 { self.width_cells * self.cell_size }
    pub fn screen_height(&self) -> i32 { self.height_cells * self.cell_size }

    pub fn cell_count(&self) -> usize {
        (self.width_cells as usize) * (self.height_cells as usize)
    }

    /// Screen position of the cell at column `col`, row `row`.
    pub fn cell(&self, col: i32, row: i32) -> Position {
        Position::new(col * self.cell_size, row * self.cell_size)
    }

    /// Column/row indices of a cell-aligned position.
    pub fn to_cell(&self, pos: Position) -> (i32, i32) {
        (pos.x / self.cell_size, pos.y / self.cell_size)
    }

    /// Grid-aligned cell nearest the screen centre (rounded down).
    pub fn center(&self) -> Position {
        let cx = (self.screen_width() / 2) / self.cell_size * self.cell_size;
        let cy = (self.screen_height() / 2) / self.cell_size * self.cell_size;
        Position::new(cx, cy)
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0
            && pos.y >= 0
            && pos.x < self.screen_width()
            && pos.y < self.screen_height()
            && pos.x % self.cell_size == 0
            && pos.y % self.cell_size == 0
    }

    /// One cell step from `from` towards `dir`, wrapped on both axes.
    pub fn step(&self, from: Position, dir: Direction) -> Position {
        let (dx, dy) = dir.delta();
        Position::new(
            wrap(from.x + dx * self.cell_size, self.screen_width()),
            wrap(from.y + dy * self.cell_size, self.screen_height()),
        )
    }
}

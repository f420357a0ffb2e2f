//! Grid primitives shared by the agent and the worlds it runs in.
//!
//! Coordinates are `(row, col)` with row 0 at the top. Everything the agent
//! stores per cell lives in a [`Grid`], which is sized once and never resized.

use std::cmp::Ordering;
use std::fmt;
use std::ops::Index;

/// A cell coordinate in a rows × cols grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Manhattan distance, the exact step count on an open 4-connected grid.
    #[must_use]
    pub const fn manhattan(self, other: Self) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// Returns the position shifted by the given deltas, or `None` if it would
    /// underflow. Upper bounds are the caller's concern.
    #[must_use]
    pub fn offset(self, d_row: isize, d_col: isize) -> Option<Self> {
        Some(Self {
            row: self.row.checked_add_signed(d_row)?,
            col: self.col.checked_add_signed(d_col)?,
        })
    }

    /// The up to four orthogonal neighbours, in up, down, right, left order.
    pub fn neighbors(self) -> impl Iterator<Item = Self> {
        Move::CARDINALS.into_iter().filter_map(move |m| m.apply(self))
    }

    #[must_use]
    pub const fn is_adjacent(self, other: Self) -> bool {
        self.manhattan(other) == 1
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

impl From<(usize, usize)> for Position {
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}

/// One symbol of the sensor alphabet.
///
/// The same type doubles as the agent's belief about a cell: everything
/// starts out `Unknown` and is overwritten by observations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Unknown,
    Wall,
    Open,
    Food,
    Exit,
}

impl Cell {
    /// Character used for this symbol in map files and debug output.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Unknown => '?',
            Self::Wall => 'X',
            Self::Open => '_',
            Self::Food => 'o',
            Self::Exit => 'S',
        }
    }

    /// Parses a sensor symbol. Anything outside the alphabet reads as floor.
    #[must_use]
    pub const fn from_symbol(symbol: char) -> Self {
        match symbol {
            '?' => Self::Unknown,
            'X' => Self::Wall,
            'o' => Self::Food,
            'S' => Self::Exit,
            _ => Self::Open,
        }
    }

    #[must_use]
    pub const fn is_known(self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A unit movement command `(d_col, d_row)`, at most one axis non-zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Move {
    pub d_col: i8,
    pub d_row: i8,
}

impl Move {
    pub const STAY: Self = Self { d_col: 0, d_row: 0 };
    pub const UP: Self = Self { d_col: 0, d_row: -1 };
    pub const DOWN: Self = Self { d_col: 0, d_row: 1 };
    pub const RIGHT: Self = Self { d_col: 1, d_row: 0 };
    pub const LEFT: Self = Self { d_col: -1, d_row: 0 };

    /// Expansion order used by neighbour iteration.
    pub const CARDINALS: [Self; 4] = [Self::UP, Self::DOWN, Self::RIGHT, Self::LEFT];

    /// Per-axis sign of the displacement from `from` to `to`.
    #[must_use]
    pub fn toward(from: Position, to: Position) -> Self {
        Self {
            d_col: sign(to.col.cmp(&from.col)),
            d_row: sign(to.row.cmp(&from.row)),
        }
    }

    #[must_use]
    pub const fn is_stay(self) -> bool {
        self.d_col == 0 && self.d_row == 0
    }

    /// Position reached by taking this step, or `None` below row/col zero.
    #[must_use]
    pub fn apply(self, pos: Position) -> Option<Position> {
        pos.offset(isize::from(self.d_row), isize::from(self.d_col))
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.d_col, self.d_row)
    }
}

const fn sign(ordering: Ordering) -> i8 {
    match ordering {
        Ordering::Less => -1,
        Ordering::Equal => 0,
        Ordering::Greater => 1,
    }
}

/// A fixed-size, row-major 2D grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid<T> {
    cells: Vec<T>,
    rows: usize,
    cols: usize,
}

impl<T: Clone> Grid<T> {
    /// Creates a `rows` × `cols` grid with every cell set to `value`.
    #[must_use]
    pub fn new(rows: usize, cols: usize, value: T) -> Self {
        Self {
            cells: vec![value; rows * cols],
            rows,
            cols,
        }
    }

    /// Overwrites every cell with `value`, keeping the dimensions.
    pub fn fill(&mut self, value: T) {
        self.cells.fill(value);
    }
}

impl<T> Grid<T> {
    /// Builds a grid from row vectors. Returns `None` if rows differ in length.
    #[must_use]
    pub fn from_rows(rows: Vec<Vec<T>>) -> Option<Self> {
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|r| r.len() != n_cols) {
            return None;
        }
        Some(Self {
            cells: rows.into_iter().flatten().collect(),
            rows: n_rows,
            cols: n_cols,
        })
    }

    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Returns `(rows, cols)`.
    #[must_use]
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    #[must_use]
    pub const fn contains(&self, pos: Position) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    /// Flat index of `pos`, if in bounds.
    #[must_use]
    pub const fn index_of(&self, pos: Position) -> Option<usize> {
        if self.contains(pos) {
            Some(pos.row * self.cols + pos.col)
        } else {
            None
        }
    }

    #[must_use]
    pub fn get(&self, pos: Position) -> Option<&T> {
        self.index_of(pos).map(|i| &self.cells[i])
    }

    pub fn get_mut(&mut self, pos: Position) -> Option<&mut T> {
        self.index_of(pos).map(move |i| &mut self.cells[i])
    }

    /// Stores `value` at `pos`. Returns `false` (and drops the value) when
    /// `pos` is out of bounds.
    pub fn set(&mut self, pos: Position, value: T) -> bool {
        match self.get_mut(pos) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// Cells of one row, left to right.
    ///
    /// # Panics
    /// Panics if `row` is out of bounds.
    #[must_use]
    pub fn row(&self, row: usize) -> &[T] {
        let start = row * self.cols;
        &self.cells[start..start + self.cols]
    }

    /// All positions in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.rows).flat_map(move |r| (0..self.cols).map(move |c| Position::new(r, c)))
    }

    /// `(position, value)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Position, &T)> + '_ {
        self.positions().zip(self.cells.iter())
    }
}

impl<T> Index<Position> for Grid<T> {
    type Output = T;

    fn index(&self, pos: Position) -> &T {
        self.get(pos)
            .unwrap_or_else(|| panic!("position {pos} outside {}x{} grid", self.rows, self.cols))
    }
}

//! The 3×3 local observation handed to the agent every tick.

use crate::simulation::grid::Cell;

/// Side length of the sensor window.
pub const WINDOW_SIZE: usize = 3;

/// A 3×3 patch of sensed symbols centred on the agent.
///
/// Index `[1][1]` is the agent's own cell; `[0][*]` is the row above.
/// Offsets that fall outside the maze read `Unknown`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct SensorWindow {
    cells: [[Cell; WINDOW_SIZE]; WINDOW_SIZE],
}

impl SensorWindow {
    #[must_use]
    pub const fn new(cells: [[Cell; WINDOW_SIZE]; WINDOW_SIZE]) -> Self {
        Self { cells }
    }

    /// Builds a window from three rows of sensor symbols.
    ///
    /// # Panics
    /// Panics if any row is not exactly three symbols wide.
    #[must_use]
    pub fn from_symbols(rows: [&str; WINDOW_SIZE]) -> Self {
        let mut cells = [[Cell::Unknown; WINDOW_SIZE]; WINDOW_SIZE];
        for (r, line) in rows.iter().enumerate() {
            let symbols: Vec<char> = line.chars().collect();
            assert_eq!(
                symbols.len(),
                WINDOW_SIZE,
                "sensor row {r} must have {WINDOW_SIZE} symbols, got {line:?}"
            );
            for (c, symbol) in symbols.into_iter().enumerate() {
                cells[r][c] = Cell::from_symbol(symbol);
            }
        }
        Self { cells }
    }

    /// The reading for the agent's own cell.
    #[must_use]
    pub const fn center(&self) -> Cell {
        self.cells[1][1]
    }

    /// Reading at a relative offset in `-1..=1` on both axes.
    #[must_use]
    pub fn at(&self, d_row: isize, d_col: isize) -> Option<Cell> {
        let r = usize::try_from(d_row + 1).ok()?;
        let c = usize::try_from(d_col + 1).ok()?;
        self.cells.get(r)?.get(c).copied()
    }

    /// Every `(d_row, d_col, reading)` in the window, centre included.
    pub fn offsets(&self) -> impl Iterator<Item = (isize, isize, Cell)> + '_ {
        self.cells.iter().enumerate().flat_map(|(r, row)| {
            row.iter()
                .enumerate()
                .map(move |(c, &cell)| (r as isize - 1, c as isize - 1, cell))
        })
    }
}

//! The agent's persistent belief about the maze.
//!
//! Two parallel grids sized to the maze: what each cell is believed to
//! contain, and whether the agent has physically stood on it. Both are
//! only ever written by merging observations, so a cell that has been seen
//! never goes back to `Unknown`.

use crate::simulation::grid::{Cell, Grid, Position};
use crate::simulation::memory::SensorWindow;

/// Belief grid plus visitation grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KnowledgeStore {
    knowledge: Grid<Cell>,
    visited: Grid<bool>,
}

impl KnowledgeStore {
    /// Creates a store for a `rows` × `cols` maze with nothing known.
    #[must_use]
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            knowledge: Grid::new(rows, cols, Cell::Unknown),
            visited: Grid::new(rows, cols, false),
        }
    }

    #[must_use]
    pub const fn dimensions(&self) -> (usize, usize) {
        self.knowledge.dimensions()
    }

    #[must_use]
    pub const fn contains(&self, pos: Position) -> bool {
        self.knowledge.contains(pos)
    }

    /// Believed content of `pos`; out-of-bounds reads as `Unknown`.
    #[must_use]
    pub fn cell(&self, pos: Position) -> Cell {
        self.knowledge.get(pos).copied().unwrap_or_default()
    }

    #[must_use]
    pub fn is_visited(&self, pos: Position) -> bool {
        self.visited.get(pos).copied().unwrap_or(false)
    }

    #[must_use]
    pub const fn knowledge(&self) -> &Grid<Cell> {
        &self.knowledge
    }

    #[must_use]
    pub const fn visited(&self) -> &Grid<bool> {
        &self.visited
    }

    /// Merges a sensor reading taken at `position`.
    ///
    /// Every known symbol in the window overwrites the matching cell;
    /// offsets off the grid are dropped. The agent's own cell is then set
    /// from the centre reading, with `Unknown` stored as `Open` since the
    /// agent is standing on it.
    ///
    /// # Panics
    /// Panics if `position` lies outside the grid.
    pub fn update(&mut self, position: Position, window: &SensorWindow) {
        assert!(
            self.contains(position),
            "agent position {position} outside {:?} knowledge grid",
            self.dimensions()
        );

        for (d_row, d_col, sensed) in window.offsets() {
            if !sensed.is_known() {
                continue;
            }
            if let Some(target) = position.offset(d_row, d_col) {
                self.knowledge.set(target, sensed);
            }
        }

        let own = match window.center() {
            Cell::Unknown => Cell::Open,
            sensed => sensed,
        };
        self.knowledge.set(position, own);
    }

    /// Records that the agent has stood on `position`. Idempotent.
    pub fn mark_visited(&mut self, position: Position) {
        self.visited.set(position, true);
    }

    /// Positions currently believed to hold `kind`, in row-major order.
    pub fn cells_of(&self, kind: Cell) -> impl Iterator<Item = Position> + '_ {
        self.knowledge
            .iter()
            .filter(move |(_, &cell)| cell == kind)
            .map(|(pos, _)| pos)
    }

    /// Number of cells that are no longer `Unknown`.
    #[must_use]
    pub fn known_count(&self) -> usize {
        self.knowledge.iter().filter(|(_, c)| c.is_known()).count()
    }

    #[must_use]
    pub fn visited_count(&self) -> usize {
        self.visited.iter().filter(|(_, &v)| v).count()
    }

    /// Forgets everything: all cells `Unknown`, nothing visited.
    pub fn reset(&mut self) {
        self.knowledge.fill(Cell::Unknown);
        self.visited.fill(false);
    }
}

//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::collections::HashSet;

use maze_agent::simulation::grid::{Cell, Grid, Position};
use maze_agent::simulation::memory::{KnowledgeStore, SensorWindow};
use maze_agent::simulation::World;

/// A scriptable world: a symbol grid, an agent position, an exit lock
/// flag and a set of individually blocked edges.
///
/// `?` cells are physically open but never reported by the sensor, which
/// lets a test hold parts of the map unknown.
#[derive(Clone, Debug)]
pub struct GridWorld {
    pub cells: Grid<Cell>,
    pub agent: Position,
    pub exit_unlocked: bool,
    blocked: HashSet<(Position, Position)>,
}

impl GridWorld {
    /// `E` marks the agent; every other symbol follows the sensor alphabet.
    pub fn parse(rows: &[&str]) -> Self {
        let mut agent = Position::default();
        let cells = rows
            .iter()
            .enumerate()
            .map(|(r, line)| {
                line.chars()
                    .enumerate()
                    .map(|(c, symbol)| {
                        if symbol == 'E' {
                            agent = Position::new(r, c);
                        }
                        Cell::from_symbol(symbol)
                    })
                    .collect()
            })
            .collect();
        Self {
            cells: Grid::from_rows(cells).expect("rectangular fixture"),
            agent,
            exit_unlocked: false,
            blocked: HashSet::new(),
        }
    }

    /// Open grid with walls where `walls[i]` is set (row-major).
    pub fn from_walls(rows: usize, cols: usize, walls: &[bool]) -> Self {
        let cells = (0..rows)
            .map(|r| {
                (0..cols)
                    .map(|c| if walls[r * cols + c] { Cell::Wall } else { Cell::Open })
                    .collect()
            })
            .collect();
        Self {
            cells: Grid::from_rows(cells).expect("rectangular fixture"),
            agent: Position::default(),
            exit_unlocked: false,
            blocked: HashSet::new(),
        }
    }

    pub fn block(&mut self, a: Position, b: Position) {
        self.blocked.insert((a, b));
        self.blocked.insert((b, a));
    }

    pub fn unblock(&mut self, a: Position, b: Position) {
        self.blocked.remove(&(a, b));
        self.blocked.remove(&(b, a));
    }

    pub fn window_at(&self, pos: Position) -> SensorWindow {
        let mut window = [[Cell::Unknown; 3]; 3];
        for (r, row) in window.iter_mut().enumerate() {
            for (c, slot) in row.iter_mut().enumerate() {
                if let Some(p) = pos.offset(r as isize - 1, c as isize - 1) {
                    *slot = self.cells.get(p).copied().unwrap_or_default();
                }
            }
        }
        SensorWindow::new(window)
    }
}

impl World for GridWorld {
    fn dimensions(&self) -> (usize, usize) {
        self.cells.dimensions()
    }

    fn agent_position(&self) -> Position {
        self.agent
    }

    fn sensor_window(&self) -> SensorWindow {
        self.window_at(self.agent)
    }

    fn is_exit_unlocked(&self) -> bool {
        self.exit_unlocked
    }

    fn can_move_between(&self, from: Position, to: Position) -> bool {
        self.cells.contains(from)
            && self.cells.contains(to)
            && from.is_adjacent(to)
            && self.cells[from] != Cell::Wall
            && self.cells[to] != Cell::Wall
            && !self.blocked.contains(&(from, to))
    }
}

/// Knowledge after sensing from every non-`?` cell of `world`.
pub fn full_knowledge(world: &GridWorld) -> KnowledgeStore {
    let (rows, cols) = world.dimensions();
    let mut store = KnowledgeStore::new(rows, cols);
    for (pos, cell) in world.cells.iter() {
        if cell.is_known() {
            store.update(pos, &world.window_at(pos));
        }
    }
    store
}

/// Brute-force shortest step count under current knowledge.
pub fn bfs_distance(
    knowledge: &KnowledgeStore,
    world: &impl World,
    start: Position,
    goal: Position,
) -> Option<usize> {
    let walkable = |pos: Position| match knowledge.cell(pos) {
        Cell::Unknown | Cell::Wall => false,
        Cell::Exit => world.is_exit_unlocked(),
        Cell::Open | Cell::Food => true,
    };

    let (rows, cols) = knowledge.dimensions();
    let mut dist: Grid<Option<usize>> = Grid::new(rows, cols, None);
    let mut queue = std::collections::VecDeque::from([start]);
    dist.set(start, Some(0));
    while let Some(pos) = queue.pop_front() {
        let d = dist[pos].expect("queued cells have a distance");
        if pos == goal {
            return Some(d);
        }
        for next in pos.neighbors() {
            if knowledge.contains(next)
                && dist[next].is_none()
                && walkable(next)
                && world.can_move_between(pos, next)
            {
                dist.set(next, Some(d + 1));
                queue.push_back(next);
            }
        }
    }
    None
}

use std::fs;
use std::path::Path;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::simulation::grid::{Cell, Grid, Move, Position};
use crate::simulation::memory::SensorWindow;
use crate::simulation::params::{FALLBACK_MAZE, FOOD_VALUE, STARTING_LIVES, STEP_PENALTY, WIN_BONUS};
use crate::simulation::world::World;

/// Whether the run is still going.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Running,
    Won,
    /// Every life was spent walking into the locked exit.
    Lost,
}

/// What happened when a move was applied.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepOutcome {
    pub moved: bool,
    pub ate_food: bool,
    pub unlocked_exit: bool,
    pub won: bool,
    /// Walked into the exit while it was still locked: one life lost and,
    /// if any remain, back to the start.
    pub starved: bool,
}

/// Reference maze world.
///
/// Holds the true layout, the agent's body position and the game rules:
/// food is collected on entry, the exit unlocks once every food is gone,
/// and entering the unlocked exit wins. Trying to leave through the exit
/// before then is a hunger death: it costs a life and respawns the body at
/// the start, and the last life ends the game.
#[derive(Clone, Debug)]
pub struct Maze {
    initial: Grid<Cell>,
    cells: Grid<Cell>,
    start: Position,
    agent: Position,
    total_food: usize,
    foods_left: usize,
    exit_unlocked: bool,
    status: GameStatus,
    lives: u32,
    score: i64,
    steps: u64,
}

impl Maze {
    /// Parses a maze from text.
    ///
    /// One row per line, blank lines ignored. `X` wall, `o` food, `S` exit,
    /// `E` start; any other character is floor.
    pub fn parse(text: &str) -> Result<Self> {
        let lines: Vec<&str> = text
            .lines()
            .map(|line| line.trim_end_matches('\r'))
            .filter(|line| !line.trim().is_empty())
            .collect();
        let Some(first) = lines.first() else {
            return Err(Error::EmptyMaze);
        };

        let expected = first.chars().count();
        let mut rows = Vec::with_capacity(lines.len());
        let mut start = None;
        for (r, line) in lines.iter().enumerate() {
            let found = line.chars().count();
            if found != expected {
                return Err(Error::RaggedMaze {
                    line: r + 1,
                    expected,
                    found,
                });
            }
            let row = line
                .chars()
                .enumerate()
                .map(|(c, symbol)| match symbol {
                    'X' => Cell::Wall,
                    'o' => Cell::Food,
                    'S' => Cell::Exit,
                    'E' => {
                        start.get_or_insert(Position::new(r, c));
                        Cell::Open
                    }
                    _ => Cell::Open,
                })
                .collect();
            rows.push(row);
        }

        let layout = Grid::from_rows(rows).ok_or(Error::EmptyMaze)?;
        Self::from_layout(layout, start)
    }

    /// Reads and parses a maze file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let maze = Self::parse(&text)?;
        info!(path = %path.display(), rows = maze.cells.rows(), cols = maze.cells.cols(), "maze loaded");
        Ok(maze)
    }

    /// The built-in 4×4 maze.
    #[must_use]
    pub fn fallback() -> Self {
        Self::parse(&FALLBACK_MAZE.join("\n"))
            .unwrap_or_else(|err| unreachable!("built-in maze is invalid: {err}"))
    }

    /// Generates a random perfect maze with `food` items and one exit.
    ///
    /// Passages are carved on odd coordinates by an iterative randomized
    /// depth-first search, so every open cell is reachable from every other.
    /// The agent starts at `(1, 1)` and the exit sits on a dead end.
    pub fn generate<R: Rng + ?Sized>(rows: usize, cols: usize, food: usize, rng: &mut R) -> Result<Self> {
        if rows < 3 || cols < 3 {
            return Err(Error::Generate {
                rows,
                cols,
                reason: "need at least 3 rows and 3 columns",
            });
        }

        let mut layout = Grid::new(rows, cols, Cell::Wall);
        let start = Position::new(1, 1);
        layout.set(start, Cell::Open);

        let mut stack = vec![start];
        let mut directions = Move::CARDINALS;
        while let Some(&current) = stack.last() {
            directions.shuffle(rng);
            let carved = directions.iter().find_map(|step| {
                let wall = step.apply(current)?;
                let cell = step.apply(wall)?;
                let interior = cell.row < rows - 1 && cell.col < cols - 1;
                (interior && layout[cell] == Cell::Wall).then_some((wall, cell))
            });
            match carved {
                Some((wall, cell)) => {
                    layout.set(wall, Cell::Open);
                    layout.set(cell, Cell::Open);
                    stack.push(cell);
                }
                None => {
                    stack.pop();
                }
            }
        }

        // The exit goes on a dead end so a locked exit never cuts off food.
        let open_neighbors = |pos: Position| {
            pos.neighbors()
                .filter(|&next| layout.get(next) == Some(&Cell::Open))
                .count()
        };
        let mut dead_ends: Vec<Position> = layout
            .iter()
            .filter(|&(pos, &cell)| cell == Cell::Open && pos != start && open_neighbors(pos) == 1)
            .map(|(pos, _)| pos)
            .collect();
        dead_ends.shuffle(rng);
        let Some(&exit) = dead_ends.first() else {
            return Err(Error::Generate {
                rows,
                cols,
                reason: "maze too small for an exit",
            });
        };

        let mut spots: Vec<Position> = layout
            .iter()
            .filter(|&(pos, &cell)| cell == Cell::Open && pos != start && pos != exit)
            .map(|(pos, _)| pos)
            .collect();
        if spots.len() < food {
            return Err(Error::Generate {
                rows,
                cols,
                reason: "not enough open cells for the requested food",
            });
        }
        spots.shuffle(rng);
        layout.set(exit, Cell::Exit);
        for &pos in &spots[..food] {
            layout.set(pos, Cell::Food);
        }

        debug!(rows, cols, food, %exit, "maze generated");
        Self::from_layout(layout, Some(start))
    }

    fn from_layout(layout: Grid<Cell>, start: Option<Position>) -> Result<Self> {
        let start = start
            .or_else(|| {
                layout
                    .iter()
                    .find(|(_, &cell)| !matches!(cell, Cell::Wall | Cell::Exit))
                    .map(|(pos, _)| pos)
            })
            .ok_or(Error::NoStart)?;
        let total_food = layout.iter().filter(|(_, &cell)| cell == Cell::Food).count();

        let mut maze = Self {
            cells: layout.clone(),
            initial: layout,
            start,
            agent: start,
            total_food,
            foods_left: total_food,
            exit_unlocked: false,
            status: GameStatus::Running,
            lives: STARTING_LIVES,
            score: 0,
            steps: 0,
        };
        maze.reset();
        Ok(maze)
    }

    /// Restores the initial layout, lives, score and agent position.
    pub fn reset(&mut self) {
        self.cells = self.initial.clone();
        self.agent = self.start;
        self.foods_left = self.total_food;
        self.exit_unlocked = self.total_food == 0;
        self.status = GameStatus::Running;
        self.lives = STARTING_LIVES;
        self.score = 0;
        self.steps = 0;
    }

    /// Moves the agent one cell if the rules allow it.
    ///
    /// Refused moves (walls, off-grid, diagonal, or once the game is over)
    /// leave the world unchanged. A step into the locked exit is a hunger
    /// death instead.
    pub fn apply(&mut self, step: Move) -> StepOutcome {
        let mut outcome = StepOutcome::default();
        if self.status != GameStatus::Running || step.is_stay() {
            return outcome;
        }
        let Some(target) = step.apply(self.agent) else {
            return outcome;
        };
        if self.is_locked_exit(target) && self.agent.is_adjacent(target) {
            self.starve();
            outcome.starved = true;
            return outcome;
        }
        if !self.can_move_between(self.agent, target) {
            debug!(from = %self.agent, to = %target, "move refused");
            return outcome;
        }

        self.agent = target;
        self.steps += 1;
        self.score += STEP_PENALTY;
        outcome.moved = true;

        match self.cells[target] {
            Cell::Food => {
                self.cells.set(target, Cell::Open);
                self.foods_left = self.foods_left.saturating_sub(1);
                self.score += FOOD_VALUE;
                outcome.ate_food = true;
                info!(at = %target, left = self.foods_left, "food collected");
                if self.foods_left == 0 && !self.exit_unlocked {
                    self.exit_unlocked = true;
                    outcome.unlocked_exit = true;
                    info!("all food collected, exit unlocked");
                }
            }
            Cell::Exit if self.exit_unlocked => {
                self.status = GameStatus::Won;
                self.score += WIN_BONUS;
                outcome.won = true;
                info!(steps = self.steps, score = self.score, "exit reached");
            }
            _ => {}
        }
        outcome
    }

    fn is_locked_exit(&self, pos: Position) -> bool {
        !self.exit_unlocked && self.cells.get(pos) == Some(&Cell::Exit)
    }

    fn starve(&mut self) {
        self.lives = self.lives.saturating_sub(1);
        if self.lives == 0 {
            self.status = GameStatus::Lost;
            warn!(score = self.score, "starved with no lives left");
        } else {
            self.agent = self.start;
            warn!(lives = self.lives, "tried to leave before eating everything");
        }
    }

    /// True content of `pos`; off-grid reads `Unknown`.
    #[must_use]
    pub fn cell(&self, pos: Position) -> Cell {
        self.cells.get(pos).copied().unwrap_or_default()
    }

    /// Current layout, with collected food already removed.
    #[must_use]
    pub const fn layout(&self) -> &Grid<Cell> {
        &self.cells
    }

    #[must_use]
    pub const fn start(&self) -> Position {
        self.start
    }

    #[must_use]
    pub const fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub const fn lives(&self) -> u32 {
        self.lives
    }

    #[must_use]
    pub const fn score(&self) -> i64 {
        self.score
    }

    #[must_use]
    pub const fn steps(&self) -> u64 {
        self.steps
    }

    #[must_use]
    pub const fn total_food(&self) -> usize {
        self.total_food
    }

    #[must_use]
    pub const fn foods_left(&self) -> usize {
        self.foods_left
    }
}

impl World for Maze {
    fn dimensions(&self) -> (usize, usize) {
        self.cells.dimensions()
    }

    fn agent_position(&self) -> Position {
        self.agent
    }

    fn sensor_window(&self) -> SensorWindow {
        let mut window = [[Cell::Unknown; 3]; 3];
        for (r, row) in window.iter_mut().enumerate() {
            for (c, slot) in row.iter_mut().enumerate() {
                if let Some(pos) = self.agent.offset(r as isize - 1, c as isize - 1) {
                    *slot = self.cell(pos);
                }
            }
        }
        SensorWindow::new(window)
    }

    fn is_exit_unlocked(&self) -> bool {
        self.exit_unlocked
    }

    fn can_move_between(&self, from: Position, to: Position) -> bool {
        if !self.cells.contains(from) || !self.cells.contains(to) || !from.is_adjacent(to) {
            return false;
        }
        match (self.cells[from], self.cells[to]) {
            (Cell::Wall, _) | (_, Cell::Wall) => false,
            (_, Cell::Exit) => self.exit_unlocked,
            _ => true,
        }
    }
}

use std::collections::HashSet;

use rayon::prelude::*;

use crate::simulation::grid::{Cell, Position};
use crate::simulation::memory::KnowledgeStore;
use crate::simulation::{Maze, World};

pub const AGENT: char = 'P';
pub const WALL: char = '#';
pub const FLOOR: char = ' ';
pub const VISITED: char = '.';
pub const FOOD: char = 'o';
pub const EXIT_LOCKED: char = 'x';
pub const EXIT_OPEN: char = 'S';
pub const UNKNOWN: char = '?';
pub const ROUTE: char = '*';

/// Renders the true maze, one string per row.
#[must_use]
pub fn compute_world_grid(maze: &Maze) -> Vec<String> {
    let (rows, cols) = maze.dimensions();
    let agent = maze.agent_position();
    let unlocked = maze.is_exit_unlocked();

    (0..rows)
        .into_par_iter()
        .map(|r| {
            (0..cols)
                .map(|c| {
                    let pos = Position::new(r, c);
                    if pos == agent {
                        return AGENT;
                    }
                    match maze.cell(pos) {
                        Cell::Wall => WALL,
                        Cell::Food => FOOD,
                        Cell::Exit if unlocked => EXIT_OPEN,
                        Cell::Exit => EXIT_LOCKED,
                        Cell::Open | Cell::Unknown => FLOOR,
                    }
                })
                .collect()
        })
        .collect()
}

/// Renders the agent's belief: known cells, visited floor and the route
/// it is currently following. A known exit is drawn with the world's
/// current lock state.
#[must_use]
pub fn compute_belief_grid(
    knowledge: &KnowledgeStore,
    agent: Position,
    route: &[Position],
    exit_unlocked: bool,
) -> Vec<String> {
    let (rows, cols) = knowledge.dimensions();
    let route: HashSet<Position> = route.iter().copied().collect();

    (0..rows)
        .into_par_iter()
        .map(|r| {
            (0..cols)
                .map(|c| {
                    let pos = Position::new(r, c);
                    if pos == agent {
                        return AGENT;
                    }
                    match knowledge.cell(pos) {
                        Cell::Unknown => UNKNOWN,
                        Cell::Wall => WALL,
                        Cell::Food => FOOD,
                        Cell::Exit if exit_unlocked => EXIT_OPEN,
                        Cell::Exit => EXIT_LOCKED,
                        Cell::Open if route.contains(&pos) => ROUTE,
                        Cell::Open if knowledge.is_visited(pos) => VISITED,
                        Cell::Open => FLOOR,
                    }
                })
                .collect()
        })
        .collect()
}

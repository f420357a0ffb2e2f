//! Walkability and adjacency over the agent's current knowledge.
//!
//! A* and frontier detection both go through this one predicate so they can
//! never disagree about which cells are usable.

use crate::simulation::grid::{Cell, Position};
use crate::simulation::memory::KnowledgeStore;
use crate::simulation::world::World;

/// Read-only view pairing the knowledge grid with the world's edge queries.
pub struct Navigator<'a, W: World + ?Sized> {
    knowledge: &'a KnowledgeStore,
    world: &'a W,
    exit_unlocked: bool,
}

impl<'a, W: World + ?Sized> Navigator<'a, W> {
    /// Snapshots the exit lock state once; it is constant within a tick.
    pub fn new(knowledge: &'a KnowledgeStore, world: &'a W) -> Self {
        Self {
            knowledge,
            world,
            exit_unlocked: world.is_exit_unlocked(),
        }
    }

    #[must_use]
    pub const fn knowledge(&self) -> &KnowledgeStore {
        self.knowledge
    }

    #[must_use]
    pub const fn exit_unlocked(&self) -> bool {
        self.exit_unlocked
    }

    /// In bounds, known, not a wall, and not an exit that is still locked.
    #[must_use]
    pub fn is_walkable(&self, pos: Position) -> bool {
        if !self.knowledge.contains(pos) {
            return false;
        }
        match self.knowledge.cell(pos) {
            Cell::Unknown | Cell::Wall => false,
            Cell::Exit => self.exit_unlocked,
            Cell::Open | Cell::Food => true,
        }
    }

    /// Whether one step from `from` to `to` is allowed by the world.
    ///
    /// Out-of-bounds or non-adjacent pairs are rejected before the world is
    /// asked.
    #[must_use]
    pub fn can_step(&self, from: Position, to: Position) -> bool {
        self.knowledge.contains(from)
            && self.knowledge.contains(to)
            && from.is_adjacent(to)
            && self.world.can_move_between(from, to)
    }

    /// Walkable with at least one `Unknown` neighbour reachable in one step.
    #[must_use]
    pub fn is_frontier(&self, pos: Position) -> bool {
        self.is_walkable(pos)
            && pos.neighbors().any(|next| {
                self.knowledge.contains(next)
                    && !self.knowledge.cell(next).is_known()
                    && self.can_step(pos, next)
            })
    }

    /// Neighbours of `pos` that are walkable and reachable in one step.
    pub fn successors(&self, pos: Position) -> impl Iterator<Item = Position> + '_ {
        pos.neighbors()
            .filter(move |&next| self.is_walkable(next) && self.can_step(pos, next))
    }

    /// All frontier cells in row-major order.
    pub fn frontier(&self) -> impl Iterator<Item = Position> + '_ {
        self.knowledge
            .knowledge()
            .positions()
            .filter(move |&pos| self.is_frontier(pos))
    }
}

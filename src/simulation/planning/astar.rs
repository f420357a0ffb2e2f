//! A* search over the known part of the maze.
//!
//! Unit step cost, Manhattan heuristic (admissible and consistent on a
//! 4-connected grid), binary min-heap with lazy deletion: a position can sit
//! in the heap several times, but only its first pop is expanded and later
//! pops are discarded once it is settled.
//!
//! Search nodes live in a per-call arena and refer to their parent by index,
//! so the whole search graph is dropped in one go when `plan` returns.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use tracing::trace;

use crate::simulation::grid::{Grid, Position};
use crate::simulation::planning::Navigator;
use crate::simulation::world::World;

/// One entry of the search arena.
#[derive(Clone, Copy, Debug)]
struct SearchNode {
    pos: Position,
    /// Best known cost from the start.
    g: usize,
    /// `g + h`.
    f: usize,
    parent: Option<usize>,
}

/// Heap entry. `BinaryHeap` is a max-heap, so ordering is reversed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct OpenEntry {
    f: usize,
    h: usize,
    seq: usize,
    node: usize,
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .cmp(&self.f)
            .then_with(|| other.h.cmp(&self.h))
            .then_with(|| other.seq.cmp(&self.seq))
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Counters from the most recent search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Positions popped and expanded.
    pub expanded: usize,
    /// Heap pushes, stale duplicates included.
    pub pushed: usize,
    /// Pops discarded because the position was already settled.
    pub stale: usize,
}

/// Shortest-path planner.
#[derive(Clone, Debug, Default)]
pub struct AStarPlanner {
    last_stats: SearchStats,
}

impl AStarPlanner {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Counters from the last call to [`AStarPlanner::plan`].
    #[must_use]
    pub const fn last_stats(&self) -> SearchStats {
        self.last_stats
    }

    /// Finds a shortest route from `start` to `goal`.
    ///
    /// The route excludes `start` and ends with `goal`; it is empty when the
    /// two coincide. `None` means no route exists under current knowledge,
    /// which is an ordinary outcome rather than an error.
    pub fn plan<W: World + ?Sized>(
        &mut self,
        nav: &Navigator<'_, W>,
        start: Position,
        goal: Position,
    ) -> Option<Vec<Position>> {
        self.last_stats = SearchStats::default();

        let knowledge = nav.knowledge();
        if !knowledge.contains(start) || !knowledge.contains(goal) {
            return None;
        }
        let (rows, cols) = knowledge.dimensions();

        let mut arena: Vec<SearchNode> = Vec::new();
        let mut node_at: Grid<Option<usize>> = Grid::new(rows, cols, None);
        let mut settled: Grid<bool> = Grid::new(rows, cols, false);
        let mut open = BinaryHeap::new();
        let mut seq = 0;

        let h = start.manhattan(goal);
        arena.push(SearchNode {
            pos: start,
            g: 0,
            f: h,
            parent: None,
        });
        node_at.set(start, Some(0));
        open.push(OpenEntry { f: h, h, seq, node: 0 });
        self.last_stats.pushed += 1;

        while let Some(entry) = open.pop() {
            let current = arena[entry.node];
            if settled[current.pos] {
                self.last_stats.stale += 1;
                continue;
            }
            settled.set(current.pos, true);
            self.last_stats.expanded += 1;

            if current.pos == goal {
                let route = reconstruct(&arena, entry.node);
                trace!(%start, %goal, steps = route.len(), stats = ?self.last_stats, "route found");
                return Some(route);
            }

            for next in nav.successors(current.pos) {
                if settled[next] {
                    continue;
                }

                let g = current.g + 1;
                let index = if let Some(index) = node_at[next] {
                    index
                } else {
                    arena.push(SearchNode {
                        pos: next,
                        g: usize::MAX,
                        f: usize::MAX,
                        parent: None,
                    });
                    node_at.set(next, Some(arena.len() - 1));
                    arena.len() - 1
                };

                let node = &mut arena[index];
                if g < node.g {
                    let h = next.manhattan(goal);
                    node.g = g;
                    node.f = g + h;
                    node.parent = Some(entry.node);
                    seq += 1;
                    open.push(OpenEntry {
                        f: node.f,
                        h,
                        seq,
                        node: index,
                    });
                    self.last_stats.pushed += 1;
                }
            }
        }

        trace!(%start, %goal, stats = ?self.last_stats, "no route");
        None
    }
}

/// Walks parent links back to the start, dropping the start itself.
fn reconstruct(arena: &[SearchNode], mut index: usize) -> Vec<Position> {
    let mut route = Vec::new();
    while let Some(parent) = arena[index].parent {
        route.push(arena[index].pos);
        index = parent;
    }
    route.reverse();
    route
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_entry_pops_lowest_f_first() {
        let mut heap = BinaryHeap::new();
        heap.push(OpenEntry { f: 5, h: 1, seq: 0, node: 0 });
        heap.push(OpenEntry { f: 3, h: 3, seq: 1, node: 1 });
        heap.push(OpenEntry { f: 3, h: 1, seq: 2, node: 2 });
        heap.push(OpenEntry { f: 3, h: 1, seq: 3, node: 3 });

        let order: Vec<_> = std::iter::from_fn(|| heap.pop().map(|e| e.node)).collect();
        assert_eq!(order, vec![2, 3, 1, 0]);
    }

    #[test]
    fn test_reconstruct_excludes_start() {
        let arena = vec![
            SearchNode { pos: Position::new(0, 0), g: 0, f: 2, parent: None },
            SearchNode { pos: Position::new(0, 1), g: 1, f: 2, parent: Some(0) },
            SearchNode { pos: Position::new(1, 1), g: 2, f: 2, parent: Some(1) },
        ];
        assert_eq!(
            reconstruct(&arena, 2),
            vec![Position::new(0, 1), Position::new(1, 1)]
        );
        assert!(reconstruct(&arena, 0).is_empty());
    }
}

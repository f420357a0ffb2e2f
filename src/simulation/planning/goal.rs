//! Goal arbitration: exit, then nearest known food, then nearest frontier.

use std::fmt;

use crate::simulation::grid::{Cell, Position};
use crate::simulation::memory::KnowledgeStore;
use crate::simulation::planning::Navigator;
use crate::simulation::world::World;

/// What the agent is currently heading for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GoalKind {
    Exit,
    Food,
    Frontier,
}

impl fmt::Display for GoalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Exit => "exit",
            Self::Food => "food",
            Self::Frontier => "frontier",
        };
        f.write_str(label)
    }
}

/// A target cell together with the reason for going there.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Goal {
    pub kind: GoalKind,
    pub target: Position,
}

impl Goal {
    #[must_use]
    pub const fn new(kind: GoalKind, target: Position) -> Self {
        Self { kind, target }
    }
}

/// Ranks candidate targets in priority order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GoalSelector {
    food_quota: usize,
}

impl GoalSelector {
    #[must_use]
    pub const fn new(food_quota: usize) -> Self {
        Self { food_quota }
    }

    #[must_use]
    pub const fn food_quota(&self) -> usize {
        self.food_quota
    }

    /// Whether the exit branch is active.
    #[must_use]
    pub const fn wants_exit(&self, foods_planned: usize, exit_unlocked: bool) -> bool {
        foods_planned >= self.food_quota || exit_unlocked
    }

    /// Candidate goals, highest priority first.
    ///
    /// The known exit comes first, but only once the quota is met or the
    /// world reports it unlocked. Known food follows, then frontier cells;
    /// both are ordered by Manhattan distance with row-major ties, so the
    /// first of each is the nearest one and the rest are fallbacks for when
    /// A* cannot reach it. Targets equal to `from` are skipped since they
    /// would produce an empty route.
    pub fn candidates<W: World + ?Sized>(
        &self,
        nav: &Navigator<'_, W>,
        from: Position,
        foods_planned: usize,
    ) -> Vec<Goal> {
        let knowledge = nav.knowledge();
        let mut goals = Vec::new();

        if self.wants_exit(foods_planned, nav.exit_unlocked()) {
            if let Some(exit) = find_exit(knowledge).filter(|&exit| exit != from) {
                goals.push(Goal::new(GoalKind::Exit, exit));
            }
        }
        goals.extend(
            by_distance(knowledge.cells_of(Cell::Food), from)
                .map(|food| Goal::new(GoalKind::Food, food)),
        );
        goals.extend(
            by_distance(nav.frontier(), from).map(|cell| Goal::new(GoalKind::Frontier, cell)),
        );

        goals
    }
}

/// First known exit in row-major order.
#[must_use]
pub fn find_exit(knowledge: &KnowledgeStore) -> Option<Position> {
    knowledge.cells_of(Cell::Exit).next()
}

/// Known food closest to `from` by Manhattan distance, excluding `from`.
#[must_use]
pub fn nearest_food(knowledge: &KnowledgeStore, from: Position) -> Option<Position> {
    nearest(knowledge.cells_of(Cell::Food), from)
}

/// Frontier cell closest to `from` by Manhattan distance, excluding `from`.
#[must_use]
pub fn nearest_frontier<W: World + ?Sized>(nav: &Navigator<'_, W>, from: Position) -> Option<Position> {
    nearest(nav.frontier(), from)
}

/// Candidates other than `from`, closest first; ties keep yield order.
fn by_distance(
    candidates: impl Iterator<Item = Position>,
    from: Position,
) -> impl Iterator<Item = Position> {
    let mut ranked: Vec<Position> = candidates.filter(|&pos| pos != from).collect();
    ranked.sort_by_key(|pos| pos.manhattan(from));
    ranked.into_iter()
}

/// Closest candidate; ties go to the first one yielded.
fn nearest(candidates: impl Iterator<Item = Position>, from: Position) -> Option<Position> {
    candidates
        .filter(|&pos| pos != from)
        .fold(None, |best: Option<(usize, Position)>, pos| {
            let d = pos.manhattan(from);
            match best {
                Some((best_d, _)) if best_d <= d => best,
                _ => Some((d, pos)),
            }
        })
        .map(|(_, pos)| pos)
}

//! Turns a committed route into one unit move per tick.

use std::collections::VecDeque;

use tracing::warn;

use crate::simulation::grid::{Move, Position};
use crate::simulation::planning::Navigator;
use crate::simulation::world::World;

/// Waypoint queue the agent is currently executing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PathFollower {
    waypoints: VecDeque<Position>,
}

impl PathFollower {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True when there is no committed route.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.waypoints.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// Remaining waypoints, next one first.
    pub fn waypoints(&self) -> impl Iterator<Item = Position> + '_ {
        self.waypoints.iter().copied()
    }

    /// Replaces whatever was queued with `route`.
    pub fn commit(&mut self, route: Vec<Position>) {
        self.waypoints = route.into();
    }

    pub fn clear(&mut self) {
        self.waypoints.clear();
    }

    /// Emits the move toward the next waypoint.
    ///
    /// Pops the head if the agent already stands on it. Before moving, the
    /// step is re-checked against the world; if it is no longer possible the
    /// whole route is dropped and `Move::STAY` is returned so the next tick
    /// plans afresh.
    pub fn next_move<W: World + ?Sized>(&mut self, current: Position, nav: &Navigator<'_, W>) -> Move {
        if self.waypoints.front() == Some(&current) {
            self.waypoints.pop_front();
        }
        let Some(&next) = self.waypoints.front() else {
            return Move::STAY;
        };

        if !nav.can_step(current, next) {
            warn!(%current, %next, dropped = self.waypoints.len(), "route invalidated");
            self.waypoints.clear();
            return Move::STAY;
        }

        let step = Move::toward(current, next);
        debug_assert!(
            step.d_col == 0 || step.d_row == 0,
            "diagonal waypoint {next} from {current}"
        );
        step
    }
}

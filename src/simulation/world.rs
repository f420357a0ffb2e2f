//! The interface between the agent and whatever simulates the maze.
//!
//! The agent never owns game rules. Everything it learns about the world
//! arrives through these queries; none of them may mutate the world.

use crate::simulation::grid::Position;
use crate::simulation::memory::SensorWindow;

/// Queries the agent makes against its world once per tick.
pub trait World {
    /// `(rows, cols)` of the maze. Must not change during a run.
    fn dimensions(&self) -> (usize, usize);

    /// Cell the agent currently occupies.
    fn agent_position(&self) -> Position;

    /// 3×3 reading centred on [`World::agent_position`].
    fn sensor_window(&self) -> SensorWindow;

    /// Whether the exit may currently be entered.
    fn is_exit_unlocked(&self) -> bool;

    /// Whether a single step from `from` to `to` is physically possible.
    /// Only asked for orthogonally adjacent, in-bounds pairs.
    fn can_move_between(&self, from: Position, to: Position) -> bool;
}

impl<W: World + ?Sized> World for &W {
    fn dimensions(&self) -> (usize, usize) {
        (**self).dimensions()
    }

    fn agent_position(&self) -> Position {
        (**self).agent_position()
    }

    fn sensor_window(&self) -> SensorWindow {
        (**self).sensor_window()
    }

    fn is_exit_unlocked(&self) -> bool {
        (**self).is_exit_unlocked()
    }

    fn can_move_between(&self, from: Position, to: Position) -> bool {
        (**self).can_move_between(from, to)
    }
}

//! Headless driver: ticks an agent against a maze until the game ends, the
//! agent stalls, or the tick budget runs out.

use tracing::info;

use crate::simulation::{GameStatus, Maze, MazeAgent, StepOutcome};

/// Consecutive goal-less idle ticks after which a run counts as stalled.
/// One idle tick is normal right after a route completes.
const STALL_TICKS: u32 = 2;

/// How an episode ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EpisodeEnd {
    Won,
    Lost,
    /// The agent has no reachable goal left.
    Stalled,
    TickLimit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EpisodeSummary {
    pub end: EpisodeEnd,
    pub ticks: u64,
    pub steps: u64,
    pub score: i64,
    pub foods_left: usize,
}

/// Runs one decision/apply cycle. Returns the move's outcome.
pub fn tick(maze: &mut Maze, agent: &mut MazeAgent) -> StepOutcome {
    let step = agent.decide_next_move(&*maze);
    maze.apply(step)
}

/// Runs the agent against `maze` for at most `max_ticks` ticks.
pub fn run_episode(maze: &mut Maze, agent: &mut MazeAgent, max_ticks: u64) -> EpisodeSummary {
    let mut ticks = 0;
    let mut idle_streak = 0;
    let end = loop {
        match maze.status() {
            GameStatus::Won => break EpisodeEnd::Won,
            GameStatus::Lost => break EpisodeEnd::Lost,
            GameStatus::Running => {}
        }
        if ticks >= max_ticks {
            break EpisodeEnd::TickLimit;
        }
        ticks += 1;

        let outcome = tick(maze, agent);
        if outcome.moved || agent.current_goal().is_some() {
            idle_streak = 0;
        } else {
            idle_streak += 1;
            if idle_streak >= STALL_TICKS {
                break EpisodeEnd::Stalled;
            }
        }
    };

    let summary = EpisodeSummary {
        end,
        ticks,
        steps: maze.steps(),
        score: maze.score(),
        foods_left: maze.foods_left(),
    };
    info!(?summary, "episode finished");
    summary
}

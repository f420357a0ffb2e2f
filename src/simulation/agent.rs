use tracing::{debug, info};

use crate::config::AgentConfig;
use crate::simulation::grid::{Move, Position};
use crate::simulation::memory::KnowledgeStore;
use crate::simulation::params::DEFAULT_FOOD_QUOTA;
use crate::simulation::planning::{
    AStarPlanner, Goal, GoalKind, GoalSelector, Navigator, PathFollower, SearchStats,
};
use crate::simulation::world::World;

/// Navigation agent for a partially observed maze.
///
/// Each tick runs the same pipeline to completion:
/// 1. Merge the sensor window into the knowledge store, mark the cell visited.
/// 2. If no route is committed, pick a goal (exit, food, frontier) and plan
///    a route to it with A*.
/// 3. Emit one unit move along the route.
///
/// All state is owned here and only touched from inside a tick.
#[derive(Clone, Debug)]
pub struct MazeAgent {
    knowledge: KnowledgeStore,
    follower: PathFollower,
    planner: AStarPlanner,
    selector: GoalSelector,
    /// Food the agent has committed routes to. Counted at plan time.
    foods_planned: usize,
    current_goal: Option<Goal>,
    ticks: u64,
}

impl MazeAgent {
    /// Creates an agent for a `rows` × `cols` maze.
    #[must_use]
    pub fn new(rows: usize, cols: usize, food_quota: usize) -> Self {
        Self {
            knowledge: KnowledgeStore::new(rows, cols),
            follower: PathFollower::new(),
            planner: AStarPlanner::new(),
            selector: GoalSelector::new(food_quota),
            foods_planned: 0,
            current_goal: None,
            ticks: 0,
        }
    }

    /// Creates an agent using the configured quota, or the default one.
    #[must_use]
    pub fn from_config(rows: usize, cols: usize, config: &AgentConfig) -> Self {
        Self::new(rows, cols, config.food_quota.unwrap_or(DEFAULT_FOOD_QUOTA))
    }

    #[must_use]
    pub const fn knowledge(&self) -> &KnowledgeStore {
        &self.knowledge
    }

    #[must_use]
    pub const fn foods_planned(&self) -> usize {
        self.foods_planned
    }

    #[must_use]
    pub const fn food_quota(&self) -> usize {
        self.selector.food_quota()
    }

    /// Goal behind the route currently being followed.
    #[must_use]
    pub const fn current_goal(&self) -> Option<Goal> {
        self.current_goal
    }

    /// Remaining waypoints, next one first.
    pub fn waypoints(&self) -> impl Iterator<Item = Position> + '_ {
        self.follower.waypoints()
    }

    #[must_use]
    pub const fn ticks(&self) -> u64 {
        self.ticks
    }

    #[must_use]
    pub const fn last_search(&self) -> SearchStats {
        self.planner.last_stats()
    }

    /// Runs one decision tick against `world` and returns the move to make.
    ///
    /// # Panics
    /// Panics if the world reports dimensions different from the ones the
    /// agent was built with.
    pub fn decide_next_move<W: World + ?Sized>(&mut self, world: &W) -> Move {
        assert_eq!(
            world.dimensions(),
            self.knowledge.dimensions(),
            "world dimensions changed under the agent"
        );
        self.ticks += 1;

        let position = world.agent_position();
        self.knowledge.update(position, &world.sensor_window());
        self.knowledge.mark_visited(position);

        if self.follower.is_idle() {
            self.plan(world, position);
        }

        let nav = Navigator::new(&self.knowledge, world);
        let step = self.follower.next_move(position, &nav);
        if self.follower.is_idle() {
            self.current_goal = None;
        }

        debug!(tick = self.ticks, %position, %step, remaining = self.follower.len(), "decided");
        step
    }

    /// Commits a route to the highest-priority goal that has one.
    fn plan<W: World + ?Sized>(&mut self, world: &W, position: Position) {
        let nav = Navigator::new(&self.knowledge, world);
        self.current_goal = None;

        for goal in self.selector.candidates(&nav, position, self.foods_planned) {
            let Some(route) = self.planner.plan(&nav, position, goal.target) else {
                debug!(kind = %goal.kind, target = %goal.target, "no route, falling through");
                continue;
            };

            if goal.kind == GoalKind::Food {
                self.foods_planned += 1;
            }
            info!(
                kind = %goal.kind,
                target = %goal.target,
                steps = route.len(),
                foods_planned = self.foods_planned,
                "new route"
            );
            self.follower.commit(route);
            self.current_goal = Some(goal);
            return;
        }

        debug!(%position, "idle: no reachable goal");
    }

    /// Forgets everything: knowledge, visits, route and food counter.
    pub fn reset(&mut self) {
        self.knowledge.reset();
        self.follower.clear();
        self.foods_planned = 0;
        self.current_goal = None;
        self.ticks = 0;
    }
}

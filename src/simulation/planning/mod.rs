//! Planning systems for the maze agent.
//!
//! This module provides:
//! - The shared walkability / adjacency predicate
//! - Goal selection (exit, food, frontier)
//! - A* route search
//! - Route following, one unit step per tick

mod astar;
mod follower;
mod goal;
mod navigator;

pub use astar::{AStarPlanner, SearchStats};
pub use follower::PathFollower;
pub use goal::{find_exit, nearest_food, nearest_frontier, Goal, GoalKind, GoalSelector};
pub use navigator::Navigator;

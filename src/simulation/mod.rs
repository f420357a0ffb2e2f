pub mod agent;
pub mod environment;
pub mod episode;
pub mod grid;
pub mod memory;
pub mod params;
pub mod planning;
pub mod world;

pub use agent::MazeAgent;
pub use environment::{GameStatus, Maze, StepOutcome};
pub use grid::{Cell, Grid, Move, Position};
pub use world::World;

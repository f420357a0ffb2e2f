//! Simulation constants.

/// Food the agent plans to collect before heading for the exit, when no
/// quota is configured.
pub const DEFAULT_FOOD_QUOTA: usize = 4;

pub const DEFAULT_TICK_RATE_MS: u64 = 80;
pub const DEFAULT_MAX_TICKS: u64 = 10_000;

// Scoring used by the reference maze.
pub const FOOD_VALUE: i64 = 10;
pub const STEP_PENALTY: i64 = -1;
pub const WIN_BONUS: i64 = 100;

/// Lives at the start of a game; each hunger death costs one.
pub const STARTING_LIVES: u32 = 3;

/// Maze used when no map file is supplied.
pub const FALLBACK_MAZE: [&str; 4] = ["XXXX", "XEXX", "XoSX", "XXXX"];

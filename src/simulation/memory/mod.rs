//! Memory systems for the maze agent.
//!
//! This module provides:
//! - The 3×3 sensor window delivered each tick
//! - The knowledge store: belief grid plus visitation grid

mod knowledge;
mod sensor;

pub use knowledge::KnowledgeStore;
pub use sensor::{SensorWindow, WINDOW_SIZE};

//! Error type for the fallible edges of the crate: map files and config.
//!
//! The agent itself has no error path. "No route" and "no goal" are
//! returned as `None`.

use std::path::PathBuf;

/// Crate error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("maze is empty")]
    EmptyMaze,

    #[error("maze line {line} has width {found}, expected {expected}")]
    RaggedMaze {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("maze has no cell the agent can start on")]
    NoStart,

    #[error("cannot generate a {rows}x{cols} maze: {reason}")]
    Generate {
        rows: usize,
        cols: usize,
        reason: &'static str,
    },

    #[error("invalid config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, Error>;

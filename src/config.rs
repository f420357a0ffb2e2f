//! Runtime configuration, read from an optional TOML file.
//!
//! ```toml
//! tick_rate_ms = 80
//! max_ticks = 10000
//!
//! [agent]
//! food_quota = 4
//! ```
//!
//! Every field is optional; missing ones take the defaults from
//! [`crate::simulation::params`].

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::simulation::params::{DEFAULT_FOOD_QUOTA, DEFAULT_MAX_TICKS, DEFAULT_TICK_RATE_MS};

/// Agent tuning.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AgentConfig {
    /// Food the agent plans to collect before heading for the exit.
    /// Unset means "derive it from the maze".
    pub food_quota: Option<usize>,
}

impl AgentConfig {
    /// The configured quota, else `maze_food`, else the library default.
    #[must_use]
    pub fn resolve_quota(&self, maze_food: Option<usize>) -> usize {
        self.food_quota.or(maze_food).unwrap_or(DEFAULT_FOOD_QUOTA)
    }
}

/// Top-level configuration for the binary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    /// Milliseconds between agent decisions in the terminal UI.
    pub tick_rate_ms: u64,

    /// Tick cap for headless runs.
    pub max_ticks: u64,

    pub agent: AgentConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: DEFAULT_TICK_RATE_MS,
            max_ticks: DEFAULT_MAX_TICKS,
            agent: AgentConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn validate(&self) -> Result<()> {
        if self.tick_rate_ms == 0 {
            return Err(Error::InvalidConfig("tick_rate_ms must be > 0".into()));
        }
        if self.max_ticks == 0 {
            return Err(Error::InvalidConfig("max_ticks must be > 0".into()));
        }
        if self.agent.food_quota == Some(0) {
            return Err(Error::InvalidConfig("agent.food_quota must be > 0".into()));
        }
        Ok(())
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `AppConfig::default()`.
pub fn load_config(path: &Path) -> Result<AppConfig> {
    if !path.exists() {
        return Ok(AppConfig::default());
    }

    let raw = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config: AppConfig = toml::from_str(&raw).map_err(|source| Error::ConfigParse {
        path: path.to_path_buf(),
        source,
    })?;
    config.validate()?;
    Ok(config)
}

//! Tracing setup for the binary.
//!
//! Filter comes from `RUST_LOG` and defaults to `warn`. Output goes to
//! stderr in headless mode; in the terminal UI it goes to a file
//! ([`DEFAULT_LOG_FILE`] unless one is given), since stderr shares the
//! alternate screen.
//!
//! ```bash
//! RUST_LOG=maze_agent=debug maze_agent --headless
//! ```

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::{Error, Result};

/// Log file used by the terminal UI when none is given.
pub const DEFAULT_LOG_FILE: &str = "maze_agent.log";

/// Where log lines go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget<'a> {
    Stderr,
    File(&'a Path),
}

impl<'a> LogTarget<'a> {
    /// An explicit file always wins; otherwise stderr when headless and
    /// [`DEFAULT_LOG_FILE`] under the terminal UI.
    #[must_use]
    pub fn select(log_file: Option<&'a Path>, headless: bool) -> Self {
        match (log_file, headless) {
            (Some(path), _) => Self::File(path),
            (None, true) => Self::Stderr,
            (None, false) => Self::File(Path::new(DEFAULT_LOG_FILE)),
        }
    }
}

/// Install the global tracing subscriber.
pub fn init(target: LogTarget<'_>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    match target {
        LogTarget::Stderr => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr).compact())
            .init(),
        LogTarget::File(path) => {
            let file = File::create(path).map_err(|source| Error::Io {
                path: path.to_path_buf(),
                source,
            })?;
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false).compact())
                .init();
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_ui_defaults_to_log_file() {
        assert_eq!(
            LogTarget::select(None, false),
            LogTarget::File(Path::new(DEFAULT_LOG_FILE))
        );
    }

    #[test]
    fn test_headless_logs_to_stderr() {
        assert_eq!(LogTarget::select(None, true), LogTarget::Stderr);
    }

    #[test]
    fn test_explicit_file_wins() {
        let path = Path::new("run.log");
        assert_eq!(LogTarget::select(Some(path), true), LogTarget::File(path));
        assert_eq!(LogTarget::select(Some(path), false), LogTarget::File(path));
    }
}

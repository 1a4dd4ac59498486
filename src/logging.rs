//! Tracing subscriber setup.
//!
//! `RUST_LOG` takes precedence; otherwise `-v` flags pick the level, defaulting to warnings
//! only. Subcommands log to stderr. The interactive UI draws over the whole terminal, so its
//! logs go to a file in the data directory instead.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Where log lines end up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget<'a> {
    Stderr,
    File(&'a Path),
}

pub fn level_for(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

fn env_filter(verbosity: u8) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_for(verbosity).as_str().to_lowercase()))
}

/// Install the global subscriber. Safe to call more than once; later calls are ignored.
pub fn init(verbosity: u8, target: LogTarget<'_>) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbosity))
        .with_target(false);

    let result = match target {
        LogTarget::Stderr => builder.with_writer(std::io::stderr).try_init(),
        LogTarget::File(path) => {
            match OpenOptions::new().create(true).append(true).open(path) {
                Ok(file) => builder.with_ansi(false).with_writer(Mutex::new(file)).try_init(),
                // Writing to the terminal would garble the UI; run without logs instead.
                Err(e) => {
                    eprintln!("Could not open log file {}: {e}", path.display());
                    return;
                }
            }
        }
    };
    // Only fails when a subscriber is already installed.
    let _ = result;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_maps_to_levels() {
        assert_eq!(level_for(0), Level::WARN);
        assert_eq!(level_for(1), Level::INFO);
        assert_eq!(level_for(2), Level::DEBUG);
        assert_eq!(level_for(9), Level::TRACE);
    }

    #[test]
    fn file_target_creates_log_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("tick.log");
        init(1, LogTarget::File(&path));
        assert!(path.exists());
        init(1, LogTarget::Stderr);
    }
}

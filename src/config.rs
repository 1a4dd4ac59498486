//! Runtime settings.
//!
//! Settings are resolved once in `main` from the command line, the environment and defaults,
//! then passed down explicitly.

use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::Cli;
use crate::error::{Error, Result};
use crate::persist::DEFAULT_STORAGE_KEY;

/// Name of the data directory created under `$HOME`.
pub const DATA_DIR_NAME: &str = ".tick";
/// Log file used while the interactive UI owns the terminal.
pub const LOG_FILE_NAME: &str = "tick.log";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub data_dir: PathBuf,
    pub storage_key: String,
    pub verbosity: u8,
}

impl Settings {
    /// Resolve settings from parsed arguments. `--data-dir` / `TICK_DATA_DIR` are already
    /// folded into `cli.data_dir` by clap; `home` is the value of `$HOME`, if any.
    pub fn resolve(cli: &Cli, home: Option<&str>) -> Result<Self> {
        let data_dir = match &cli.data_dir {
            Some(dir) => dir.clone(),
            None => default_data_dir(home),
        };
        let storage_key = cli.key.trim().to_string();
        validate_key(&storage_key)?;
        Ok(Settings {
            data_dir,
            storage_key,
            verbosity: cli.verbose,
        })
    }

    /// Create the data directory if needed.
    pub fn ensure_data_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.data_dir).map_err(|e| Error::DataDir {
            path: self.data_dir.clone(),
            reason: e.to_string(),
        })
    }

    pub fn log_file(&self) -> PathBuf {
        self.data_dir.join(LOG_FILE_NAME)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            data_dir: PathBuf::from(DATA_DIR_NAME),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            verbosity: 0,
        }
    }
}

pub fn default_data_dir(home: Option<&str>) -> PathBuf {
    match home {
        Some(h) if !h.is_empty() => Path::new(h).join(DATA_DIR_NAME),
        _ => PathBuf::from(".").join(DATA_DIR_NAME),
    }
}

/// Storage keys become file names, so keep them to a safe alphabet.
fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(Error::Invalid("storage key cannot be empty".into()));
    }
    if !key.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') {
        return Err(Error::Invalid(format!(
            "storage key '{key}' may only contain letters, digits, '-' and '_'"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("tick").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn defaults_to_dot_dir_under_home() {
        let cli = parse(&["list"]);
        if cli.data_dir.is_some() {
            // TICK_DATA_DIR is set in this environment; nothing to check.
            return;
        }
        let s = Settings::resolve(&cli, Some("/home/ada")).unwrap();
        assert_eq!(s.data_dir, PathBuf::from("/home/ada/.tick"));
        assert_eq!(s.storage_key, "tasks");
        assert_eq!(s.verbosity, 0);
        assert_eq!(s.log_file(), PathBuf::from("/home/ada/.tick/tick.log"));
    }

    #[test]
    fn flag_overrides_home() {
        let cli = parse(&["--data-dir", "/tmp/t", "-vv", "--key", "work", "list"]);
        let s = Settings::resolve(&cli, Some("/home/ada")).unwrap();
        assert_eq!(s.data_dir, PathBuf::from("/tmp/t"));
        assert_eq!(s.storage_key, "work");
        assert_eq!(s.verbosity, 2);
    }

    #[test]
    fn missing_home_falls_back_to_cwd() {
        assert_eq!(default_data_dir(None), PathBuf::from("./.tick"));
        assert_eq!(default_data_dir(Some("")), PathBuf::from("./.tick"));
    }

    #[test]
    fn rejects_path_like_keys() {
        let cli = parse(&["--key", "../etc", "list"]);
        assert!(Settings::resolve(&cli, None).is_err());
        let cli = parse(&["--key", "  ", "list"]);
        assert!(Settings::resolve(&cli, None).is_err());
    }

    #[test]
    fn ensure_data_dir_creates_nested_dirs() {
        let tmp = tempfile::TempDir::new().unwrap();
        let s = Settings {
            data_dir: tmp.path().join("a").join("b"),
            ..Settings::default()
        };
        s.ensure_data_dir().unwrap();
        assert!(s.data_dir.is_dir());
    }
}

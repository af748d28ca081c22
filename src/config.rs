//! Command line arguments and the JSON config file.
//!
//! The config file lives in the platform config directory
//! (`~/.config/goban/config.json` on Linux). A missing file means defaults;
//! command line flags override whatever the file says.

use crate::engine::{check_board_size, GameError, DEFAULT_BOARD_SIZE};
use clap::Parser;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

const CONFIG_FILE: &str = "config.json";
const LOG_FILE: &str = "goban.log";

/// Two-player Go in the terminal.
#[derive(Debug, Parser)]
#[command(name = "goban", version)]
pub struct Cli {
    /// Board size (5 to 25)
    #[arg(long, short = 's')]
    pub size: Option<usize>,

    /// Write logs to this file instead of the default location
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Log filter, e.g. "info" or "goban=debug" (RUST_LOG takes precedence)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Shorthand for --log-level debug
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Print the effective configuration and exit
    #[arg(long)]
    pub print_config: bool,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config: {0}")]
    Io(#[from] io::Error),
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Settings loaded from the config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub board_size: usize,
    pub log_level: String,
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            board_size: DEFAULT_BOARD_SIZE,
            log_level: "info".to_string(),
            log_file: None,
        }
    }
}

impl Config {
    /// Parse a config from JSON text. Unknown fields are ignored and missing
    /// ones take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a config file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load the config file from the platform config directory. A missing
    /// file yields defaults.
    pub fn load() -> Result<Self, ConfigError> {
        match config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Apply command line overrides.
    pub fn merge_cli(&mut self, cli: &Cli) {
        if let Some(size) = cli.size {
            self.board_size = size;
        }
        if let Some(path) = &cli.log_file {
            self.log_file = Some(path.clone());
        }
        if let Some(level) = &cli.log_level {
            self.log_level = level.clone();
        }
        if cli.verbose {
            self.log_level = "debug".to_string();
        }
    }

    /// Reject settings the engine cannot start with.
    pub fn validate(&self) -> Result<(), GameError> {
        check_board_size(self.board_size).map(|_| ())
    }

    /// Log file to use: the configured one or `<data dir>/goban.log`.
    pub fn resolved_log_file(&self) -> io::Result<PathBuf> {
        if let Some(path) = &self.log_file {
            return Ok(path.clone());
        }
        let dirs = project_dirs().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, "Could not determine data directory")
        })?;
        let dir = dirs.data_dir();
        fs::create_dir_all(dir)?;
        Ok(dir.join(LOG_FILE))
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "goban")
}

/// Path of the config file, if the platform has a config directory.
pub fn config_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("goban").chain(args.iter().copied()))
            .expect("valid args")
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.board_size, 9);
        assert_eq!(config.log_level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = Config::from_json(r#"{"board_size": 13}"#).unwrap();
        assert_eq!(config.board_size, 13);
        assert_eq!(config.log_level, "info");
        assert!(config.log_file.is_none());
    }

    #[test]
    fn test_bad_json_is_an_error() {
        assert!(matches!(
            Config::from_json("{board_size"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let path = Path::new("/definitely/not/here/config.json");
        assert!(matches!(Config::load_from(path), Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_cli_overrides_file() {
        let mut config = Config::from_json(r#"{"board_size": 13, "log_level": "warn"}"#).unwrap();
        config.merge_cli(&cli(&["--size", "19", "-v"]));
        assert_eq!(config.board_size, 19);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_cli_without_flags_changes_nothing() {
        let mut config = Config::from_json(r#"{"board_size": 13}"#).unwrap();
        let before = config.clone();
        config.merge_cli(&cli(&[]));
        assert_eq!(config, before);
    }

    #[test]
    fn test_validate_rejects_out_of_range_size() {
        let config = Config {
            board_size: 3,
            ..Config::default()
        };
        assert_eq!(config.validate(), Err(GameError::InvalidSize(3)));
    }

    #[test]
    fn test_explicit_log_file_wins() {
        let config = Config {
            log_file: Some(PathBuf::from("/tmp/goban-test.log")),
            ..Config::default()
        };
        assert_eq!(
            config.resolved_log_file().unwrap(),
            PathBuf::from("/tmp/goban-test.log")
        );
    }
}

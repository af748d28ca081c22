//! Log file setup.
//!
//! The terminal belongs to the board view, so all `tracing` output goes to a
//! file. `RUST_LOG` overrides the configured filter.

use crate::config::Config;
use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Build the filter: `RUST_LOG` if set and valid, else the configured level.
pub fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber writing to the configured log file.
/// Returns the path being written to.
pub fn init(config: &Config) -> io::Result<PathBuf> {
    let path = config.resolved_log_file()?;
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter(&config.log_level))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;

    Ok(path)
}

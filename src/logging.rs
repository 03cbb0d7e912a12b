//! Log setup for the terminal binary.
//!
//! The terminal is in raw alternate-screen mode while the game runs, so logs
//! never go to stdout/stderr. They are written to `SNAKE_LOG_PATH` when set,
//! and dropped otherwise.

use std::fs::{self, OpenOptions};
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use tui_snake::engine::AppConfig;

/// Install the global subscriber. Returns `false` when logging is disabled.
pub fn init(config: &AppConfig) -> Result<bool> {
    let Some(path) = config.log_path.as_ref() else {
        return Ok(false);
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    let filter = EnvFilter::try_new(&config.log_filter).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!("installing log subscriber: {e}"))?;

    Ok(true)
}

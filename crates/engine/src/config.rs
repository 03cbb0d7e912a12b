//! Runtime configuration from environment variables.
//!
//! - `SNAKE_BEST_SCORE_PATH`: best-score file (default under the user data dir)
//! - `SNAKE_SEED`: RNG seed (default: derived from the clock)
//! - `SNAKE_LOG_PATH`: log file; logging is off when unset
//! - `SNAKE_LOG`: log filter directive (default: "info")

use std::env;
use std::path::PathBuf;

const APP_DIR: &str = "tui-snake";
const BEST_SCORE_FILE: &str = "best_score.json";
const FALLBACK_BEST_SCORE_FILE: &str = "tui-snake-best.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub best_score_path: PathBuf,
    pub seed: Option<u32>,
    pub log_path: Option<PathBuf>,
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            best_score_path: PathBuf::from(FALLBACK_BEST_SCORE_FILE),
            seed: None,
            log_path: None,
            log_filter: "info".to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup (the process environment in production).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .and_then(|s| if s.is_empty() { None } else { Some(s) })
        };

        let best_score_path = non_empty("SNAKE_BEST_SCORE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| {
                default_best_score_path(non_empty("XDG_DATA_HOME"), non_empty("HOME"))
            });

        let seed = non_empty("SNAKE_SEED").and_then(|s| s.parse().ok());
        let log_path = non_empty("SNAKE_LOG_PATH").map(PathBuf::from);
        let log_filter = non_empty("SNAKE_LOG").unwrap_or_else(|| "info".to_string());

        Self {
            best_score_path,
            seed,
            log_path,
            log_filter,
        }
    }
}

fn default_best_score_path(xdg_data_home: Option<String>, home: Option<String>) -> PathBuf {
    let data_dir = xdg_data_home
        .map(PathBuf::from)
        .or_else(|| home.map(|h| PathBuf::from(h).join(".local").join("share")));

    match data_dir {
        Some(dir) => dir.join(APP_DIR).join(BEST_SCORE_FILE),
        None => PathBuf::from(FALLBACK_BEST_SCORE_FILE),
    }
}

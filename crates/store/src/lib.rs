//! Best-score persistence.
//!
//! The game persists exactly one number. Storage is best effort: callers are
//! expected to treat a failed read as "no recorded best score" and to ignore a
//! failed write (see [`load_or_default`] and [`save_or_warn`]).
//!
//! # File format
//!
//! ```text
//! {"best_score": 42}
//! ```
//!
//! A bare integer (`42`) is also accepted on read.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access best score file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("best score file {} is corrupt: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("best score storage is unavailable")]
    Unavailable,
}

/// Persistent home of the best score.
pub trait BestScoreStore {
    /// Read the stored value. `Ok(None)` means nothing has been recorded yet.
    fn load(&mut self) -> Result<Option<u32>, StoreError>;

    fn save(&mut self, best_score: u32) -> Result<(), StoreError>;
}

impl<S: BestScoreStore + ?Sized> BestScoreStore for Box<S> {
    fn load(&mut self) -> Result<Option<u32>, StoreError> {
        (**self).load()
    }

    fn save(&mut self, best_score: u32) -> Result<(), StoreError> {
        (**self).save(best_score)
    }
}

/// Load the best score, degrading to 0 on a missing, unreadable or corrupt store.
pub fn load_or_default<S: BestScoreStore + ?Sized>(store: &mut S) -> u32 {
    match store.load() {
        Ok(Some(v)) => v,
        Ok(None) => 0,
        Err(err) => {
            warn!(error = %err, "ignoring unreadable best score");
            0
        }
    }
}

/// Persist the best score; a failure is logged and otherwise ignored.
pub fn save_or_warn<S: BestScoreStore + ?Sized>(store: &mut S, best_score: u32) -> bool {
    match store.save(best_score) {
        Ok(()) => true,
        Err(err) => {
            warn!(error = %err, best_score, "failed to persist best score");
            false
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct BestScoreRecord {
    best_score: u32,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredValue {
    Record(BestScoreRecord),
    Bare(u32),
}

/// JSON file store.
///
/// Writes go to a sibling temp file first and are renamed into place, so a
/// crash mid-write leaves the previous value intact.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_err(&self, source: io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl BestScoreStore for JsonFileStore {
    fn load(&mut self) -> Result<Option<u32>, StoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(self.io_err(err)),
        };
        if content.trim().is_empty() {
            return Ok(None);
        }

        let value: StoredValue =
            serde_json::from_str(&content).map_err(|source| StoreError::Parse {
                path: self.path.clone(),
                source,
            })?;
        let best = match value {
            StoredValue::Record(r) => r.best_score,
            StoredValue::Bare(v) => v,
        };
        debug!(path = %self.path.display(), best, "loaded best score");
        Ok(Some(best))
    }

    fn save(&mut self, best_score: u32) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| self.io_err(e))?;
            }
        }

        let body = serde_json::to_string(&BestScoreRecord { best_score }).map_err(|source| {
            StoreError::Parse {
                path: self.path.clone(),
                source,
            }
        })?;

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        fs::write(&tmp, body).map_err(|e| self.io_err(e))?;
        fs::rename(&tmp, &self.path).map_err(|e| self.io_err(e))?;
        debug!(path = %self.path.display(), best_score, "saved best score");
        Ok(())
    }
}

/// In-process store. Handy for tests and for running without a data directory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    value: Option<u32>,
    saves: u32,
    fail_reads: bool,
    fail_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(value: u32) -> Self {
        Self {
            value: Some(value),
            ..Self::default()
        }
    }

    /// A store whose reads fail, as if the backing storage were unavailable.
    pub fn unreadable() -> Self {
        Self {
            fail_reads: true,
            ..Self::default()
        }
    }

    /// A store whose writes fail.
    pub fn read_only(value: Option<u32>) -> Self {
        Self {
            value,
            fail_writes: true,
            ..Self::default()
        }
    }

    pub fn value(&self) -> Option<u32> {
        self.value
    }

    /// Number of successful saves.
    pub fn saves(&self) -> u32 {
        self.saves
    }
}

impl BestScoreStore for MemoryStore {
    fn load(&mut self) -> Result<Option<u32>, StoreError> {
        if self.fail_reads {
            return Err(StoreError::Unavailable);
        }
        Ok(self.value)
    }

    fn save(&mut self, best_score: u32) -> Result<(), StoreError> {
        if self.fail_writes {
            return Err(StoreError::Unavailable);
        }
        self.value = Some(best_score);
        self.saves += 1;
        Ok(())
    }
}

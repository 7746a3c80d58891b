use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::DesignState;
use crate::store::DesignStore;
use crate::util::time;

const AUTOSAVE_PREFIX: &str = "autosave_";

/// Errors that can occur during design persistence operations
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Failed to serialize design: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Failed to write design: {0}")]
    WriteError(#[from] std::io::Error),

    #[error("Failed to read snapshot {name}: {reason}")]
    ReadError { name: String, reason: String },
}

/// Result type for persistence operations
pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// A serializable copy of a design, as written to disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignSnapshot {
    pub state: DesignState,
    /// Seconds since the UNIX epoch when the snapshot was taken
    pub timestamp: u64,
    /// Crate version that wrote the snapshot
    pub version: String,
}

impl DesignSnapshot {
    pub fn new(store: &DesignStore) -> Self {
        Self {
            state: store.snapshot(),
            timestamp: time::timestamp_secs(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Loads this snapshot into `store`, replacing its design and history
    pub fn restore(self, store: &mut DesignStore) {
        if self.version != env!("CARGO_PKG_VERSION") {
            log::warn!(
                "Snapshot version {} differs from current version {}",
                self.version,
                env!("CARGO_PKG_VERSION")
            );
        }
        store.replace_state(self.state);
    }
}

/// Saves and loads design snapshots as JSON files in one directory
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    dir: PathBuf,
    max_autosaves: usize,
    /// Minimum seconds between two autosaves
    autosave_interval: u64,
    last_autosave: u64,
}

impl SnapshotStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            max_autosaves: 5,
            autosave_interval: 300,
            last_autosave: 0,
        }
    }

    pub fn with_autosave(mut self, interval_secs: u64, max_autosaves: usize) -> Self {
        self.autosave_interval = interval_secs;
        self.max_autosaves = max_autosaves;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.json"))
    }

    pub fn save(&self, store: &DesignStore, name: &str) -> PersistenceResult<()> {
        fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_string_pretty(&DesignSnapshot::new(store))?;
        fs::write(self.path_for(name), json)?;
        log::info!("Saved design snapshot {name} to {}", self.dir.display());
        Ok(())
    }

    pub fn load(&self, name: &str) -> PersistenceResult<DesignSnapshot> {
        let json = fs::read_to_string(self.path_for(name)).map_err(|e| PersistenceError::ReadError {
            name: name.to_owned(),
            reason: e.to_string(),
        })?;
        let snapshot = serde_json::from_str(&json)?;
        log::info!("Loaded design snapshot {name}");
        Ok(snapshot)
    }

    /// Names of all snapshots in the directory, sorted
    pub fn list(&self) -> PersistenceResult<Vec<String>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }
        let mut names: Vec<String> = fs::read_dir(&self.dir)?
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "json") {
                    path.file_stem().map(|stem| stem.to_string_lossy().into_owned())
                } else {
                    None
                }
            })
            .collect();
        names.sort();
        Ok(names)
    }

    pub fn should_autosave(&self, now: u64) -> bool {
        now.saturating_sub(self.last_autosave) >= self.autosave_interval
    }

    /// Saves an autosave snapshot if the interval has elapsed. Returns whether
    /// a snapshot was written.
    pub fn try_autosave(&mut self, store: &DesignStore) -> PersistenceResult<bool> {
        let now = time::timestamp_secs();
        if !self.should_autosave(now) {
            return Ok(false);
        }
        self.save(store, &format!("{AUTOSAVE_PREFIX}{now}"))?;
        self.last_autosave = now;
        self.cleanup_old_autosaves()?;
        Ok(true)
    }

    fn autosaves(&self) -> PersistenceResult<Vec<(u64, String)>> {
        let mut autosaves: Vec<(u64, String)> = self
            .list()?
            .into_iter()
            .filter_map(|name| {
                let stamp = name.strip_prefix(AUTOSAVE_PREFIX)?.parse().ok()?;
                Some((stamp, name))
            })
            .collect();
        autosaves.sort();
        Ok(autosaves)
    }

    fn cleanup_old_autosaves(&self) -> PersistenceResult<()> {
        let autosaves = self.autosaves()?;
        let excess = autosaves.len().saturating_sub(self.max_autosaves);
        for (_, name) in autosaves.into_iter().take(excess) {
            fs::remove_file(self.path_for(&name))?;
        }
        Ok(())
    }

    /// Name of the most recent autosave, if any
    pub fn find_latest_autosave(&self) -> PersistenceResult<Option<String>> {
        Ok(self.autosaves()?.pop().map(|(_, name)| name))
    }
}

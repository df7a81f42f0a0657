//! Local timer persistence
//!
//! The technician app keeps one elapsed-time timer per job. Timers live on
//! the device, not the server; this store writes the whole [`TimerSet`] to a
//! JSON file so elapsed time survives app restarts.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use fieldline_core::timer::TimerSet;

use crate::error::{ClientError, Result};

/// File-backed store for a technician's job timers
#[derive(Debug, Clone)]
pub struct TimerStore {
    path: PathBuf,
}

impl TimerStore {
    /// Open the store at the platform data directory
    /// (e.g., `~/.local/share/fieldline/timers.json`)
    pub fn new() -> Result<Self> {
        let dir = dirs::data_dir()
            .ok_or_else(|| ClientError::StoreError("no data directory on this platform".into()))?;
        Ok(Self::at(dir.join("fieldline").join("timers.json")))
    }

    /// Open the store at an explicit path
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file backing this store
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the timer set; a missing file reads as an empty set
    pub fn load(&self) -> Result<TimerSet> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(TimerSet::new()),
            Err(e) => {
                return Err(ClientError::StoreError(format!(
                    "failed to read {}: {}",
                    self.path.display(),
                    e
                )));
            }
        };

        serde_json::from_str(&contents).map_err(|e| {
            ClientError::StoreError(format!("corrupt timer file {}: {}", self.path.display(), e))
        })
    }

    /// Write the timer set, creating parent directories as needed
    pub fn save(&self, timers: &TimerSet) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                ClientError::StoreError(format!(
                    "failed to create {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let contents = serde_json::to_string_pretty(timers)
            .map_err(|e| ClientError::StoreError(format!("failed to encode timers: {}", e)))?;

        fs::write(&self.path, contents).map_err(|e| {
            ClientError::StoreError(format!("failed to write {}: {}", self.path.display(), e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use uuid::Uuid;

    fn now() -> DateTime<Utc> {
        "2026-03-04T12:00:00Z".parse().unwrap()
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = TimerStore::at(dir.path().join("timers.json"));
        let job = Uuid::new_v4();

        let mut timers = TimerSet::new();
        timers.start(job, now());
        timers.pause(job, now() + chrono::Duration::seconds(90));

        store.save(&timers).unwrap();
        let loaded = store.load().unwrap();

        assert_eq!(loaded, timers);
        assert_eq!(loaded.elapsed_secs(job, now()), 90);
    }

    #[test]
    fn test_missing_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = TimerStore::at(dir.path().join("timers.json"));

        let loaded = store.load().unwrap();

        assert!(loaded.is_empty());
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("timers.json");
        fs::write(&path, "not json").unwrap();

        let store = TimerStore::at(path);

        assert!(matches!(store.load(), Err(ClientError::StoreError(_))));
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let store = TimerStore::at(dir.path().join("nested").join("deep").join("timers.json"));

        store.save(&TimerSet::new()).unwrap();

        assert!(store.path().exists());
    }
}

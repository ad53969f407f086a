use std::fs;
use std::path::PathBuf;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::ClientError;

/// Snapshot key for the mirrored task collection.
pub const TASKS_KEY: &str = "taskflow_tasks_backup";
/// Snapshot key for the mirrored category collection.
pub const CATEGORIES_KEY: &str = "taskflow_categories_backup";

/// Best-effort local mirror of the two collections, one JSON file per key.
/// Written after successful saves, read when a fetch fails.
#[derive(Clone)]
pub struct SnapshotCache {
    dir: PathBuf,
}

impl SnapshotCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory from `TASKFLOW_CACHE_DIR`, defaulting to `.taskflow`.
    pub fn from_env() -> Self {
        let dir = std::env::var("TASKFLOW_CACHE_DIR").unwrap_or_else(|_| ".taskflow".to_string());
        Self::new(dir)
    }

    /// Last snapshot under `key`, or `None` when it is missing or no
    /// longer parses. Staleness is acceptable; this is a fallback.
    pub fn read<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let bytes = fs::read(self.path(key)).ok()?;
        serde_json::from_slice(&bytes).ok()
    }

    pub fn write<T: Serialize>(&self, key: &str, value: &T) -> Result<(), ClientError> {
        fs::create_dir_all(&self.dir)?;
        let bytes = serde_json::to_vec(value)?;
        fs::write(self.path(key), bytes)?;
        Ok(())
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::category::Category;

    #[test]
    fn write_then_read_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let cache = SnapshotCache::new(dir.path());
        let cats = vec![Category::new("Work", "#3b82f6")];
        cache.write(CATEGORIES_KEY, &cats).unwrap();
        let back: Vec<Category> = cache.read(CATEGORIES_KEY).unwrap();
        assert_eq!(back, cats);
    }

    #[test]
    fn missing_snapshot_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let cache = SnapshotCache::new(dir.path());
        assert!(cache.read::<Vec<Category>>(TASKS_KEY).is_none());
    }

    #[test]
    fn corrupt_snapshot_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(format!("{TASKS_KEY}.json")), b"{oops").unwrap();
        let cache = SnapshotCache::new(dir.path());
        assert!(cache.read::<Vec<Category>>(TASKS_KEY).is_none());
    }
}

//! Persistence of the last submitted snapshot.
//!
//! The host remembers what the user submitted so the next time the page opens
//! the form shows those values rather than the schema defaults.  The snapshot
//! is stored as pretty-printed JSON, the same shape the watch receives.

use std::path::{Path, PathBuf};

use halfhalf_core::{SettingsSnapshot, SnapshotError};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error accessing snapshot at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("snapshot at {path} is not valid: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: SnapshotError,
    },
}

/// A JSON file holding one [`SettingsSnapshot`].
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the stored snapshot, or `None` if nothing has been saved yet.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] for file-system errors other than "not
    /// found", and [`StoreError::Json`] if the file is not a snapshot.
    pub fn load(&self) -> Result<Option<SettingsSnapshot>, StoreError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no saved snapshot");
                return Ok(None);
            }
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let snapshot = SettingsSnapshot::from_json(&content).map_err(|source| StoreError::Json {
            path: self.path.clone(),
            source,
        })?;
        debug!(path = %self.path.display(), values = snapshot.len(), "loaded saved snapshot");
        Ok(Some(snapshot))
    }

    /// Replaces the stored snapshot, creating the parent directory if needed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the file cannot be written.
    pub fn save(&self, snapshot: &SettingsSnapshot) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir).map_err(|source| StoreError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
        }

        let content = serde_json::to_string_pretty(snapshot).map_err(|e| StoreError::Json {
            path: self.path.clone(),
            source: e.into(),
        })?;
        std::fs::write(&self.path, content).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;

        info!(path = %self.path.display(), values = snapshot.len(), "snapshot saved");
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use halfhalf_core::{HexColor, MessageKey, SchemaVariant};

    fn temp_store(name: &str) -> (PathBuf, SnapshotStore) {
        let dir = std::env::temp_dir().join(format!("halfhalf_store_test_{}_{name}", std::process::id()));
        let store = SnapshotStore::new(dir.join("nested").join("settings.json"));
        (dir, store)
    }

    #[test]
    fn test_load_missing_file_is_none() {
        let store = SnapshotStore::new("/nonexistent/path/that/cannot/exist/settings.json");
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_save_then_load_returns_same_snapshot() {
        // Arrange
        let (dir, store) = temp_store("round_trip");
        let mut snapshot = SchemaVariant::HalfHalf.schema().defaults();
        snapshot.insert(MessageKey::PrimaryColor, HexColor::parse("000000").unwrap());
        snapshot.insert(MessageKey::ShowSeconds, false);

        // Act
        store.save(&snapshot).unwrap();
        let loaded = store.load().unwrap();

        // Assert
        assert_eq!(loaded, Some(snapshot));

        // Cleanup
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_saved_file_is_flat_json_object() {
        let (dir, store) = temp_store("flat");
        store.save(&SchemaVariant::HalfHalf.schema().defaults()).unwrap();

        let raw: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(store.path()).unwrap()).unwrap();

        assert_eq!(raw["SHOW_SECONDS"], true);
        assert_eq!(raw["SECONDARY_COLOR"], "007DCE");

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_load_rejects_malformed_file() {
        let (dir, store) = temp_store("malformed");
        std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        std::fs::write(store.path(), "{ not json").unwrap();

        let result = store.load();

        assert!(matches!(result, Err(StoreError::Json { .. })));
        std::fs::remove_dir_all(&dir).ok();
    }
}

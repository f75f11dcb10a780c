//! JSON snapshot persistence for the in-memory stores.
//!
//! The CLI host hydrates the memory stores from a snapshot file on start
//! and writes it back after mutating commands. The snapshot is a store
//! implementation detail; the hierarchy engine defines no persisted format.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::debug;

use workhub_core::error::{AppError, ErrorKind};
use workhub_core::result::AppResult;
use workhub_entity::item::Item;
use workhub_entity::stage::Stage;

/// The full flat state of the demo store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    /// All workflow stages.
    pub stages: Vec<Stage>,
    /// All items, nested ones included.
    pub items: Vec<Item>,
}

impl Snapshot {
    /// Build a snapshot from flat stage and item lists.
    pub fn new(stages: Vec<Stage>, items: Vec<Item>) -> Self {
        Self { stages, items }
    }

    /// Whether the snapshot holds no records at all.
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty() && self.items.is_empty()
    }

    /// Load a snapshot from a JSON file. A missing file yields an empty
    /// snapshot so first runs start clean.
    pub async fn load(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!(path = %path.display(), "No snapshot file, starting empty");
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to read snapshot: {}", path.display()),
                e,
            )
        })?;
        let snapshot: Self = serde_json::from_str(&raw)?;

        debug!(
            path = %path.display(),
            stages = snapshot.stages.len(),
            items = snapshot.items.len(),
            "Snapshot loaded"
        );
        Ok(snapshot)
    }

    /// Write the snapshot to a JSON file, creating parent directories.
    pub async fn save(&self, path: impl AsRef<Path>) -> AppResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await.map_err(|e| {
                    AppError::with_source(
                        ErrorKind::Storage,
                        format!("Failed to create snapshot directory: {}", parent.display()),
                        e,
                    )
                })?;
            }
        }

        let raw = serde_json::to_string_pretty(self)?;
        fs::write(path, raw).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to write snapshot: {}", path.display()),
                e,
            )
        })?;

        debug!(
            path = %path.display(),
            stages = self.stages.len(),
            items = self.items.len(),
            "Snapshot saved"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use workhub_core::types::StageId;
    use workhub_entity::item::NewItem;
    use workhub_entity::stage::NewStage;

    #[tokio::test]
    async fn test_save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/workhub.json");

        let stage = Stage::from_new(StageId::new(), NewStage::new("Open", "blue"), 0);
        let item = Item::from_new(
            workhub_core::types::ItemId::new(),
            NewItem::folder("Docs", stage.id, None),
        );
        let snapshot = Snapshot::new(vec![stage.clone()], vec![item.clone()]);

        snapshot.save(&path).await.unwrap();
        let loaded = Snapshot::load(&path).await.unwrap();

        assert_eq!(loaded.stages.len(), 1);
        assert_eq!(loaded.stages[0].id, stage.id);
        assert_eq!(loaded.items.len(), 1);
        assert_eq!(loaded.items[0].id, item.id);
    }

    #[tokio::test]
    async fn test_load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = Snapshot::load(dir.path().join("absent.json")).await.unwrap();
        assert!(loaded.is_empty());
    }

    #[tokio::test]
    async fn test_load_rejects_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        tokio::fs::write(&path, "{not json").await.unwrap();

        let err = Snapshot::load(&path).await.unwrap_err();
        assert!(err.is_kind(ErrorKind::Serialization));
    }
}

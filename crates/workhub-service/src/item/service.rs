//! Item CRUD, upload and move orchestration.

use std::sync::Arc;

use bytes::Bytes;
use tracing::{info, warn};

use workhub_core::error::AppError;
use workhub_core::result::AppResult;
use workhub_core::traits::FileStorage;
use workhub_core::types::{ItemId, StageId};
use workhub_entity::item::{Item, ItemFilter, NewItem};
use workhub_entity::stage::Stage;
use workhub_store::{ItemStore, StageSource};

use crate::hierarchy::{MoveTarget, plan_move, target_within_subtree};

/// A drop target by ID, as hosts hand it over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveTargetRef {
    /// Move to the root of a stage.
    Stage(StageId),
    /// Move into a stage sub-folder.
    SubFolder(ItemId),
}

/// Manages items: creation, upload, rename, move, lock and delete.
///
/// This service is the caller the hierarchy engine assigns its
/// obligations to: it resolves move targets and rejects subtree drops
/// before planning, and it refuses locked-folder deletes before the
/// store ever sees them.
#[derive(Debug, Clone)]
pub struct ItemService {
    /// Item store backend.
    items: Arc<dyn ItemStore>,
    /// Stage source backend.
    stages: Arc<dyn StageSource>,
    /// Blob storage for file payloads.
    storage: Arc<dyn FileStorage>,
}

impl ItemService {
    /// Creates a new item service.
    pub fn new(
        items: Arc<dyn ItemStore>,
        stages: Arc<dyn StageSource>,
        storage: Arc<dyn FileStorage>,
    ) -> Self {
        Self {
            items,
            stages,
            storage,
        }
    }

    /// Lists items matching a filter.
    pub async fn list_items(&self, filter: &ItemFilter) -> AppResult<Vec<Item>> {
        self.items.list_items(filter).await
    }

    /// Gets an item by ID.
    pub async fn get_item(&self, id: ItemId) -> AppResult<Item> {
        self.items
            .find_item(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Item {id} not found")))
    }

    /// Creates a plain folder under a stage root or an existing folder.
    pub async fn create_folder(
        &self,
        name: &str,
        stage_id: StageId,
        parent_id: Option<ItemId>,
    ) -> AppResult<Item> {
        self.require_stage(stage_id).await?;

        let folder = self
            .items
            .create_item(NewItem::folder(name, stage_id, parent_id))
            .await?;

        info!(item_id = %folder.id, name = %folder.name, stage_id = %stage_id, "Folder created");
        Ok(folder)
    }

    /// Creates a stage sub-folder.
    pub async fn create_sub_folder(&self, name: &str, stage_id: StageId) -> AppResult<Item> {
        self.require_stage(stage_id).await?;

        let sub_folder = self
            .items
            .create_item(NewItem::sub_folder(name, stage_id))
            .await?;

        info!(
            item_id = %sub_folder.id,
            name = %sub_folder.name,
            stage_id = %stage_id,
            "Stage sub-folder created"
        );
        Ok(sub_folder)
    }

    /// Creates a file entry without a stored payload.
    ///
    /// The entry carries no blob reference; `upload_file` is the path
    /// for files that bring their own bytes.
    pub async fn create_file(
        &self,
        name: &str,
        stage_id: StageId,
        parent_id: Option<ItemId>,
    ) -> AppResult<Item> {
        self.require_stage(stage_id).await?;

        let file = self
            .items
            .create_item(NewItem::file(name, stage_id, parent_id))
            .await?;

        info!(item_id = %file.id, name = %file.name, stage_id = %stage_id, "File entry created");
        Ok(file)
    }

    /// Stores a payload and creates the file item referencing it.
    ///
    /// If the item cannot be created after the payload was stored, the
    /// stored blob is removed again before the error propagates.
    pub async fn upload_file(
        &self,
        name: &str,
        stage_id: StageId,
        parent_id: Option<ItemId>,
        data: Bytes,
        mime_type: Option<&str>,
    ) -> AppResult<Item> {
        self.require_stage(stage_id).await?;

        let stored = self.storage.upload(name, data, mime_type).await?;
        let new = NewItem::file(name, stage_id, parent_id).with_storage(
            stored.url.clone(),
            stored.size_bytes,
            stored.mime_type.clone(),
        );

        let file = match self.items.create_item(new).await {
            Ok(file) => file,
            Err(err) => {
                if let Err(cleanup) = self.storage.remove(&stored.url).await {
                    warn!(url = %stored.url, error = %cleanup, "Failed to clean up orphaned blob");
                }
                return Err(err);
            }
        };

        info!(
            item_id = %file.id,
            name = %file.name,
            stage_id = %stage_id,
            size = stored.size_bytes,
            "File uploaded"
        );
        Ok(file)
    }

    /// Renames an item.
    pub async fn rename_item(&self, id: ItemId, name: &str) -> AppResult<Item> {
        let item = self.items.rename_item(id, name).await?;

        info!(item_id = %id, name = %item.name, "Item renamed");
        Ok(item)
    }

    /// Moves an item onto a stage or stage sub-folder target.
    ///
    /// Applies the caller obligations before planning: the target must
    /// exist, a sub-folder target must actually be a stage sub-folder,
    /// and the target must not lie inside the moved item's own subtree.
    pub async fn move_item(&self, item_id: ItemId, target: MoveTargetRef) -> AppResult<Item> {
        let item = self.get_item(item_id).await?;

        let plan = match target {
            MoveTargetRef::Stage(stage_id) => {
                let stage = self.require_stage(stage_id).await?;
                plan_move(&MoveTarget::Stage(&stage), &item)
            }
            MoveTargetRef::SubFolder(sub_folder_id) => {
                let sub_folder = self.get_item(sub_folder_id).await?;
                if !sub_folder.is_stage_sub_folder {
                    return Err(AppError::validation(
                        "Move target is not a stage sub-folder",
                    ));
                }

                let all = self.items.list_items(&ItemFilter::all()).await?;
                if target_within_subtree(&all, item_id, sub_folder_id) {
                    return Err(AppError::validation(
                        "Cannot move an item into its own subtree",
                    ));
                }

                plan_move(&MoveTarget::SubFolder(&sub_folder), &item)
            }
        };

        let moved = self
            .items
            .move_item(item_id, plan.stage_id, plan.parent_id)
            .await?;

        info!(
            item_id = %item_id,
            stage_id = %moved.stage_id,
            parent_id = ?moved.parent_id,
            "Item moved"
        );
        Ok(moved)
    }

    /// Deletes an item and its descendants, removing stored payloads.
    ///
    /// Locked folders are rejected here, before the store is called; the
    /// store refuses locked subtrees as a second line. Blob removal is
    /// best effort and never fails the delete.
    pub async fn delete_item(&self, id: ItemId) -> AppResult<Vec<Item>> {
        let item = self.get_item(id).await?;
        if item.is_folder() && item.is_locked {
            return Err(AppError::validation(format!(
                "Folder '{}' is locked and cannot be deleted",
                item.name
            )));
        }

        let removed = self.items.delete_item(id).await?;

        for gone in &removed {
            if let Some(url) = &gone.storage_url {
                if let Err(cleanup) = self.storage.remove(url).await {
                    warn!(url = %url, error = %cleanup, "Failed to remove blob of deleted file");
                }
            }
        }

        info!(
            item_id = %id,
            name = %item.name,
            descendants = removed.len() - 1,
            "Item deleted"
        );
        Ok(removed)
    }

    /// Locks or unlocks a folder against deletion.
    pub async fn set_locked(&self, id: ItemId, locked: bool) -> AppResult<Item> {
        let item = self.items.set_locked(id, locked).await?;

        info!(item_id = %id, locked, "Item lock changed");
        Ok(item)
    }

    async fn require_stage(&self, stage_id: StageId) -> AppResult<Stage> {
        self.stages
            .find_stage(stage_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Stage {stage_id} not found")))
    }
}

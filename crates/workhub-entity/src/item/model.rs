//! Item entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use workhub_core::types::{ItemId, StageId};

use super::kind::ItemKind;

/// A file or folder in the work-order hierarchy.
///
/// Items form an implicit tree through `parent_id`; every item, nested
/// ones included, carries the `stage_id` of its top-level ancestor.
/// Stage sub-folders are ordinary rootless folders distinguished only by
/// the `is_stage_sub_folder` flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    /// Unique item identifier.
    pub id: ItemId,
    /// Item name.
    pub name: String,
    /// Whether this is a file or a folder.
    pub kind: ItemKind,
    /// The workflow stage this item is affiliated with.
    pub stage_id: StageId,
    /// Parent folder ID (None for items at the root of their stage or
    /// stage sub-folder).
    pub parent_id: Option<ItemId>,
    /// True for folders that act as a second-level grouping directly
    /// under a stage.
    pub is_stage_sub_folder: bool,
    /// Payload size in bytes (files only).
    pub size_bytes: Option<i64>,
    /// MIME type of the payload (files only).
    pub mime_type: Option<String>,
    /// Opaque storage URL of the payload (files only).
    pub storage_url: Option<String>,
    /// Whether the folder is locked against deletion (folders only).
    pub is_locked: bool,
    /// When the item was created.
    pub created_at: DateTime<Utc>,
    /// When the item was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Item {
    /// Check if this item is a folder.
    pub fn is_folder(&self) -> bool {
        self.kind == ItemKind::Folder
    }

    /// Check if this item is a file.
    pub fn is_file(&self) -> bool {
        self.kind == ItemKind::File
    }

    /// Check if this item sits at the root of its stage (no parent).
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Case-insensitive substring match against a search query.
    /// An empty query matches everything.
    pub fn name_matches(&self, query: &str) -> bool {
        query.is_empty() || self.name.to_lowercase().contains(&query.to_lowercase())
    }

    /// Materialize an item record from creation data.
    pub fn from_new(id: ItemId, new: NewItem) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: new.name,
            kind: new.kind,
            stage_id: new.stage_id,
            parent_id: new.parent_id,
            is_stage_sub_folder: new.is_stage_sub_folder,
            size_bytes: new.size_bytes,
            mime_type: new.mime_type,
            storage_url: new.storage_url,
            is_locked: false,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Data required to create a new item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewItem {
    /// Item name.
    pub name: String,
    /// File or folder.
    pub kind: ItemKind,
    /// The stage the item belongs to.
    pub stage_id: StageId,
    /// Parent folder (None for root-level).
    pub parent_id: Option<ItemId>,
    /// Whether the folder acts as a stage sub-folder.
    pub is_stage_sub_folder: bool,
    /// Payload size in bytes (files only).
    pub size_bytes: Option<i64>,
    /// MIME type (files only).
    pub mime_type: Option<String>,
    /// Storage URL of the payload (files only).
    pub storage_url: Option<String>,
}

impl NewItem {
    /// Creation data for a plain folder.
    pub fn folder(name: impl Into<String>, stage_id: StageId, parent_id: Option<ItemId>) -> Self {
        Self {
            name: name.into(),
            kind: ItemKind::Folder,
            stage_id,
            parent_id,
            is_stage_sub_folder: false,
            size_bytes: None,
            mime_type: None,
            storage_url: None,
        }
    }

    /// Creation data for a stage sub-folder (rootless by definition).
    pub fn sub_folder(name: impl Into<String>, stage_id: StageId) -> Self {
        Self {
            name: name.into(),
            kind: ItemKind::Folder,
            stage_id,
            parent_id: None,
            is_stage_sub_folder: true,
            size_bytes: None,
            mime_type: None,
            storage_url: None,
        }
    }

    /// Creation data for a file.
    pub fn file(name: impl Into<String>, stage_id: StageId, parent_id: Option<ItemId>) -> Self {
        Self {
            name: name.into(),
            kind: ItemKind::File,
            stage_id,
            parent_id,
            is_stage_sub_folder: false,
            size_bytes: None,
            mime_type: None,
            storage_url: None,
        }
    }

    /// Attach storage metadata from an upload.
    pub fn with_storage(
        mut self,
        url: impl Into<String>,
        size_bytes: i64,
        mime_type: Option<String>,
    ) -> Self {
        self.storage_url = Some(url.into());
        self.size_bytes = Some(size_bytes);
        self.mime_type = mime_type;
        self
    }
}

//! Item store trait for pluggable item backends.

use async_trait::async_trait;

use workhub_core::result::AppResult;
use workhub_core::types::{ItemId, StageId};
use workhub_entity::item::{Item, ItemFilter, NewItem};

/// Trait for backends holding the flat item records.
///
/// The store enforces the structural invariants of the item tree: names
/// are non-empty, parents are folders in the same stage, files are never
/// stage sub-folders, and stage sub-folders stay rootless. Cycle
/// prevention for moves is split with the caller: the store refuses the
/// trivial self-parent case, the service rejects deeper subtree targets
/// before calling in.
#[async_trait]
pub trait ItemStore: Send + Sync + std::fmt::Debug + 'static {
    /// List items matching a filter.
    async fn list_items(&self, filter: &ItemFilter) -> AppResult<Vec<Item>>;

    /// Find an item by ID. Returns `None` if the item does not exist.
    async fn find_item(&self, id: ItemId) -> AppResult<Option<Item>>;

    /// Create an item after validating the structural invariants.
    async fn create_item(&self, new: NewItem) -> AppResult<Item>;

    /// Rename an item.
    async fn rename_item(&self, id: ItemId, name: &str) -> AppResult<Item>;

    /// Reassign an item to a stage and parent. Descendants are restamped
    /// with the new stage so every item keeps carrying the stage of its
    /// top-level ancestor.
    async fn move_item(
        &self,
        id: ItemId,
        stage_id: StageId,
        parent_id: Option<ItemId>,
    ) -> AppResult<Item>;

    /// Set the lock flag on a folder.
    async fn set_locked(&self, id: ItemId, locked: bool) -> AppResult<Item>;

    /// Delete an item and its descendants. Refuses when the item or any
    /// folder inside its subtree is locked. Returns the removed items,
    /// the deleted item first.
    async fn delete_item(&self, id: ItemId) -> AppResult<Vec<Item>>;
}

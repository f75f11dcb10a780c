//! In-memory item store.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use tracing::debug;

use workhub_core::error::AppError;
use workhub_core::events::{EventBus, EventPayload, ItemEvent};
use workhub_core::result::AppResult;
use workhub_core::types::{ItemId, StageId};
use workhub_entity::item::{Item, ItemFilter, ItemKind, NewItem};

use crate::item_store::ItemStore;

/// In-memory item store backed by dashmap.
///
/// Clones share the same underlying map and event bus.
#[derive(Debug, Clone)]
pub struct MemoryItemStore {
    /// The item records by ID.
    items: Arc<DashMap<ItemId, Item>>,
    /// Bus receiving an event per successful mutation.
    events: EventBus,
}

impl MemoryItemStore {
    /// Create an empty store.
    pub fn new(events: EventBus) -> Self {
        Self {
            items: Arc::new(DashMap::new()),
            events,
        }
    }

    /// Create a store seeded with existing items.
    pub fn with_items(events: EventBus, items: Vec<Item>) -> Self {
        let store = Self::new(events);
        for item in items {
            store.items.insert(item.id, item);
        }
        store
    }

    fn require(&self, id: ItemId) -> AppResult<Item> {
        self.items
            .get(&id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| AppError::not_found(format!("Item {id} not found")))
    }

    fn validate_parent(&self, parent_id: ItemId, stage_id: StageId) -> AppResult<()> {
        let parent = self
            .items
            .get(&parent_id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| AppError::not_found(format!("Parent folder {parent_id} not found")))?;

        if !parent.is_folder() {
            return Err(AppError::validation("Parent must be a folder"));
        }
        if parent.stage_id != stage_id {
            return Err(AppError::validation(
                "Parent folder belongs to a different stage",
            ));
        }
        Ok(())
    }

    /// IDs of all transitive descendants of an item, the item excluded.
    /// Tolerates malformed parent links in hand-edited snapshots.
    fn descendant_ids(&self, root: ItemId) -> Vec<ItemId> {
        let mut children: HashMap<ItemId, Vec<ItemId>> = HashMap::new();
        for entry in self.items.iter() {
            if let Some(parent_id) = entry.value().parent_id {
                children.entry(parent_id).or_default().push(entry.value().id);
            }
        }

        let mut seen: HashSet<ItemId> = HashSet::new();
        let mut result = Vec::new();
        let mut frontier = vec![root];
        while let Some(next) = frontier.pop() {
            if let Some(kids) = children.get(&next) {
                for id in kids {
                    if *id != root && seen.insert(*id) {
                        result.push(*id);
                        frontier.push(*id);
                    }
                }
            }
        }
        result
    }
}

#[async_trait]
impl ItemStore for MemoryItemStore {
    async fn list_items(&self, filter: &ItemFilter) -> AppResult<Vec<Item>> {
        let mut items: Vec<Item> = self
            .items
            .iter()
            .map(|entry| entry.value().clone())
            .filter(|item| filter.matches(item))
            .collect();
        items.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.id.as_uuid().cmp(b.id.as_uuid()))
        });
        Ok(items)
    }

    async fn find_item(&self, id: ItemId) -> AppResult<Option<Item>> {
        Ok(self.items.get(&id).map(|entry| entry.value().clone()))
    }

    async fn create_item(&self, new: NewItem) -> AppResult<Item> {
        if new.name.trim().is_empty() {
            return Err(AppError::validation("Item name cannot be empty"));
        }
        if new.is_stage_sub_folder && new.kind == ItemKind::File {
            return Err(AppError::validation("A file cannot be a stage sub-folder"));
        }
        if new.is_stage_sub_folder && new.parent_id.is_some() {
            return Err(AppError::validation("A stage sub-folder cannot be nested"));
        }
        if let Some(parent_id) = new.parent_id {
            self.validate_parent(parent_id, new.stage_id)?;
        }

        let item = Item::from_new(ItemId::new(), new);
        self.items.insert(item.id, item.clone());

        debug!(item_id = %item.id, name = %item.name, kind = %item.kind, "Item created");
        self.events.publish(EventPayload::Item(ItemEvent::Created {
            item_id: item.id,
            name: item.name.clone(),
            stage_id: item.stage_id,
            parent_id: item.parent_id,
        }));

        Ok(item)
    }

    async fn rename_item(&self, id: ItemId, name: &str) -> AppResult<Item> {
        if name.trim().is_empty() {
            return Err(AppError::validation("Item name cannot be empty"));
        }

        let mut entry = self
            .items
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("Item {id} not found")))?;
        let item = entry.value_mut();
        item.name = name.to_string();
        item.updated_at = Utc::now();
        let renamed = item.clone();
        drop(entry);

        debug!(item_id = %id, name, "Item renamed");
        self.events.publish(EventPayload::Item(ItemEvent::Renamed {
            item_id: id,
            name: renamed.name.clone(),
        }));

        Ok(renamed)
    }

    async fn move_item(
        &self,
        id: ItemId,
        stage_id: StageId,
        parent_id: Option<ItemId>,
    ) -> AppResult<Item> {
        let item = self.require(id)?;

        if parent_id == Some(id) {
            return Err(AppError::validation("Cannot move an item into itself"));
        }
        if let Some(parent_id) = parent_id {
            if item.is_stage_sub_folder {
                return Err(AppError::validation("A stage sub-folder cannot be nested"));
            }
            self.validate_parent(parent_id, stage_id)?;
        }

        // Descendants keep carrying the stage of their top-level ancestor.
        let restamp = if item.stage_id != stage_id {
            self.descendant_ids(id)
        } else {
            Vec::new()
        };

        let now = Utc::now();
        let moved = {
            let mut entry = self
                .items
                .get_mut(&id)
                .ok_or_else(|| AppError::not_found(format!("Item {id} not found")))?;
            let item = entry.value_mut();
            item.stage_id = stage_id;
            item.parent_id = parent_id;
            item.updated_at = now;
            item.clone()
        };

        for descendant_id in &restamp {
            if let Some(mut entry) = self.items.get_mut(descendant_id) {
                let descendant = entry.value_mut();
                descendant.stage_id = stage_id;
                descendant.updated_at = now;
            }
        }

        debug!(
            item_id = %id,
            stage_id = %stage_id,
            parent_id = ?parent_id,
            restamped = restamp.len(),
            "Item moved"
        );
        self.events.publish(EventPayload::Item(ItemEvent::Moved {
            item_id: id,
            stage_id,
            parent_id,
        }));

        Ok(moved)
    }

    async fn set_locked(&self, id: ItemId, locked: bool) -> AppResult<Item> {
        let item = self.require(id)?;
        if !item.is_folder() {
            return Err(AppError::validation("Only folders can be locked"));
        }

        let mut entry = self
            .items
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("Item {id} not found")))?;
        let item = entry.value_mut();
        item.is_locked = locked;
        item.updated_at = Utc::now();
        let updated = item.clone();
        drop(entry);

        debug!(item_id = %id, locked, "Item lock changed");
        self.events
            .publish(EventPayload::Item(ItemEvent::LockChanged {
                item_id: id,
                is_locked: locked,
            }));

        Ok(updated)
    }

    async fn delete_item(&self, id: ItemId) -> AppResult<Vec<Item>> {
        let target = self.require(id)?;

        let mut subtree = vec![target.clone()];
        for descendant_id in self.descendant_ids(id) {
            if let Some(entry) = self.items.get(&descendant_id) {
                subtree.push(entry.value().clone());
            }
        }

        if let Some(locked) = subtree
            .iter()
            .find(|item| item.is_folder() && item.is_locked)
        {
            return Err(AppError::validation(format!(
                "Folder '{}' is locked and cannot be deleted",
                locked.name
            )));
        }

        for item in &subtree {
            self.items.remove(&item.id);
        }

        let descendants_removed = subtree.len() - 1;
        debug!(
            item_id = %id,
            name = %target.name,
            descendants_removed,
            "Item deleted"
        );
        self.events.publish(EventPayload::Item(ItemEvent::Deleted {
            item_id: id,
            name: target.name.clone(),
            descendants_removed,
        }));

        Ok(subtree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use workhub_core::error::ErrorKind;

    fn make_store() -> MemoryItemStore {
        MemoryItemStore::new(EventBus::new())
    }

    #[tokio::test]
    async fn test_create_rejects_blank_name() {
        let store = make_store();
        let err = store
            .create_item(NewItem::folder("  ", StageId::new(), None))
            .await
            .unwrap_err();
        assert!(err.is_kind(ErrorKind::Validation));
    }

    #[tokio::test]
    async fn test_create_rejects_missing_parent() {
        let store = make_store();
        let err = store
            .create_item(NewItem::file("a.pdf", StageId::new(), Some(ItemId::new())))
            .await
            .unwrap_err();
        assert!(err.is_kind(ErrorKind::NotFound));
    }

    #[tokio::test]
    async fn test_create_rejects_parent_in_other_stage() {
        let store = make_store();
        let stage_a = StageId::new();
        let stage_b = StageId::new();
        let folder = store
            .create_item(NewItem::folder("Docs", stage_a, None))
            .await
            .unwrap();

        let err = store
            .create_item(NewItem::file("a.pdf", stage_b, Some(folder.id)))
            .await
            .unwrap_err();
        assert!(err.is_kind(ErrorKind::Validation));
    }

    #[tokio::test]
    async fn test_create_rejects_file_parent() {
        let store = make_store();
        let stage = StageId::new();
        let file = store
            .create_item(NewItem::file("a.pdf", stage, None))
            .await
            .unwrap();

        let err = store
            .create_item(NewItem::file("b.pdf", stage, Some(file.id)))
            .await
            .unwrap_err();
        assert!(err.is_kind(ErrorKind::Validation));
    }

    #[tokio::test]
    async fn test_create_rejects_nested_sub_folder() {
        let store = make_store();
        let stage = StageId::new();
        let folder = store
            .create_item(NewItem::folder("Docs", stage, None))
            .await
            .unwrap();

        let mut new = NewItem::sub_folder("Urgent", stage);
        new.parent_id = Some(folder.id);
        let err = store.create_item(new).await.unwrap_err();
        assert!(err.is_kind(ErrorKind::Validation));
    }

    #[tokio::test]
    async fn test_move_restamps_descendant_stages() {
        let store = make_store();
        let stage_a = StageId::new();
        let stage_b = StageId::new();
        let folder = store
            .create_item(NewItem::folder("Docs", stage_a, None))
            .await
            .unwrap();
        let nested = store
            .create_item(NewItem::folder("Inner", stage_a, Some(folder.id)))
            .await
            .unwrap();
        let file = store
            .create_item(NewItem::file("a.pdf", stage_a, Some(nested.id)))
            .await
            .unwrap();

        store.move_item(folder.id, stage_b, None).await.unwrap();

        let nested = store.find_item(nested.id).await.unwrap().unwrap();
        let file = store.find_item(file.id).await.unwrap().unwrap();
        assert_eq!(nested.stage_id, stage_b);
        assert_eq!(file.stage_id, stage_b);
        assert_eq!(nested.parent_id, Some(folder.id));
    }

    #[tokio::test]
    async fn test_move_rejects_self_parent() {
        let store = make_store();
        let stage = StageId::new();
        let folder = store
            .create_item(NewItem::folder("Docs", stage, None))
            .await
            .unwrap();

        let err = store
            .move_item(folder.id, stage, Some(folder.id))
            .await
            .unwrap_err();
        assert!(err.is_kind(ErrorKind::Validation));
    }

    #[tokio::test]
    async fn test_delete_cascades_to_descendants() {
        let store = make_store();
        let stage = StageId::new();
        let folder = store
            .create_item(NewItem::folder("Docs", stage, None))
            .await
            .unwrap();
        let nested = store
            .create_item(NewItem::folder("Inner", stage, Some(folder.id)))
            .await
            .unwrap();
        let file = store
            .create_item(NewItem::file("a.pdf", stage, Some(nested.id)))
            .await
            .unwrap();

        let removed = store.delete_item(folder.id).await.unwrap();
        assert_eq!(removed.len(), 3);
        assert_eq!(removed[0].id, folder.id);
        assert!(store.find_item(nested.id).await.unwrap().is_none());
        assert!(store.find_item(file.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_refuses_locked_folder() {
        let store = make_store();
        let stage = StageId::new();
        let folder = store
            .create_item(NewItem::folder("Docs", stage, None))
            .await
            .unwrap();
        store.set_locked(folder.id, true).await.unwrap();

        let err = store.delete_item(folder.id).await.unwrap_err();
        assert!(err.is_kind(ErrorKind::Validation));
        assert!(store.find_item(folder.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_delete_refuses_locked_folder_inside_subtree() {
        let store = make_store();
        let stage = StageId::new();
        let folder = store
            .create_item(NewItem::folder("Docs", stage, None))
            .await
            .unwrap();
        let nested = store
            .create_item(NewItem::folder("Inner", stage, Some(folder.id)))
            .await
            .unwrap();
        store.set_locked(nested.id, true).await.unwrap();

        let err = store.delete_item(folder.id).await.unwrap_err();
        assert!(err.is_kind(ErrorKind::Validation));
        assert!(store.find_item(folder.id).await.unwrap().is_some());
        assert!(store.find_item(nested.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_set_locked_rejects_files() {
        let store = make_store();
        let file = store
            .create_item(NewItem::file("a.pdf", StageId::new(), None))
            .await
            .unwrap();

        let err = store.set_locked(file.id, true).await.unwrap_err();
        assert!(err.is_kind(ErrorKind::Validation));
    }

    #[tokio::test]
    async fn test_list_items_applies_filter() {
        let store = make_store();
        let stage_a = StageId::new();
        let stage_b = StageId::new();
        store
            .create_item(NewItem::folder("Docs", stage_a, None))
            .await
            .unwrap();
        store
            .create_item(NewItem::file("report.pdf", stage_a, None))
            .await
            .unwrap();
        store
            .create_item(NewItem::file("other.pdf", stage_b, None))
            .await
            .unwrap();

        let in_stage = store
            .list_items(&ItemFilter::all().with_stage(stage_a))
            .await
            .unwrap();
        assert_eq!(in_stage.len(), 2);

        let files = store
            .list_items(&ItemFilter::all().with_kind(ItemKind::File))
            .await
            .unwrap();
        assert_eq!(files.len(), 2);

        let named = store
            .list_items(&ItemFilter::all().with_name_contains("REPORT"))
            .await
            .unwrap();
        assert_eq!(named.len(), 1);
        assert_eq!(named[0].name, "report.pdf");
    }

    #[tokio::test]
    async fn test_mutations_emit_events() {
        let bus = EventBus::new();
        let store = MemoryItemStore::new(bus.clone());
        let mut rx = bus.subscribe();

        let folder = store
            .create_item(NewItem::folder("Docs", StageId::new(), None))
            .await
            .unwrap();
        store.rename_item(folder.id, "Documents").await.unwrap();
        store.delete_item(folder.id).await.unwrap();

        let created = rx.try_recv().expect("created event");
        assert!(matches!(
            created.payload,
            EventPayload::Item(ItemEvent::Created { .. })
        ));
        let renamed = rx.try_recv().expect("renamed event");
        assert!(matches!(
            renamed.payload,
            EventPayload::Item(ItemEvent::Renamed { .. })
        ));
        let deleted = rx.try_recv().expect("deleted event");
        assert!(matches!(
            deleted.payload,
            EventPayload::Item(ItemEvent::Deleted { descendants_removed: 0, .. })
        ));
    }
}

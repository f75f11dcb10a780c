//! Virtual folder view model.

use serde::{Deserialize, Serialize};

use workhub_core::types::{ItemId, StageId};

use crate::item::Item;

/// An item annotated with the path of the folder that contains it.
///
/// The path is relative to the stage root: items sitting directly under a
/// stage carry the stage name, items under a stage sub-folder carry
/// `"<stage>/<sub-folder>"`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolderItem {
    /// The underlying item record.
    pub item: Item,
    /// Human-readable location of the item's parent container.
    pub folder_path: String,
}

impl FolderItem {
    /// Annotate an item with its containing folder path.
    pub fn new(item: Item, folder_path: impl Into<String>) -> Self {
        Self {
            item,
            folder_path: folder_path.into(),
        }
    }
}

/// One top-level branch of the virtual hierarchy, derived from a stage.
///
/// Virtual folders are ephemeral: they are rebuilt from the flat stage and
/// item lists whenever either changes and are never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VirtualFolder {
    /// The stage this branch was derived from.
    pub stage_id: StageId,
    /// Stage name, used as the branch display name.
    pub name: String,
    /// Stage color tag, carried through for presentation.
    pub color_tag: String,
    /// Path of the branch root, currently just the stage name.
    pub display_path: String,
    /// Every item assigned to the stage, annotated with folder paths.
    pub items: Vec<FolderItem>,
}

impl VirtualFolder {
    /// Number of items in this branch, sub-folders included.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Stage sub-folders contained in this branch.
    pub fn stage_sub_folders(&self) -> impl Iterator<Item = &Item> {
        self.items
            .iter()
            .map(|entry| &entry.item)
            .filter(|item| item.is_stage_sub_folder)
    }

    /// Look up an item in this branch by id.
    pub fn find_item(&self, id: ItemId) -> Option<&FolderItem> {
        self.items.iter().find(|entry| entry.item.id == id)
    }

    /// Whether the branch holds an item with the given id.
    pub fn contains_item(&self, id: ItemId) -> bool {
        self.find_item(id).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{ItemKind, NewItem};

    fn item(stage_id: StageId, name: &str, kind: ItemKind, sub_folder: bool) -> Item {
        let new = match kind {
            ItemKind::Folder if sub_folder => NewItem::sub_folder(name, stage_id),
            ItemKind::Folder => NewItem::folder(name, stage_id, None),
            ItemKind::File => NewItem::file(name, stage_id, None),
        };
        Item::from_new(ItemId::new(), new)
    }

    #[test]
    fn test_stage_sub_folders_filters_markers() {
        let stage_id = StageId::new();
        let folder = VirtualFolder {
            stage_id,
            name: "Open".to_string(),
            color_tag: "blue".to_string(),
            display_path: "Open".to_string(),
            items: vec![
                FolderItem::new(item(stage_id, "Urgent", ItemKind::Folder, true), "Open"),
                FolderItem::new(item(stage_id, "report.pdf", ItemKind::File, false), "Open"),
                FolderItem::new(item(stage_id, "Drafts", ItemKind::Folder, false), "Open"),
            ],
        };

        let subs: Vec<_> = folder.stage_sub_folders().collect();
        assert_eq!(subs.len(), 1);
        assert_eq!(subs[0].name, "Urgent");
        assert_eq!(folder.item_count(), 3);
    }

    #[test]
    fn test_find_item_by_id() {
        let stage_id = StageId::new();
        let target = item(stage_id, "invoice.pdf", ItemKind::File, false);
        let target_id = target.id;
        let folder = VirtualFolder {
            stage_id,
            name: "Invoiced".to_string(),
            color_tag: "green".to_string(),
            display_path: "Invoiced".to_string(),
            items: vec![FolderItem::new(target, "Invoiced")],
        };

        assert!(folder.contains_item(target_id));
        assert!(folder.find_item(ItemId::new()).is_none());
    }
}

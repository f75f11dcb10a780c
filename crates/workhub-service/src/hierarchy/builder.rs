//! Virtual folder derivation from flat stage and item snapshots.

use std::collections::HashMap;

use workhub_core::types::ItemId;
use workhub_entity::hierarchy::{FolderItem, VirtualFolder};
use workhub_entity::item::Item;
use workhub_entity::stage::Stage;

/// Derive the virtual hierarchy from flat snapshots.
///
/// One virtual folder per stage, ordered by `order_position` (stable on
/// ties). Each folder carries every item of its stage, nested descendants
/// included, after applying the search query: a non-empty query keeps only
/// items whose name contains it case-insensitively, and that filtered list
/// is the single source for badges, sub-folder sidebars and navigation
/// alike.
///
/// An empty stage slice yields an empty result, so hosts render nothing
/// rather than an empty hierarchy while stages are still loading. Items
/// whose stage no longer exists are silently left out.
pub fn build_virtual_folders(
    stages: &[Stage],
    items: &[Item],
    search: &str,
) -> Vec<VirtualFolder> {
    if stages.is_empty() {
        return Vec::new();
    }

    let mut ordered: Vec<&Stage> = stages.iter().collect();
    ordered.sort_by_key(|stage| stage.order_position);

    // Parent names resolve against the unfiltered slice so an item keeps
    // its folder path even when the search drops the parent itself.
    let by_id: HashMap<ItemId, &Item> = items.iter().map(|item| (item.id, item)).collect();

    ordered
        .into_iter()
        .map(|stage| {
            let folder_items: Vec<FolderItem> = items
                .iter()
                .filter(|item| item.stage_id == stage.id)
                .filter(|item| item.name_matches(search))
                .map(|item| FolderItem::new(item.clone(), folder_path(stage, item, &by_id)))
                .collect();

            VirtualFolder {
                stage_id: stage.id,
                name: stage.name.clone(),
                color_tag: stage.color_tag.clone(),
                display_path: stage.name.clone(),
                items: folder_items,
            }
        })
        .collect()
}

/// The display path of the folder containing `item`.
///
/// Children of a stage sub-folder live at `"<stage>/<sub-folder>"`;
/// everything else, the sub-folders themselves included, lives at the
/// stage root.
fn folder_path(stage: &Stage, item: &Item, by_id: &HashMap<ItemId, &Item>) -> String {
    if item.is_stage_sub_folder {
        return stage.name.clone();
    }
    if let Some(parent) = item.parent_id.and_then(|id| by_id.get(&id)) {
        if parent.is_stage_sub_folder {
            return format!("{}/{}", stage.name, parent.name);
        }
    }
    stage.name.clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use workhub_core::types::StageId;
    use workhub_entity::item::NewItem;
    use workhub_entity::stage::NewStage;

    fn stage(name: &str, position: i32) -> Stage {
        Stage::from_new(StageId::new(), NewStage::new(name, "blue"), position)
    }

    fn folder(name: &str, stage_id: StageId, parent: Option<ItemId>) -> Item {
        Item::from_new(ItemId::new(), NewItem::folder(name, stage_id, parent))
    }

    fn sub_folder(name: &str, stage_id: StageId) -> Item {
        Item::from_new(ItemId::new(), NewItem::sub_folder(name, stage_id))
    }

    fn file(name: &str, stage_id: StageId, parent: Option<ItemId>) -> Item {
        Item::from_new(ItemId::new(), NewItem::file(name, stage_id, parent))
    }

    #[test]
    fn test_empty_stages_yield_empty_hierarchy() {
        let items = vec![file("a.pdf", StageId::new(), None)];
        assert!(build_virtual_folders(&[], &items, "").is_empty());
    }

    #[test]
    fn test_one_folder_per_stage_ordered_by_position() {
        let done = stage("Done", 2);
        let open = stage("Open", 0);
        let doing = stage("Doing", 1);

        let folders = build_virtual_folders(&[done.clone(), open, doing], &[], "");
        let names: Vec<&str> = folders.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["Open", "Doing", "Done"]);
        assert_eq!(folders[2].stage_id, done.id);
        assert_eq!(folders[0].display_path, "Open");
    }

    #[test]
    fn test_items_partitioned_by_stage_including_descendants() {
        let open = stage("Open", 0);
        let done = stage("Done", 1);
        let docs = folder("Docs", open.id, None);
        let nested = file("deep.pdf", open.id, Some(docs.id));
        let other = file("done.pdf", done.id, None);

        let folders = build_virtual_folders(
            &[open.clone(), done.clone()],
            &[docs, nested, other],
            "",
        );
        assert_eq!(folders[0].item_count(), 2);
        assert_eq!(folders[1].item_count(), 1);
        assert!(folders[0].items.iter().all(|e| e.item.stage_id == open.id));
    }

    #[test]
    fn test_orphaned_items_are_excluded() {
        let open = stage("Open", 0);
        let orphan = file("lost.pdf", StageId::new(), None);
        let kept = file("kept.pdf", open.id, None);

        let folders = build_virtual_folders(&[open], &[orphan, kept], "");
        assert_eq!(folders.len(), 1);
        assert_eq!(folders[0].item_count(), 1);
        assert_eq!(folders[0].items[0].item.name, "kept.pdf");
    }

    #[test]
    fn test_search_filters_every_derived_list() {
        let open = stage("Open", 0);
        let urgent = sub_folder("Urgent", open.id);
        let report = file("Report.pdf", open.id, None);
        let notes = file("notes.txt", open.id, None);

        let folders = build_virtual_folders(&[open], &[urgent, report, notes], "rep");
        assert_eq!(folders[0].item_count(), 1);
        assert_eq!(folders[0].items[0].item.name, "Report.pdf");
        assert_eq!(folders[0].stage_sub_folders().count(), 0);
    }

    #[test]
    fn test_search_keeps_matching_sub_folders() {
        let open = stage("Open", 0);
        let urgent = sub_folder("Urgent", open.id);
        let other = sub_folder("Later", open.id);

        let folders = build_virtual_folders(&[open], &[urgent, other], "urg");
        let subs: Vec<_> = folders[0].stage_sub_folders().collect();
        assert_eq!(subs.len(), 1);
        assert_eq!(subs[0].name, "Urgent");
    }

    #[test]
    fn test_folder_path_annotations() {
        let open = stage("Open", 0);
        let urgent = sub_folder("Urgent", open.id);
        let in_sub = file("a.pdf", open.id, Some(urgent.id));
        let plain = folder("Docs", open.id, None);
        let in_plain = file("b.pdf", open.id, Some(plain.id));
        let at_root = file("c.pdf", open.id, None);

        let folders = build_virtual_folders(
            &[open],
            &[urgent.clone(), in_sub.clone(), plain, in_plain.clone(), at_root],
            "",
        );
        let view = &folders[0];

        assert_eq!(view.find_item(urgent.id).unwrap().folder_path, "Open");
        assert_eq!(view.find_item(in_sub.id).unwrap().folder_path, "Open/Urgent");
        assert_eq!(view.find_item(in_plain.id).unwrap().folder_path, "Open");
    }

    #[test]
    fn test_folder_path_survives_filtered_parent() {
        let open = stage("Open", 0);
        let urgent = sub_folder("Urgent", open.id);
        let in_sub = file("report.pdf", open.id, Some(urgent.id));

        // The query drops the sub-folder but keeps its child.
        let folders = build_virtual_folders(&[open], &[urgent, in_sub.clone()], "report");
        let view = &folders[0];

        assert_eq!(view.item_count(), 1);
        assert_eq!(view.find_item(in_sub.id).unwrap().folder_path, "Open/Urgent");
    }
}

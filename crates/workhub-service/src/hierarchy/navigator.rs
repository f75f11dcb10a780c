//! Cursor resolution against the derived hierarchy.

use workhub_entity::hierarchy::{Breadcrumb, CursorTarget, NavigationCursor, VirtualFolder};
use workhub_entity::item::Item;

/// The items listed at the cursor's current position.
///
/// Resolution is graceful end to end: an unselected cursor, a stage that
/// no longer exists, or a trail pointing at deleted folders all yield an
/// empty list, never an error. Hosts recover from stale cursors by
/// resetting to the branch root.
pub fn current_contents<'a>(
    folders: &'a [VirtualFolder],
    cursor: &NavigationCursor,
) -> Vec<&'a Item> {
    let Some(folder) = resolve_branch(folders, cursor) else {
        return Vec::new();
    };

    match cursor.current_parent() {
        Some(parent_id) => folder
            .items
            .iter()
            .map(|entry| &entry.item)
            .filter(|item| item.parent_id == Some(parent_id))
            .collect(),
        // Plain stage root: rootless items, sub-folders excluded (those
        // are presented in the sidebar, not as folder contents).
        None => folder
            .items
            .iter()
            .map(|entry| &entry.item)
            .filter(|item| item.is_root() && !item.is_stage_sub_folder)
            .collect(),
    }
}

/// The breadcrumb trail for the cursor's current position.
///
/// The first crumb is always the stage; in sub-folder mode the sub-folder
/// follows; then one crumb per descended folder. Each crumb carries the
/// cursor to restore when activated. Trail entries that no longer resolve
/// in the branch's (search-filtered) item list are skipped.
pub fn breadcrumbs(folders: &[VirtualFolder], cursor: &NavigationCursor) -> Vec<Breadcrumb> {
    let Some(target) = cursor.target else {
        return Vec::new();
    };
    let Some(folder) = resolve_branch(folders, cursor) else {
        return Vec::new();
    };

    let mut crumbs = vec![Breadcrumb::new(
        folder.name.clone(),
        NavigationCursor::at_stage(folder.stage_id),
    )];

    if let CursorTarget::SubFolder { stage_id, item_id } = target {
        if let Some(entry) = folder.find_item(item_id) {
            crumbs.push(Breadcrumb::new(
                entry.item.name.clone(),
                NavigationCursor::at_sub_folder(stage_id, item_id),
            ));
        }
    }

    for (depth, folder_id) in cursor.trail.iter().enumerate() {
        if let Some(entry) = folder.find_item(*folder_id) {
            crumbs.push(Breadcrumb::new(
                entry.item.name.clone(),
                cursor.truncated(depth + 1),
            ));
        }
    }

    crumbs
}

/// The virtual folder the cursor is anchored in, if it still exists.
fn resolve_branch<'a>(
    folders: &'a [VirtualFolder],
    cursor: &NavigationCursor,
) -> Option<&'a VirtualFolder> {
    let stage_id = cursor.stage_id()?;
    folders.iter().find(|folder| folder.stage_id == stage_id)
}

//! Move planning for drag-and-drop reparenting.

use std::collections::HashMap;

use tracing::debug;

use workhub_core::types::{ItemId, StageId};
use workhub_entity::item::Item;
use workhub_entity::stage::Stage;

/// A drop target: a stage root or a stage sub-folder.
#[derive(Debug, Clone, Copy)]
pub enum MoveTarget<'a> {
    /// Drop onto a stage in the sidebar.
    Stage(&'a Stage),
    /// Drop onto a stage sub-folder in the sidebar.
    SubFolder(&'a Item),
}

/// The stage/parent assignment a move resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MovePlan {
    /// The stage the item lands in.
    pub stage_id: StageId,
    /// The parent folder the item lands under, `None` for the stage root.
    pub parent_id: Option<ItemId>,
}

/// Resolve a drop target to the item's new stage and parent.
///
/// A stage drop always lands at the stage root. A sub-folder drop lands
/// inside the sub-folder and adopts the sub-folder's own stage, whatever
/// stage happens to be selected in the host. Planning never mutates;
/// the plan is handed to the item store to apply.
///
/// Callers must not offer the moved item's own subtree as a target; use
/// [`target_within_subtree`] to exclude those candidates.
pub fn plan_move(target: &MoveTarget<'_>, item: &Item) -> MovePlan {
    let plan = match target {
        MoveTarget::Stage(stage) => MovePlan {
            stage_id: stage.id,
            parent_id: None,
        },
        MoveTarget::SubFolder(sub_folder) => MovePlan {
            stage_id: sub_folder.stage_id,
            parent_id: Some(sub_folder.id),
        },
    };

    debug!(
        item_id = %item.id,
        stage_id = %plan.stage_id,
        parent_id = ?plan.parent_id,
        "Planned move"
    );
    plan
}

/// Whether `target_id` is `item_id` itself or lies inside its subtree.
///
/// This is the caller-side guard for move targets: offering such a target
/// to [`plan_move`] would detach the subtree from the hierarchy. Walks
/// the parent chain of the target; bounded so malformed snapshots with
/// cyclic parent links cannot loop forever.
pub fn target_within_subtree(items: &[Item], item_id: ItemId, target_id: ItemId) -> bool {
    if item_id == target_id {
        return true;
    }

    let parents: HashMap<ItemId, Option<ItemId>> =
        items.iter().map(|item| (item.id, item.parent_id)).collect();

    let mut current = target_id;
    for _ in 0..items.len() {
        match parents.get(&current) {
            Some(Some(parent)) if *parent == item_id => return true,
            Some(Some(parent)) => current = *parent,
            _ => return false,
        }
    }
    false
}

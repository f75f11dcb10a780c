//! Navigation cursor state.

use serde::{Deserialize, Serialize};

use workhub_core::types::{ItemId, StageId};

/// The branch root the cursor is anchored to.
///
/// Plain stages and stage sub-folders both act as navigation roots: the
/// cursor descends into nested folders relative to one of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CursorTarget {
    /// Anchored at a stage root.
    Stage {
        /// The selected stage.
        stage_id: StageId,
    },
    /// Anchored at a stage sub-folder.
    SubFolder {
        /// The stage owning the sub-folder.
        stage_id: StageId,
        /// The sub-folder item acting as the branch root.
        item_id: ItemId,
    },
}

impl CursorTarget {
    /// The stage this target belongs to.
    pub fn stage_id(&self) -> StageId {
        match self {
            Self::Stage { stage_id } => *stage_id,
            Self::SubFolder { stage_id, .. } => *stage_id,
        }
    }

    /// The sub-folder item id, if this target is a sub-folder root.
    pub fn sub_folder_id(&self) -> Option<ItemId> {
        match self {
            Self::Stage { .. } => None,
            Self::SubFolder { item_id, .. } => Some(*item_id),
        }
    }
}

/// Where the user currently is in the virtual hierarchy.
///
/// The cursor is session state owned by the host and is never persisted.
/// `trail` records the folders descended into below the target root, in
/// order; an empty trail means the cursor sits at the root itself. A
/// cursor with no target means no branch is selected at all.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationCursor {
    /// The branch root, or `None` when nothing is selected.
    pub target: Option<CursorTarget>,
    /// Folders descended into below the root, outermost first.
    pub trail: Vec<ItemId>,
}

impl NavigationCursor {
    /// A cursor with no branch selected.
    pub fn unselected() -> Self {
        Self::default()
    }

    /// A cursor at the root of a plain stage.
    pub fn at_stage(stage_id: StageId) -> Self {
        Self {
            target: Some(CursorTarget::Stage { stage_id }),
            trail: Vec::new(),
        }
    }

    /// A cursor at the root of a stage sub-folder.
    pub fn at_sub_folder(stage_id: StageId, item_id: ItemId) -> Self {
        Self {
            target: Some(CursorTarget::SubFolder { stage_id, item_id }),
            trail: Vec::new(),
        }
    }

    /// Whether any branch is selected.
    pub fn is_selected(&self) -> bool {
        self.target.is_some()
    }

    /// Whether the cursor sits at the root of its branch.
    pub fn is_at_root(&self) -> bool {
        self.trail.is_empty()
    }

    /// How many folders deep below the branch root the cursor is.
    pub fn depth(&self) -> usize {
        self.trail.len()
    }

    /// The stage of the selected branch, if any.
    pub fn stage_id(&self) -> Option<StageId> {
        self.target.map(|target| target.stage_id())
    }

    /// The parent folder whose children are currently listed.
    ///
    /// `None` means the listing is rootless items of the selected stage;
    /// at a sub-folder root the sub-folder itself is the parent.
    pub fn current_parent(&self) -> Option<ItemId> {
        if let Some(last) = self.trail.last() {
            return Some(*last);
        }
        self.target.and_then(|target| target.sub_folder_id())
    }

    /// Step into a nested folder. Ignored while nothing is selected.
    pub fn descend(&mut self, folder_id: ItemId) {
        if self.target.is_some() {
            self.trail.push(folder_id);
        }
    }

    /// Step back up one folder. Returns `false` when already at the
    /// branch root, which leaves the cursor unchanged.
    pub fn go_back(&mut self) -> bool {
        self.trail.pop().is_some()
    }

    /// Jump back to the branch root, keeping the selection.
    pub fn go_to_root(&mut self) {
        self.trail.clear();
    }

    /// A copy of this cursor with the trail cut down to `depth` folders.
    /// Used to build breadcrumb jump targets.
    pub fn truncated(&self, depth: usize) -> Self {
        Self {
            target: self.target,
            trail: self.trail.iter().take(depth).copied().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unselected_cursor_has_no_parent() {
        let cursor = NavigationCursor::unselected();
        assert!(!cursor.is_selected());
        assert!(cursor.is_at_root());
        assert_eq!(cursor.current_parent(), None);
        assert_eq!(cursor.stage_id(), None);
    }

    #[test]
    fn test_descend_and_go_back_round_trip() {
        let stage_id = StageId::new();
        let folder = ItemId::new();
        let mut cursor = NavigationCursor::at_stage(stage_id);

        cursor.descend(folder);
        assert_eq!(cursor.depth(), 1);
        assert_eq!(cursor.current_parent(), Some(folder));

        assert!(cursor.go_back());
        assert!(cursor.is_at_root());
        assert_eq!(cursor, NavigationCursor::at_stage(stage_id));
    }

    #[test]
    fn test_go_back_at_root_is_a_no_op() {
        let mut cursor = NavigationCursor::at_sub_folder(StageId::new(), ItemId::new());
        let before = cursor.clone();
        assert!(!cursor.go_back());
        assert_eq!(cursor, before);
    }

    #[test]
    fn test_sub_folder_root_lists_the_sub_folder_itself() {
        let stage_id = StageId::new();
        let sub = ItemId::new();
        let cursor = NavigationCursor::at_sub_folder(stage_id, sub);
        assert_eq!(cursor.current_parent(), Some(sub));
        assert_eq!(cursor.stage_id(), Some(stage_id));
    }

    #[test]
    fn test_descend_without_selection_is_ignored() {
        let mut cursor = NavigationCursor::unselected();
        cursor.descend(ItemId::new());
        assert!(cursor.is_at_root());
        assert_eq!(cursor.current_parent(), None);
    }

    #[test]
    fn test_truncated_cuts_the_trail() {
        let stage_id = StageId::new();
        let (a, b, c) = (ItemId::new(), ItemId::new(), ItemId::new());
        let mut cursor = NavigationCursor::at_stage(stage_id);
        cursor.descend(a);
        cursor.descend(b);
        cursor.descend(c);

        let cut = cursor.truncated(1);
        assert_eq!(cut.trail, vec![a]);
        assert_eq!(cut.target, cursor.target);

        let root = cursor.truncated(0);
        assert!(root.is_at_root());
    }

    #[test]
    fn test_go_to_root_keeps_the_selection() {
        let stage_id = StageId::new();
        let mut cursor = NavigationCursor::at_stage(stage_id);
        cursor.descend(ItemId::new());
        cursor.go_to_root();
        assert_eq!(cursor, NavigationCursor::at_stage(stage_id));
    }
}

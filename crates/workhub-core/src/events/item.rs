//! Item-related domain events.

use serde::{Deserialize, Serialize};

use crate::types::{ItemId, StageId};

/// Events related to hierarchy items (files and folders).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ItemEvent {
    /// An item was created.
    Created {
        /// The item ID.
        item_id: ItemId,
        /// The item name.
        name: String,
        /// The stage the item belongs to.
        stage_id: StageId,
        /// The parent folder (None for root-level items).
        parent_id: Option<ItemId>,
    },
    /// An item was renamed.
    Renamed {
        /// The item ID.
        item_id: ItemId,
        /// The name after the rename.
        name: String,
    },
    /// An item was moved to a new stage and/or parent.
    Moved {
        /// The item ID.
        item_id: ItemId,
        /// The stage after the move.
        stage_id: StageId,
        /// The parent after the move (None for stage root).
        parent_id: Option<ItemId>,
    },
    /// An item's lock flag changed.
    LockChanged {
        /// The item ID.
        item_id: ItemId,
        /// The new lock state.
        is_locked: bool,
    },
    /// An item was deleted (descendants included).
    Deleted {
        /// The item ID.
        item_id: ItemId,
        /// The item name (for display after deletion).
        name: String,
        /// How many descendants were removed alongside it.
        descendants_removed: usize,
    },
}

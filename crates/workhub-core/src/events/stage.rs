//! Stage-related domain events.

use serde::{Deserialize, Serialize};

use crate::types::StageId;

/// Events related to workflow stage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum StageEvent {
    /// A stage was created.
    Created {
        /// The stage ID.
        stage_id: StageId,
        /// The stage name.
        name: String,
        /// Position within the stage ordering.
        order_position: i32,
    },
    /// A stage was renamed or recolored.
    Updated {
        /// The stage ID.
        stage_id: StageId,
        /// The stage name after the update.
        name: String,
    },
    /// The stage ordering changed.
    Reordered {
        /// The full new ordering.
        order: Vec<StageId>,
    },
    /// A stage was deleted. Items of the stage become orphans and drop
    /// out of the derived hierarchy on the next rebuild.
    Deleted {
        /// The stage ID.
        stage_id: StageId,
        /// The stage name (for display after deletion).
        name: String,
    },
}

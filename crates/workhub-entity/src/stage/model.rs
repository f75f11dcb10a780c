//! Stage entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use workhub_core::types::StageId;

/// A workflow stage scoping one top-level branch of the virtual hierarchy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stage {
    /// Unique stage identifier.
    pub id: StageId,
    /// Stage name (e.g., "Open", "Invoiced").
    pub name: String,
    /// Display color tag for the sidebar.
    pub color_tag: String,
    /// Position within the total stage ordering.
    pub order_position: i32,
    /// When the stage was created.
    pub created_at: DateTime<Utc>,
    /// When the stage was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a new stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewStage {
    /// Stage name.
    pub name: String,
    /// Display color tag.
    pub color_tag: String,
}

impl Stage {
    /// Materialize a stage record from creation data.
    pub fn from_new(id: StageId, new: NewStage, order_position: i32) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: new.name,
            color_tag: new.color_tag,
            order_position,
            created_at: now,
            updated_at: now,
        }
    }
}

impl NewStage {
    /// Create stage creation data.
    pub fn new(name: impl Into<String>, color_tag: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color_tag: color_tag.into(),
        }
    }
}

/// Partial update for a stage. Unset fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StagePatch {
    /// New stage name.
    pub name: Option<String>,
    /// New display color tag.
    pub color_tag: Option<String>,
}

impl StagePatch {
    /// A patch that only renames the stage.
    pub fn rename(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            color_tag: None,
        }
    }

    /// A patch that only recolors the stage.
    pub fn recolor(color_tag: impl Into<String>) -> Self {
        Self {
            name: None,
            color_tag: Some(color_tag.into()),
        }
    }

    /// Whether the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.color_tag.is_none()
    }
}

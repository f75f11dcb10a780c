//! Item listing filter.

use serde::{Deserialize, Serialize};

use workhub_core::types::StageId;

use super::kind::ItemKind;
use super::model::Item;

/// Filter for [`Item`] listings. All set fields must match.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemFilter {
    /// Restrict to items of this stage.
    pub stage_id: Option<StageId>,
    /// Restrict to files or folders.
    pub kind: Option<ItemKind>,
    /// Case-insensitive substring match on the item name.
    pub name_contains: Option<String>,
}

impl ItemFilter {
    /// A filter that matches every item.
    pub fn all() -> Self {
        Self::default()
    }

    /// Restrict to items of the given stage.
    pub fn with_stage(mut self, stage_id: StageId) -> Self {
        self.stage_id = Some(stage_id);
        self
    }

    /// Restrict to items of the given kind.
    pub fn with_kind(mut self, kind: ItemKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Restrict to items whose name contains the given substring.
    pub fn with_name_contains(mut self, query: impl Into<String>) -> Self {
        self.name_contains = Some(query.into());
        self
    }

    /// Check whether an item passes the filter.
    pub fn matches(&self, item: &Item) -> bool {
        if let Some(stage_id) = self.stage_id {
            if item.stage_id != stage_id {
                return false;
            }
        }
        if let Some(kind) = self.kind {
            if item.kind != kind {
                return false;
            }
        }
        if let Some(query) = &self.name_contains {
            if !item.name_matches(query) {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use workhub_core::types::ItemId;

    fn make_item(name: &str, kind: ItemKind, stage_id: StageId) -> Item {
        Item {
            id: ItemId::new(),
            name: name.to_string(),
            kind,
            stage_id,
            parent_id: None,
            is_stage_sub_folder: false,
            size_bytes: None,
            mime_type: None,
            storage_url: None,
            is_locked: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_all_matches_everything() {
        let item = make_item("x", ItemKind::File, StageId::new());
        assert!(ItemFilter::all().matches(&item));
    }

    #[test]
    fn test_combined_filters_must_all_match() {
        let stage = StageId::new();
        let item = make_item("Report.pdf", ItemKind::File, stage);

        let filter = ItemFilter::all()
            .with_stage(stage)
            .with_kind(ItemKind::File)
            .with_name_contains("report");
        assert!(filter.matches(&item));

        let wrong_kind = ItemFilter::all().with_stage(stage).with_kind(ItemKind::Folder);
        assert!(!wrong_kind.matches(&item));
    }
}

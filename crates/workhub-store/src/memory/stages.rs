//! In-memory stage registry.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use tracing::debug;

use workhub_core::error::AppError;
use workhub_core::events::{EventBus, EventPayload, StageEvent};
use workhub_core::result::AppResult;
use workhub_core::types::StageId;
use workhub_entity::stage::{NewStage, Stage, StagePatch};

use crate::stage_source::StageSource;

/// In-memory stage registry backed by dashmap.
///
/// Clones share the same underlying map and event bus.
#[derive(Debug, Clone)]
pub struct MemoryStageRegistry {
    /// The stage records by ID.
    stages: Arc<DashMap<StageId, Stage>>,
    /// Bus receiving an event per successful mutation.
    events: EventBus,
}

impl MemoryStageRegistry {
    /// Create an empty registry.
    pub fn new(events: EventBus) -> Self {
        Self {
            stages: Arc::new(DashMap::new()),
            events,
        }
    }

    /// Create a registry seeded with existing stages.
    pub fn with_stages(events: EventBus, stages: Vec<Stage>) -> Self {
        let registry = Self::new(events);
        for stage in stages {
            registry.stages.insert(stage.id, stage);
        }
        registry
    }

    /// Snapshot of all stages in display order.
    fn sorted_stages(&self) -> Vec<Stage> {
        let mut stages: Vec<Stage> = self
            .stages
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        stages.sort_by(|a, b| {
            a.order_position
                .cmp(&b.order_position)
                .then_with(|| a.created_at.cmp(&b.created_at))
                .then_with(|| a.id.as_uuid().cmp(b.id.as_uuid()))
        });
        stages
    }
}

#[async_trait]
impl StageSource for MemoryStageRegistry {
    async fn list_stages(&self) -> AppResult<Vec<Stage>> {
        Ok(self.sorted_stages())
    }

    async fn find_stage(&self, id: StageId) -> AppResult<Option<Stage>> {
        Ok(self.stages.get(&id).map(|entry| entry.value().clone()))
    }

    async fn create_stage(&self, new: NewStage) -> AppResult<Stage> {
        if new.name.trim().is_empty() {
            return Err(AppError::validation("Stage name cannot be empty"));
        }

        let next_position = self
            .stages
            .iter()
            .map(|entry| entry.value().order_position)
            .max()
            .map_or(0, |max| max + 1);

        let stage = Stage::from_new(StageId::new(), new, next_position);
        self.stages.insert(stage.id, stage.clone());

        debug!(stage_id = %stage.id, name = %stage.name, "Stage created");
        self.events.publish(EventPayload::Stage(StageEvent::Created {
            stage_id: stage.id,
            name: stage.name.clone(),
            order_position: stage.order_position,
        }));

        Ok(stage)
    }

    async fn update_stage(&self, id: StageId, patch: StagePatch) -> AppResult<Stage> {
        if let Some(name) = &patch.name {
            if name.trim().is_empty() {
                return Err(AppError::validation("Stage name cannot be empty"));
            }
        }

        let mut entry = self
            .stages
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("Stage {id} not found")))?;

        if patch.is_empty() {
            return Ok(entry.value().clone());
        }

        let stage = entry.value_mut();
        if let Some(name) = patch.name {
            stage.name = name;
        }
        if let Some(color_tag) = patch.color_tag {
            stage.color_tag = color_tag;
        }
        stage.updated_at = Utc::now();
        let updated = stage.clone();
        drop(entry);

        debug!(stage_id = %id, name = %updated.name, "Stage updated");
        self.events.publish(EventPayload::Stage(StageEvent::Updated {
            stage_id: id,
            name: updated.name.clone(),
        }));

        Ok(updated)
    }

    async fn reorder_stages(&self, order: &[StageId]) -> AppResult<Vec<Stage>> {
        let existing: HashSet<StageId> = self.stages.iter().map(|entry| *entry.key()).collect();
        let requested: HashSet<StageId> = order.iter().copied().collect();

        if requested.len() != order.len() || requested != existing {
            return Err(AppError::validation(
                "Stage order must be a complete permutation of the existing stages",
            ));
        }

        let now = Utc::now();
        for (position, id) in order.iter().enumerate() {
            if let Some(mut entry) = self.stages.get_mut(id) {
                let stage = entry.value_mut();
                stage.order_position = position as i32;
                stage.updated_at = now;
            }
        }

        debug!(count = order.len(), "Stages reordered");
        self.events
            .publish(EventPayload::Stage(StageEvent::Reordered {
                order: order.to_vec(),
            }));

        Ok(self.sorted_stages())
    }

    async fn delete_stage(&self, id: StageId) -> AppResult<Stage> {
        let (_, stage) = self
            .stages
            .remove(&id)
            .ok_or_else(|| AppError::not_found(format!("Stage {id} not found")))?;

        debug!(stage_id = %id, name = %stage.name, "Stage deleted");
        self.events.publish(EventPayload::Stage(StageEvent::Deleted {
            stage_id: id,
            name: stage.name.clone(),
        }));

        Ok(stage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_registry() -> MemoryStageRegistry {
        MemoryStageRegistry::new(EventBus::new())
    }

    #[tokio::test]
    async fn test_create_appends_to_ordering() {
        let registry = make_registry();
        let open = registry
            .create_stage(NewStage::new("Open", "blue"))
            .await
            .unwrap();
        let done = registry
            .create_stage(NewStage::new("Done", "green"))
            .await
            .unwrap();

        assert!(open.order_position < done.order_position);
        let listed = registry.list_stages().await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].name, "Open");
        assert_eq!(listed[1].name, "Done");
    }

    #[tokio::test]
    async fn test_create_rejects_blank_name() {
        let registry = make_registry();
        let err = registry
            .create_stage(NewStage::new("   ", "blue"))
            .await
            .unwrap_err();
        assert!(err.is_kind(workhub_core::error::ErrorKind::Validation));
    }

    #[tokio::test]
    async fn test_update_applies_patch() {
        let registry = make_registry();
        let stage = registry
            .create_stage(NewStage::new("Open", "blue"))
            .await
            .unwrap();

        let updated = registry
            .update_stage(stage.id, StagePatch::rename("In Progress"))
            .await
            .unwrap();
        assert_eq!(updated.name, "In Progress");
        assert_eq!(updated.color_tag, "blue");
    }

    #[tokio::test]
    async fn test_update_missing_stage_is_not_found() {
        let registry = make_registry();
        let err = registry
            .update_stage(StageId::new(), StagePatch::rename("x"))
            .await
            .unwrap_err();
        assert!(err.is_kind(workhub_core::error::ErrorKind::NotFound));
    }

    #[tokio::test]
    async fn test_reorder_requires_complete_permutation() {
        let registry = make_registry();
        let a = registry
            .create_stage(NewStage::new("A", "blue"))
            .await
            .unwrap();
        let _b = registry
            .create_stage(NewStage::new("B", "green"))
            .await
            .unwrap();

        // Missing one stage.
        let err = registry.reorder_stages(&[a.id]).await.unwrap_err();
        assert!(err.is_kind(workhub_core::error::ErrorKind::Validation));

        // Unknown stage in the order.
        let err = registry
            .reorder_stages(&[a.id, StageId::new()])
            .await
            .unwrap_err();
        assert!(err.is_kind(workhub_core::error::ErrorKind::Validation));
    }

    #[tokio::test]
    async fn test_reorder_rewrites_positions() {
        let registry = make_registry();
        let a = registry
            .create_stage(NewStage::new("A", "blue"))
            .await
            .unwrap();
        let b = registry
            .create_stage(NewStage::new("B", "green"))
            .await
            .unwrap();

        let reordered = registry.reorder_stages(&[b.id, a.id]).await.unwrap();
        assert_eq!(reordered[0].id, b.id);
        assert_eq!(reordered[1].id, a.id);
        assert_eq!(reordered[0].order_position, 0);
    }

    #[tokio::test]
    async fn test_delete_emits_event() {
        let bus = EventBus::new();
        let registry = MemoryStageRegistry::new(bus.clone());
        let stage = registry
            .create_stage(NewStage::new("Open", "blue"))
            .await
            .unwrap();

        let mut rx = bus.subscribe();
        registry.delete_stage(stage.id).await.unwrap();

        let event = rx.try_recv().expect("deletion event");
        assert!(matches!(
            event.payload,
            EventPayload::Stage(StageEvent::Deleted { stage_id, .. }) if stage_id == stage.id
        ));
        assert!(registry.find_stage(stage.id).await.unwrap().is_none());
    }
}

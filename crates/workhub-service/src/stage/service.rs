//! Stage CRUD and ordering operations.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::info;

use workhub_core::error::AppError;
use workhub_core::result::AppResult;
use workhub_core::types::StageId;
use workhub_entity::stage::{NewStage, Stage, StagePatch};
use workhub_store::StageSource;

/// Manages the workflow stage configuration.
#[derive(Debug, Clone)]
pub struct StageService {
    /// Stage source backend.
    stages: Arc<dyn StageSource>,
}

impl StageService {
    /// Creates a new stage service.
    pub fn new(stages: Arc<dyn StageSource>) -> Self {
        Self { stages }
    }

    /// Lists all stages in display order.
    pub async fn list_stages(&self) -> AppResult<Vec<Stage>> {
        self.stages.list_stages().await
    }

    /// Gets a stage by ID.
    pub async fn get_stage(&self, id: StageId) -> AppResult<Stage> {
        self.stages
            .find_stage(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Stage {id} not found")))
    }

    /// Creates a stage at the end of the ordering.
    pub async fn create_stage(&self, new: NewStage) -> AppResult<Stage> {
        if new.name.trim().is_empty() {
            return Err(AppError::validation("Stage name cannot be empty"));
        }

        let stage = self.stages.create_stage(new).await?;

        info!(
            stage_id = %stage.id,
            name = %stage.name,
            position = stage.order_position,
            "Stage created"
        );
        Ok(stage)
    }

    /// Renames a stage.
    pub async fn rename_stage(&self, id: StageId, name: &str) -> AppResult<Stage> {
        if name.trim().is_empty() {
            return Err(AppError::validation("Stage name cannot be empty"));
        }

        let stage = self.stages.update_stage(id, StagePatch::rename(name)).await?;

        info!(stage_id = %id, name = %stage.name, "Stage renamed");
        Ok(stage)
    }

    /// Changes a stage's display color tag.
    pub async fn recolor_stage(&self, id: StageId, color_tag: &str) -> AppResult<Stage> {
        let stage = self
            .stages
            .update_stage(id, StagePatch::recolor(color_tag))
            .await?;

        info!(stage_id = %id, color_tag, "Stage recolored");
        Ok(stage)
    }

    /// Replaces the stage ordering.
    pub async fn reorder_stages(&self, order: &[StageId]) -> AppResult<Vec<Stage>> {
        let existing: HashSet<StageId> = self
            .list_stages()
            .await?
            .into_iter()
            .map(|stage| stage.id)
            .collect();
        let requested: HashSet<StageId> = order.iter().copied().collect();
        if requested.len() != order.len() || requested != existing {
            return Err(AppError::validation(
                "Stage order must be a complete permutation of the existing stages",
            ));
        }

        let stages = self.stages.reorder_stages(order).await?;

        info!(count = stages.len(), "Stages reordered");
        Ok(stages)
    }

    /// Deletes a stage. Items of the stage are left in place as orphans
    /// and disappear from the derived hierarchy.
    pub async fn delete_stage(&self, id: StageId) -> AppResult<Stage> {
        let stage = self.stages.delete_stage(id).await?;

        info!(stage_id = %id, name = %stage.name, "Stage deleted");
        Ok(stage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use workhub_core::error::ErrorKind;
    use workhub_core::events::EventBus;
    use workhub_store::MemoryStageRegistry;

    fn make_service() -> StageService {
        StageService::new(Arc::new(MemoryStageRegistry::new(EventBus::new())))
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let service = make_service();
        let stage = service
            .create_stage(NewStage::new("Open", "blue"))
            .await
            .unwrap();

        let fetched = service.get_stage(stage.id).await.unwrap();
        assert_eq!(fetched.name, "Open");
    }

    #[tokio::test]
    async fn test_get_missing_stage_is_not_found() {
        let service = make_service();
        let err = service.get_stage(StageId::new()).await.unwrap_err();
        assert!(err.is_kind(ErrorKind::NotFound));
    }

    #[tokio::test]
    async fn test_create_rejects_blank_name() {
        let service = make_service();
        let err = service
            .create_stage(NewStage::new("  ", "blue"))
            .await
            .unwrap_err();
        assert!(err.is_kind(ErrorKind::Validation));
    }

    #[tokio::test]
    async fn test_reorder_validates_permutation() {
        let service = make_service();
        let a = service
            .create_stage(NewStage::new("A", "blue"))
            .await
            .unwrap();
        let b = service
            .create_stage(NewStage::new("B", "green"))
            .await
            .unwrap();

        let err = service.reorder_stages(&[a.id, a.id]).await.unwrap_err();
        assert!(err.is_kind(ErrorKind::Validation));

        let reordered = service.reorder_stages(&[b.id, a.id]).await.unwrap();
        assert_eq!(reordered[0].id, b.id);
    }

    #[tokio::test]
    async fn test_rename_and_recolor() {
        let service = make_service();
        let stage = service
            .create_stage(NewStage::new("Open", "blue"))
            .await
            .unwrap();

        let renamed = service.rename_stage(stage.id, "In Review").await.unwrap();
        assert_eq!(renamed.name, "In Review");

        let recolored = service.recolor_stage(stage.id, "amber").await.unwrap();
        assert_eq!(recolored.color_tag, "amber");
        assert_eq!(recolored.name, "In Review");
    }
}

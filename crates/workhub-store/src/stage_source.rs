//! Stage source trait for pluggable stage backends.

use async_trait::async_trait;

use workhub_core::result::AppResult;
use workhub_core::types::StageId;
use workhub_entity::stage::{NewStage, Stage, StagePatch};

/// Trait for backends holding the workflow stage configuration.
///
/// Stages are a small, totally ordered set. The source owns the ordering:
/// `create_stage` appends at the end and `reorder_stages` replaces the
/// ordering wholesale.
#[async_trait]
pub trait StageSource: Send + Sync + std::fmt::Debug + 'static {
    /// List all stages ordered by `order_position`.
    async fn list_stages(&self) -> AppResult<Vec<Stage>>;

    /// Find a stage by ID. Returns `None` if the stage does not exist.
    async fn find_stage(&self, id: StageId) -> AppResult<Option<Stage>>;

    /// Create a stage at the end of the ordering.
    async fn create_stage(&self, new: NewStage) -> AppResult<Stage>;

    /// Apply a partial update to a stage.
    async fn update_stage(&self, id: StageId, patch: StagePatch) -> AppResult<Stage>;

    /// Replace the stage ordering. `order` must be a complete permutation
    /// of the existing stage IDs.
    async fn reorder_stages(&self, order: &[StageId]) -> AppResult<Vec<Stage>>;

    /// Delete a stage and return it. Items of the stage are not touched;
    /// they become orphans and drop out of the derived hierarchy.
    async fn delete_stage(&self, id: StageId) -> AppResult<Stage>;
}

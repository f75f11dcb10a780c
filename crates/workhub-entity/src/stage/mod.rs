//! Workflow stage domain entities.

pub mod model;

pub use model::{NewStage, Stage, StagePatch};

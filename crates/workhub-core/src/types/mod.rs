//! Core type definitions used across the WorkHub workspace.

pub mod id;

pub use id::{ItemId, StageId};

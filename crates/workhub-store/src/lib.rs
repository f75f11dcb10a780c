//! # workhub-store
//!
//! Store contracts and reference implementations for WorkHub. The
//! [`StageSource`] and [`ItemStore`] traits are the asynchronous boundary
//! between the hierarchy engine and whatever backend actually holds the
//! flat records; the in-memory implementations back the CLI host and the
//! test suites. Blob payloads go through `workhub_core::traits::FileStorage`,
//! implemented here for memory and the local filesystem.

pub mod blob;
pub mod item_store;
pub mod memory;
pub mod snapshot;
pub mod stage_source;

pub use item_store::ItemStore;
pub use memory::{MemoryItemStore, MemoryStageRegistry};
pub use snapshot::Snapshot;
pub use stage_source::StageSource;

//! # workhub-service
//!
//! The hierarchy engine and its orchestration services. The `hierarchy`
//! module is the pure, synchronous core: virtual folder derivation,
//! cursor-based navigation and move planning, all free of I/O. The
//! `stage` and `item` services wrap the store contracts with validation
//! and play the caller role the engine assigns its obligations to.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod hierarchy;
pub mod item;
pub mod stage;

pub use hierarchy::{
    MovePlan, MoveTarget, breadcrumbs, build_virtual_folders, current_contents, plan_move,
    target_within_subtree,
};
pub use item::{ItemService, MoveTargetRef};
pub use stage::StageService;

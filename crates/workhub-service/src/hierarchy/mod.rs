//! The pure hierarchy core.
//!
//! Everything in this module is synchronous and side-effect-free: virtual
//! folders are derived from flat stage/item slices, navigation resolves a
//! cursor against the derived folders, and moves are planned without being
//! applied. Suspension and mutation live behind the store traits, never
//! here.

pub mod builder;
pub mod mover;
pub mod navigator;

pub use builder::build_virtual_folders;
pub use mover::{MovePlan, MoveTarget, plan_move, target_within_subtree};
pub use navigator::{breadcrumbs, current_contents};

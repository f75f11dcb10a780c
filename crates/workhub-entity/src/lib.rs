//! # workhub-entity
//!
//! Domain entity models for WorkHub. Every struct in this crate represents
//! either a record held by an external store (stages, items) or a derived
//! value object (virtual folders, navigation cursors, breadcrumbs). All
//! entities derive `Debug`, `Clone`, `Serialize`, and `Deserialize`.

pub mod hierarchy;
pub mod item;
pub mod stage;

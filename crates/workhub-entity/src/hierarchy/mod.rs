//! Derived hierarchy view types.
//!
//! Nothing in this module is persisted: virtual folders are rebuilt from
//! the flat stage/item snapshots on every change, and the navigation
//! cursor is session-local state owned by the host.

pub mod breadcrumb;
pub mod cursor;
pub mod virtual_folder;

pub use breadcrumb::Breadcrumb;
pub use cursor::{CursorTarget, NavigationCursor};
pub use virtual_folder::{FolderItem, VirtualFolder};

//! Breadcrumb trail entries.

use serde::{Deserialize, Serialize};

use super::cursor::NavigationCursor;

/// One segment of the breadcrumb trail above the current folder.
///
/// Instead of a callback, each segment carries the cursor it jumps to;
/// the host applies it by replacing its current cursor wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breadcrumb {
    /// Display name of the segment (stage, sub-folder or folder name).
    pub name: String,
    /// The cursor to restore when this segment is activated.
    pub target: NavigationCursor,
}

impl Breadcrumb {
    /// Build a breadcrumb segment.
    pub fn new(name: impl Into<String>, target: NavigationCursor) -> Self {
        Self {
            name: name.into(),
            target,
        }
    }
}

//! Hierarchy item domain entities.

pub mod filter;
pub mod kind;
pub mod model;

pub use filter::ItemFilter;
pub use kind::ItemKind;
pub use model::{Item, NewItem};

//! Item management service.

pub mod service;

pub use service::{ItemService, MoveTargetRef};

//! Core traits defined in `workhub-core` and implemented by other crates.

pub mod file_storage;

pub use file_storage::{FileStorage, StoredFile};

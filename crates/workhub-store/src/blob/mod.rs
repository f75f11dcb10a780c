//! Blob storage providers for file payloads.

pub mod local;
pub mod memory;

pub use local::LocalFileStorage;
pub use memory::MemoryFileStorage;

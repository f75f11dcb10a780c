//! In-memory store implementations backed by dashmap.
//!
//! These are the reference stores: the CLI host runs on them (hydrated
//! from a JSON snapshot) and the service test suites use them as fakes.
//! Every successful mutation publishes a domain event on the shared bus.

pub mod items;
pub mod stages;

pub use items::MemoryItemStore;
pub use stages::MemoryStageRegistry;

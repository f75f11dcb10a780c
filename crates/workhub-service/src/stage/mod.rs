//! Workflow stage management service.

pub mod service;

pub use service::StageService;

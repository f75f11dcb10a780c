//! File storage trait for pluggable blob backends.

use async_trait::async_trait;
use bytes::Bytes;

use crate::result::AppResult;

/// Metadata returned after storing a file payload.
///
/// The `url` is the opaque handle later passed to [`FileStorage::remove`]
/// and recorded on the owning item; callers never parse it.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct StoredFile {
    /// Opaque storage URL for the uploaded payload.
    pub url: String,
    /// Payload size in bytes.
    pub size_bytes: i64,
    /// MIME type (if known).
    pub mime_type: Option<String>,
}

/// Trait for file payload storage backends.
///
/// The hierarchy engine itself never touches payloads; only the upload and
/// delete flows of the item service go through this trait. Implementations
/// exist for in-memory blobs (tests) and the local filesystem (CLI host).
#[async_trait]
pub trait FileStorage: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g., "memory", "local").
    fn provider_type(&self) -> &str;

    /// Check whether the provider is healthy and reachable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Store a payload and return its storage metadata.
    async fn upload(
        &self,
        name: &str,
        data: Bytes,
        mime_type: Option<&str>,
    ) -> AppResult<StoredFile>;

    /// Remove a previously stored payload by its URL.
    async fn remove(&self, url: &str) -> AppResult<()>;
}

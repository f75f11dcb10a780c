//! In-memory blob storage.

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use dashmap::DashMap;
use tracing::debug;
use uuid::Uuid;

use workhub_core::error::AppError;
use workhub_core::result::AppResult;
use workhub_core::traits::{FileStorage, StoredFile};

/// In-memory blob storage keyed by `memory://` URLs.
///
/// Used by the test suites; payloads vanish with the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryFileStorage {
    /// Stored payloads by URL.
    blobs: Arc<DashMap<String, Bytes>>,
}

impl MemoryFileStorage {
    /// Create an empty in-memory blob store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored payloads.
    pub fn blob_count(&self) -> usize {
        self.blobs.len()
    }

    /// Fetch a stored payload by URL.
    pub fn get(&self, url: &str) -> Option<Bytes> {
        self.blobs.get(url).map(|entry| entry.value().clone())
    }
}

#[async_trait]
impl FileStorage for MemoryFileStorage {
    fn provider_type(&self) -> &str {
        "memory"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }

    async fn upload(
        &self,
        name: &str,
        data: Bytes,
        mime_type: Option<&str>,
    ) -> AppResult<StoredFile> {
        let url = format!("memory://{}/{name}", Uuid::new_v4());
        let size_bytes = data.len() as i64;
        self.blobs.insert(url.clone(), data);

        debug!(url = %url, bytes = size_bytes, "Stored blob in memory");
        Ok(StoredFile {
            url,
            size_bytes,
            mime_type: mime_type.map(str::to_string),
        })
    }

    async fn remove(&self, url: &str) -> AppResult<()> {
        if !url.starts_with("memory://") {
            return Err(AppError::storage(format!(
                "URL '{url}' does not belong to the memory provider"
            )));
        }
        self.blobs.remove(url);
        debug!(url = %url, "Removed blob from memory");
        Ok(())
    }
}

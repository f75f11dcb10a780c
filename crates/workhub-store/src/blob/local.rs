//! Local filesystem blob storage.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::fs;
use tracing::debug;
use uuid::Uuid;

use workhub_core::error::{AppError, ErrorKind};
use workhub_core::result::AppResult;
use workhub_core::traits::{FileStorage, StoredFile};

/// Scheme prefix of URLs produced by this provider.
const URL_PREFIX: &str = "local://";

/// Blob storage on the local filesystem.
///
/// Payloads are written under a root directory, one subdirectory per
/// upload, and addressed by `local://` URLs carrying the relative path.
#[derive(Debug, Clone)]
pub struct LocalFileStorage {
    /// Root directory for all stored payloads.
    root: PathBuf,
}

impl LocalFileStorage {
    /// Create a local blob store rooted at the given path.
    pub async fn new(root_path: &str) -> AppResult<Self> {
        let root = PathBuf::from(root_path);
        fs::create_dir_all(&root).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create blob root: {}", root.display()),
                e,
            )
        })?;
        Ok(Self { root })
    }

    /// Resolve a relative blob path to an absolute path within the root.
    /// Rejects traversal outside the root.
    fn resolve(&self, rel_path: &str) -> AppResult<PathBuf> {
        let clean = rel_path.trim_start_matches('/');
        if Path::new(clean)
            .components()
            .any(|c| matches!(c, std::path::Component::ParentDir))
        {
            return Err(AppError::storage(format!(
                "Blob path '{rel_path}' escapes the storage root"
            )));
        }
        Ok(self.root.join(clean))
    }

    /// Strip everything from a file name that would act as path syntax.
    fn sanitize(name: &str) -> String {
        let cleaned: String = name
            .chars()
            .map(|c| match c {
                '/' | '\\' | '\0' => '_',
                other => other,
            })
            .collect();
        if cleaned.is_empty() || cleaned == "." || cleaned == ".." {
            "unnamed".to_string()
        } else {
            cleaned
        }
    }
}

#[async_trait]
impl FileStorage for LocalFileStorage {
    fn provider_type(&self) -> &str {
        "local"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(self.root.exists() && self.root.is_dir())
    }

    async fn upload(
        &self,
        name: &str,
        data: Bytes,
        mime_type: Option<&str>,
    ) -> AppResult<StoredFile> {
        let rel_path = format!("{}/{}", Uuid::new_v4(), Self::sanitize(name));
        let full_path = self.resolve(&rel_path)?;

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to create blob directory: {}", parent.display()),
                    e,
                )
            })?;
        }

        let size_bytes = data.len() as i64;
        fs::write(&full_path, &data).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to write blob: {rel_path}"),
                e,
            )
        })?;

        debug!(path = %rel_path, bytes = size_bytes, "Stored blob on disk");
        Ok(StoredFile {
            url: format!("{URL_PREFIX}{rel_path}"),
            size_bytes,
            mime_type: mime_type.map(str::to_string),
        })
    }

    async fn remove(&self, url: &str) -> AppResult<()> {
        let rel_path = url.strip_prefix(URL_PREFIX).ok_or_else(|| {
            AppError::storage(format!("URL '{url}' does not belong to the local provider"))
        })?;

        let full_path = self.resolve(rel_path)?;
        if full_path.exists() {
            fs::remove_file(&full_path).await.map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to remove blob: {rel_path}"),
                    e,
                )
            })?;
            // Drop the per-upload directory when it is empty.
            if let Some(parent) = full_path.parent() {
                let _ = fs::remove_dir(parent).await;
            }
            debug!(path = %rel_path, "Removed blob from disk");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn make_storage() -> (tempfile::TempDir, LocalFileStorage) {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalFileStorage::new(dir.path().to_str().unwrap())
            .await
            .unwrap();
        (dir, storage)
    }

    #[tokio::test]
    async fn test_upload_writes_under_root() {
        let (dir, storage) = make_storage().await;
        let stored = storage
            .upload("report.pdf", Bytes::from("content"), Some("application/pdf"))
            .await
            .unwrap();

        assert!(stored.url.starts_with("local://"));
        assert_eq!(stored.size_bytes, 7);

        let rel = stored.url.strip_prefix("local://").unwrap();
        let on_disk = tokio::fs::read(dir.path().join(rel)).await.unwrap();
        assert_eq!(on_disk, b"content");
    }

    #[tokio::test]
    async fn test_remove_deletes_file_and_directory() {
        let (dir, storage) = make_storage().await;
        let stored = storage
            .upload("a.txt", Bytes::from("x"), None)
            .await
            .unwrap();

        storage.remove(&stored.url).await.unwrap();

        let rel = stored.url.strip_prefix("local://").unwrap();
        assert!(!dir.path().join(rel).exists());
        assert!(!dir.path().join(rel).parent().unwrap().exists());
    }

    #[tokio::test]
    async fn test_remove_missing_blob_is_silent() {
        let (_dir, storage) = make_storage().await;
        storage
            .remove(&format!("local://{}/gone.txt", Uuid::new_v4()))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_remove_rejects_traversal() {
        let (_dir, storage) = make_storage().await;
        let err = storage.remove("local://../escape.txt").await.unwrap_err();
        assert!(err.is_kind(ErrorKind::Storage));
    }

    #[tokio::test]
    async fn test_sanitize_replaces_path_syntax() {
        let (_dir, storage) = make_storage().await;
        let stored = storage
            .upload("up/../name.txt", Bytes::from("x"), None)
            .await
            .unwrap();

        // The name must contribute a single path component.
        let rel = stored.url.strip_prefix("local://").unwrap();
        assert_eq!(rel.matches('/').count(), 1);
        storage.remove(&stored.url).await.unwrap();
    }

    #[tokio::test]
    async fn test_health_check() {
        let (_dir, storage) = make_storage().await;
        assert!(storage.health_check().await.unwrap());
    }
}

use crate::keys;
use crate::traits::{ObjectGateway, ObjectSummary, StorageError, StorageResult};
use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Local filesystem storage implementation
#[derive(Clone)]
pub struct LocalGateway {
    base_path: PathBuf,
    base_url: String,
}

impl LocalGateway {
    /// Create a new LocalGateway instance
    ///
    /// # Arguments
    /// * `base_path` - Root directory for file storage (e.g., "/var/lib/docbox/arquivos")
    /// * `base_url` - Base URL for serving files (e.g., "http://localhost:3000/arquivos")
    pub async fn new(base_path: impl Into<PathBuf>, base_url: String) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalGateway {
            base_path,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Convert storage key to filesystem path with security validation
    ///
    /// Keys are validated before joining, and already-existing paths are
    /// canonicalized so a symlink inside the storage directory cannot point
    /// a key outside of it.
    fn key_to_path(&self, key: &str) -> StorageResult<PathBuf> {
        keys::validate_key(key)?;

        let path = self.base_path.join(key);

        if let Ok(canonical) = path.canonicalize() {
            let base_canonical = self.base_path.canonicalize().map_err(|e| {
                StorageError::ConfigError(format!("Failed to canonicalize base path: {}", e))
            })?;
            if canonical.strip_prefix(&base_canonical).is_err() {
                return Err(StorageError::InvalidKey(
                    "Storage key resolves outside storage directory".to_string(),
                ));
            }
        }

        Ok(path)
    }

    /// Generate public URL for a key
    fn generate_url(&self, key: &str) -> String {
        format!("{}/{}", self.base_url, key)
    }

    /// Ensure parent directory exists
    async fn ensure_parent_dir(&self, path: &Path) -> StorageResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl ObjectGateway for LocalGateway {
    async fn put_object(&self, key: &str, data: Bytes, _content_type: &str) -> StorageResult<()> {
        let path = self.key_to_path(key)?;
        let size = data.len();

        self.ensure_parent_dir(&path).await?;

        let start = std::time::Instant::now();

        // File::create truncates an existing file, which gives the
        // replace-on-same-name semantics uploads rely on.
        let mut file = fs::File::create(&path).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to create file {}: {}", path.display(), e))
        })?;

        file.write_all(&data).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to write file {}: {}", path.display(), e))
        })?;

        file.sync_all().await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to sync file {}: {}", path.display(), e))
        })?;

        tracing::info!(
            path = %path.display(),
            key = %key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage put successful"
        );

        Ok(())
    }

    async fn signed_url(&self, key: &str, _expires_in: Duration) -> StorageResult<String> {
        let path = self.key_to_path(key)?;

        // No signing for local files; the existence check keeps the
        // behavior aligned with the S3 gateway.
        if !fs::try_exists(&path).await.unwrap_or(false) {
            return Err(StorageError::NotFound(key.to_string()));
        }

        Ok(self.generate_url(key))
    }

    async fn list_prefix(&self, prefix: &str) -> StorageResult<Vec<ObjectSummary>> {
        keys::validate_key(prefix)?;
        let dir = self.key_to_path(prefix)?;

        if !fs::try_exists(&dir).await.unwrap_or(false) {
            return Ok(Vec::new());
        }

        let mut entries = fs::read_dir(&dir).await.map_err(|e| {
            StorageError::ListFailed(format!("Failed to read directory {}: {}", dir.display(), e))
        })?;

        let mut summaries = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(|e| {
            StorageError::ListFailed(format!("Failed to read directory {}: {}", dir.display(), e))
        })? {
            let metadata = match entry.metadata().await {
                Ok(m) => m,
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        path = %entry.path().display(),
                        "Skipping unreadable directory entry"
                    );
                    continue;
                }
            };
            if !metadata.is_file() {
                continue;
            }

            let name = entry.file_name().to_string_lossy().to_string();
            let key = format!("{}/{}", prefix, name);
            if keys::is_keep_marker(&key) {
                continue;
            }

            let last_modified = metadata.modified().ok().map(DateTime::<Utc>::from);

            summaries.push(ObjectSummary {
                key,
                name,
                size: metadata.len(),
                last_modified,
            });
        }

        Ok(summaries)
    }

    async fn remove_prefix(&self, prefix: &str) -> StorageResult<u64> {
        keys::validate_key(prefix)?;
        let dir = self.key_to_path(prefix)?;
        let start = std::time::Instant::now();

        if !fs::try_exists(&dir).await.unwrap_or(false) {
            return Ok(0);
        }

        let mut entries = fs::read_dir(&dir).await.map_err(|e| {
            StorageError::ListFailed(format!("Failed to read directory {}: {}", dir.display(), e))
        })?;

        // Best effort: a failed delete is logged and skipped so a partial
        // purge still removes what it can.
        let mut removed = 0u64;
        while let Some(entry) = entries.next_entry().await.map_err(|e| {
            StorageError::ListFailed(format!("Failed to read directory {}: {}", dir.display(), e))
        })? {
            let path = entry.path();
            match fs::remove_file(&path).await {
                Ok(()) => removed += 1,
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        path = %path.display(),
                        "Local delete failed during prefix purge"
                    );
                }
            }
        }

        if let Err(e) = fs::remove_dir(&dir).await {
            tracing::debug!(
                error = %e,
                path = %dir.display(),
                "Prefix directory left in place after purge"
            );
        }

        tracing::info!(
            prefix = %prefix,
            removed_objects = removed,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local prefix purge finished"
        );

        Ok(removed)
    }

    async fn exists(&self, key: &str) -> StorageResult<bool> {
        let path = self.key_to_path(key)?;
        Ok(fs::try_exists(&path).await.unwrap_or(false))
    }

    fn backend_kind(&self) -> StorageBackend {
        StorageBackend::Local
    }
}

use crate::keys;
use crate::traits::{ObjectGateway, ObjectSummary, StorageError, StorageResult};
use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use http::Method;
use object_store::aws::{AmazonS3, AmazonS3Builder};
use object_store::path::Path;
use object_store::signer::Signer;
use object_store::Error as ObjectStoreError;
use object_store::{ObjectStore, ObjectStoreExt, PutPayload, Result as ObjectResult};
use std::time::Duration;

/// S3-compatible object storage gateway.
pub struct S3Gateway {
    store: AmazonS3,
    bucket: String,
    endpoint_url: Option<String>,
}

impl S3Gateway {
    /// Create a new S3Gateway instance
    ///
    /// # Arguments
    /// * `bucket` - S3 bucket name
    /// * `region` - AWS region (or region identifier for S3-compatible providers)
    /// * `endpoint_url` - Optional custom endpoint URL for S3-compatible providers
    ///   (e.g., "http://localhost:9000" for MinIO, or a Supabase Storage S3 endpoint)
    pub async fn new(
        bucket: String,
        region: String,
        endpoint_url: Option<String>,
    ) -> StorageResult<Self> {
        // Credentials come from the environment (AWS_ACCESS_KEY_ID etc.).
        let mut builder = AmazonS3Builder::from_env()
            .with_region(region)
            .with_bucket_name(bucket.clone());

        if let Some(ref endpoint) = endpoint_url {
            let allow_http = endpoint.starts_with("http://");
            builder = builder
                .with_endpoint(endpoint.clone())
                .with_allow_http(allow_http);
        }

        let store = builder
            .build()
            .map_err(|e| StorageError::ConfigError(e.to_string()))?;

        Ok(S3Gateway {
            store,
            bucket,
            endpoint_url,
        })
    }
}

#[async_trait]
impl ObjectGateway for S3Gateway {
    async fn put_object(&self, key: &str, data: Bytes, _content_type: &str) -> StorageResult<()> {
        keys::validate_key(key)?;
        let size = data.len() as u64;
        let location = Path::from(key.to_string());

        let start = std::time::Instant::now();

        // put replaces any existing object under the key: upsert by design
        // of the backend, no existence check wanted here.
        let result: ObjectResult<_> = self.store.put(&location, PutPayload::from(data)).await;

        result.map_err(|e| {
            tracing::error!(
                error = %e,
                bucket = %self.bucket,
                key = %key,
                "S3 put failed"
            );
            StorageError::UploadFailed(e.to_string())
        })?;

        tracing::info!(
            bucket = %self.bucket,
            key = %key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 put successful"
        );

        Ok(())
    }

    async fn signed_url(&self, key: &str, expires_in: Duration) -> StorageResult<String> {
        keys::validate_key(key)?;
        let location = Path::from(key.to_string());

        // Presigning is a local computation and would sign a URL for an
        // absent key without complaint, so existence is checked first.
        match self.store.head(&location).await {
            Ok(_) => {}
            Err(ObjectStoreError::NotFound { .. }) => {
                return Err(StorageError::NotFound(key.to_string()));
            }
            Err(e) => return Err(StorageError::SignFailed(e.to_string())),
        }

        let url_result: ObjectResult<_> = self
            .store
            .signed_url(Method::GET, &location, expires_in)
            .await;

        let url = url_result
            .map_err(|e| StorageError::SignFailed(e.to_string()))?
            .to_string();

        tracing::debug!(
            bucket = %self.bucket,
            key = %key,
            expires_in_secs = expires_in.as_secs(),
            "S3 signed URL issued"
        );

        Ok(url)
    }

    async fn list_prefix(&self, prefix: &str) -> StorageResult<Vec<ObjectSummary>> {
        keys::validate_key(prefix)?;
        let prefix_path = Path::from(prefix.to_string());

        // Delimiter listing returns direct children only; nested prefixes
        // surface as common_prefixes and are ignored.
        let result: ObjectResult<_> = self.store.list_with_delimiter(Some(&prefix_path)).await;
        let listing = result.map_err(|e| {
            tracing::error!(
                error = %e,
                bucket = %self.bucket,
                prefix = %prefix,
                "S3 list failed"
            );
            StorageError::ListFailed(e.to_string())
        })?;

        let summaries = listing
            .objects
            .into_iter()
            .filter(|meta| !keys::is_keep_marker(meta.location.as_ref()))
            .map(|meta| {
                let key = meta.location.to_string();
                let name = keys::display_name(&key).to_string();
                ObjectSummary {
                    key,
                    name,
                    size: meta.size,
                    last_modified: Some(meta.last_modified),
                }
            })
            .collect();

        Ok(summaries)
    }

    async fn remove_prefix(&self, prefix: &str) -> StorageResult<u64> {
        keys::validate_key(prefix)?;
        let prefix_path = Path::from(prefix.to_string());
        let start = std::time::Instant::now();

        let result: ObjectResult<_> = self.store.list_with_delimiter(Some(&prefix_path)).await;
        let listing = result.map_err(|e| StorageError::ListFailed(e.to_string()))?;

        // Best effort: a failed delete is logged and skipped so a partial
        // purge still removes what it can.
        let mut removed = 0u64;
        for meta in listing.objects {
            match self.store.delete(&meta.location).await {
                Ok(()) => removed += 1,
                Err(ObjectStoreError::NotFound { .. }) => {}
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        bucket = %self.bucket,
                        key = %meta.location,
                        "S3 delete failed during prefix purge"
                    );
                }
            }
        }

        tracing::info!(
            bucket = %self.bucket,
            prefix = %prefix,
            removed_objects = removed,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 prefix purge finished"
        );

        Ok(removed)
    }

    async fn exists(&self, key: &str) -> StorageResult<bool> {
        keys::validate_key(key)?;
        let location = Path::from(key.to_string());
        match self.store.head(&location).await {
            Ok(_) => Ok(true),
            Err(ObjectStoreError::NotFound { .. }) => Ok(false),
            Err(e) => Err(StorageError::BackendError(e.to_string())),
        }
    }

    fn backend_kind(&self) -> StorageBackend {
        StorageBackend::S3
    }
}

impl std::fmt::Debug for S3Gateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("S3Gateway")
            .field("bucket", &self.bucket)
            .field("endpoint_url", &self.endpoint_url)
            .finish_non_exhaustive()
    }
}

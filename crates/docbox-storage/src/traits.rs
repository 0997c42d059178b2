//! Storage abstraction trait
//!
//! This module defines the ObjectGateway trait that all storage backends
//! must implement.

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use docbox_core::StorageBackend;
use std::time::Duration;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Signing failed: {0}")]
    SignFailed(String),

    #[error("Listing failed: {0}")]
    ListFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Metadata for one stored object, as returned by prefix listings.
#[derive(Debug, Clone)]
pub struct ObjectSummary {
    /// Full storage key (`{cnpj}/{name}`).
    pub key: String,
    /// Last key segment: the display name.
    pub name: String,
    pub size: u64,
    pub last_modified: Option<DateTime<Utc>>,
}

/// Object storage abstraction.
///
/// All backends (S3-compatible, local filesystem) implement this trait so the
/// handlers and the file registry never couple to a concrete service.
///
/// **Key format:** `{cnpj}/{display name}`; see the crate root documentation.
#[async_trait]
pub trait ObjectGateway: Send + Sync {
    /// Write an object. Upsert semantics are mandatory: a re-put of an
    /// existing key replaces the content and must never fail as
    /// "already exists".
    async fn put_object(&self, key: &str, data: Bytes, content_type: &str) -> StorageResult<()>;

    /// Issue a time-limited read URL for one object.
    ///
    /// Fails with `NotFound` when the key has no backing object; the check
    /// runs before signing because S3-style signing is a local computation
    /// that would happily sign a URL for nothing.
    async fn signed_url(&self, key: &str, expires_in: Duration) -> StorageResult<String>;

    /// Non-recursive listing of the direct children of `prefix`.
    /// The `.keep` namespace marker is never included.
    async fn list_prefix(&self, prefix: &str) -> StorageResult<Vec<ObjectSummary>>;

    /// Best-effort bulk delete of everything under `prefix`; returns how many
    /// objects were removed. Individual failures are logged and skipped so a
    /// partial purge still removes what it can.
    async fn remove_prefix(&self, prefix: &str) -> StorageResult<u64>;

    /// Check if an object exists
    async fn exists(&self, key: &str) -> StorageResult<bool>;

    /// Get the storage backend type
    fn backend_kind(&self) -> StorageBackend;
}

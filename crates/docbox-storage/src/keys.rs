//! Shared key construction and validation for storage backends.
//!
//! Key format: `{cnpj}/{display name}`. The namespace marker is
//! `{cnpj}/.keep`. All backends must use these helpers for consistency.

use crate::traits::{StorageError, StorageResult};
pub use docbox_core::validation::KEEP_MARKER;

/// Build the storage key for a tenant's file.
pub fn object_key(cnpj: &str, nome: &str) -> String {
    format!("{}/{}", cnpj, nome)
}

/// Build the namespace marker key for a tenant.
pub fn keep_key(cnpj: &str) -> String {
    format!("{}/{}", cnpj, KEEP_MARKER)
}

/// Last key segment: the display name.
pub fn display_name(key: &str) -> &str {
    key.rsplit('/').next().unwrap_or(key)
}

/// True when the key is a namespace marker (by display name).
pub fn is_keep_marker(key: &str) -> bool {
    display_name(key) == KEEP_MARKER
}

/// Validate a key (or prefix) before it reaches any backend.
///
/// Traversal sequences, backslashes, leading slashes, and empty segments are
/// rejected here so no backend has to trust its caller.
pub fn validate_key(key: &str) -> StorageResult<()> {
    if key.is_empty() {
        return Err(StorageError::InvalidKey("empty key".to_string()));
    }
    if key.starts_with('/') || key.contains('\\') || key.contains('\0') {
        return Err(StorageError::InvalidKey(format!(
            "key contains invalid characters: {}",
            key
        )));
    }
    if key.split('/').any(|segment| segment.is_empty() || segment == "..") {
        return Err(StorageError::InvalidKey(format!(
            "key resolves outside its namespace: {}",
            key
        )));
    }
    Ok(())
}

//! Docbox Storage Library
//!
//! Object-storage abstraction and implementations. The [`ObjectGateway`]
//! trait covers exactly what the file registry needs: upsert writes, signed
//! read URLs, prefix listing, and best-effort prefix removal.
//!
//! # Storage key format
//!
//! Keys are tenant-scoped: `{cnpj}/{display name}`, one path level per
//! tenant. A zero-byte `{cnpj}/.keep` marker materializes the namespace at
//! registration time and is excluded from every listing. Keys must not
//! contain `..`, a leading `/`, or empty segments; key construction and
//! validation are centralized in the `keys` module so all backends stay
//! consistent.

pub mod factory;
pub mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use docbox_core::StorageBackend;
pub use factory::create_gateway;
#[cfg(feature = "storage-local")]
pub use local::LocalGateway;
#[cfg(feature = "storage-s3")]
pub use s3::S3Gateway;
pub use traits::{ObjectGateway, ObjectSummary, StorageError, StorageResult};

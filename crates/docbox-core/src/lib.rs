//! Docbox Core Library
//!
//! This crate provides the domain models, error types, configuration, and
//! validation shared across all Docbox components.

pub mod config;
pub mod error;
pub mod models;
pub mod password;
pub mod validation;

// Re-export commonly used types
pub use config::{Config, StorageBackend};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use models::{Arquivo, Empresa, EmpresaSummary, Identity};

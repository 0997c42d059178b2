//! Error types module
//!
//! This module provides the core error types used throughout the Docbox
//! application. All errors are unified under the `AppError` enum, which can
//! represent database, storage, authentication, and validation failures.
//!
//! The `Database` variant and `From<sqlx::Error>` are gated behind the `sqlx`
//! feature so that crates which never touch the database can depend on this
//! crate without pulling sqlx in.

#[cfg(feature = "sqlx")]
use sqlx::Error as SqlxError;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for recoverable issues
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented.
/// Errors self-describe their HTTP response characteristics so the route
/// boundary never has to match on variants.
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "DUPLICATE_KEY")
    fn error_code(&self) -> &'static str;

    /// Client-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Unique-constraint violation on register (cnpj or email already taken)
    #[error("Duplicate key: {0}")]
    DuplicateKey(String),

    /// Unknown login identifier or wrong password. Carries no detail:
    /// the two cases are indistinguishable to the caller.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden")]
    Forbidden,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Upload error: {0}")]
    Upload(String),

    #[error("Signing error: {0}")]
    Sign(String),

    #[cfg(feature = "sqlx")]
    #[error("Database error: {0}")]
    Database(#[source] SqlxError),

    #[cfg(not(feature = "sqlx"))]
    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

#[cfg(feature = "sqlx")]
impl From<SqlxError> for AppError {
    fn from(err: SqlxError) -> Self {
        AppError::Database(err)
    }
}

fn app_error_static_metadata(err: &AppError) -> (u16, &'static str, LogLevel) {
    match err {
        AppError::DuplicateKey(_) => (409, "DUPLICATE_KEY", LogLevel::Debug),
        AppError::InvalidCredentials => (401, "INVALID_CREDENTIALS", LogLevel::Debug),
        AppError::Unauthorized => (401, "UNAUTHORIZED", LogLevel::Debug),
        AppError::Forbidden => (403, "FORBIDDEN", LogLevel::Debug),
        AppError::NotFound(_) => (404, "NOT_FOUND", LogLevel::Debug),
        AppError::Validation(_) => (400, "VALIDATION_ERROR", LogLevel::Debug),
        AppError::Upload(_) => (500, "UPLOAD_ERROR", LogLevel::Error),
        AppError::Sign(_) => (500, "SIGN_ERROR", LogLevel::Error),
        AppError::Database(_) => (500, "DATABASE_ERROR", LogLevel::Error),
        AppError::Internal(_) => (500, "INTERNAL_ERROR", LogLevel::Error),
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        app_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).1
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).2
    }

    fn client_message(&self) -> String {
        match self {
            AppError::DuplicateKey(ref msg) => msg.clone(),
            AppError::InvalidCredentials => "Usuário ou senha inválidos".to_string(),
            AppError::Unauthorized => "Não autenticado".to_string(),
            AppError::Forbidden => "Acesso negado".to_string(),
            AppError::NotFound(ref msg) => msg.clone(),
            AppError::Validation(ref msg) => msg.clone(),
            // Internal detail (bucket names, SQL) stays out of responses.
            AppError::Upload(_) => "Erro no upload".to_string(),
            AppError::Sign(_) => "Erro ao gerar link de download".to_string(),
            AppError::Database(_) => "Erro ao acessar o banco de dados".to_string(),
            AppError::Internal(_) => "Erro interno".to_string(),
        }
    }
}

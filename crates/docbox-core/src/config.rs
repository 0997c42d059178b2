//! Configuration module
//!
//! All runtime settings are read from the environment (a `.env` file is
//! honored in development). `Config::from_env()` applies defaults;
//! `Config::validate()` fails fast on inconsistent settings so a
//! misconfigured process never starts serving.

use std::env;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_SESSION_TTL_SECS: u64 = 86_400;
const DEFAULT_SIGNED_URL_TTL_SECS: u64 = 3_600;
const DEFAULT_BCRYPT_COST: u32 = 10;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

/// Storage backend types
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    S3,
    Local,
}

impl FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "s3" => Ok(StorageBackend::S3),
            "local" => Ok(StorageBackend::Local),
            _ => Err(anyhow::anyhow!("Invalid storage backend: {}", s)),
        }
    }
}

impl Display for StorageBackend {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            StorageBackend::S3 => write!(f, "s3"),
            StorageBackend::Local => write!(f, "local"),
        }
    }
}

/// Application configuration, constructed once at startup and passed
/// explicitly to every component that needs it.
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub database_url: String,
    pub db_max_connections: u32,
    // Storage configuration
    pub storage_backend: StorageBackend,
    pub s3_bucket: Option<String>,
    pub s3_region: Option<String>,
    /// Custom endpoint for S3-compatible providers (MinIO, Supabase Storage, Spaces).
    pub s3_endpoint: Option<String>,
    pub local_storage_path: Option<String>,
    pub local_storage_base_url: Option<String>,
    // Sessions and signed URLs
    pub session_ttl_secs: u64,
    pub signed_url_ttl_secs: u64,
    /// Session cookies carry `Secure` only when true; the stock deployment
    /// serves plain HTTP behind the market's intranet.
    pub cookie_secure: bool,
    // Credentials
    pub bcrypt_cost: u32,
    /// Seed admin credential. The defaults (admin@ceasa.com / ceasa123) are
    /// the shipped bootstrap pair; production must override ADMIN_EMAIL and
    /// ADMIN_SENHA_HASH (mint one with the gera-hash bin).
    pub admin_email: String,
    pub admin_senha: Option<String>,
    pub admin_senha_hash: Option<String>,
    // Uploads
    pub max_upload_bytes: usize,
    pub environment: String,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        Ok(Config {
            server_port: env::var("PORT")
                .unwrap_or_else(|_| DEFAULT_PORT.to_string())
                .parse()?,
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://docbox.sqlite?mode=rwc".to_string()),
            db_max_connections: env::var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| DEFAULT_DB_MAX_CONNECTIONS.to_string())
                .parse()?,
            storage_backend: env::var("STORAGE_BACKEND")
                .unwrap_or_else(|_| "local".to_string())
                .parse()?,
            s3_bucket: env::var("S3_BUCKET").ok(),
            s3_region: env::var("S3_REGION")
                .or_else(|_| env::var("AWS_REGION"))
                .ok(),
            s3_endpoint: env::var("S3_ENDPOINT").ok(),
            local_storage_path: env::var("LOCAL_STORAGE_PATH").ok(),
            local_storage_base_url: env::var("LOCAL_STORAGE_BASE_URL").ok(),
            session_ttl_secs: env::var("SESSION_TTL_SECS")
                .unwrap_or_else(|_| DEFAULT_SESSION_TTL_SECS.to_string())
                .parse()?,
            signed_url_ttl_secs: env::var("SIGNED_URL_TTL_SECS")
                .unwrap_or_else(|_| DEFAULT_SIGNED_URL_TTL_SECS.to_string())
                .parse()?,
            cookie_secure: env::var("COOKIE_SECURE")
                .unwrap_or_else(|_| "false".to_string())
                .parse()?,
            bcrypt_cost: env::var("BCRYPT_COST")
                .unwrap_or_else(|_| DEFAULT_BCRYPT_COST.to_string())
                .parse()?,
            admin_email: env::var("ADMIN_EMAIL")
                .unwrap_or_else(|_| "admin@ceasa.com".to_string()),
            admin_senha: env::var("ADMIN_SENHA").ok(),
            admin_senha_hash: env::var("ADMIN_SENHA_HASH").ok(),
            max_upload_bytes: env::var("MAX_UPLOAD_BYTES")
                .unwrap_or_else(|_| DEFAULT_MAX_UPLOAD_BYTES.to_string())
                .parse()?,
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
        })
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if !self.database_url.starts_with("sqlite:") {
            return Err(anyhow::anyhow!(
                "DATABASE_URL must be a valid SQLite connection string"
            ));
        }

        match self.storage_backend {
            StorageBackend::S3 => {
                if self.s3_bucket.is_none() {
                    return Err(anyhow::anyhow!(
                        "S3_BUCKET must be set when using S3 storage backend"
                    ));
                }
                if self.s3_region.is_none() {
                    return Err(anyhow::anyhow!(
                        "S3_REGION or AWS_REGION must be set when using S3 storage backend"
                    ));
                }
            }
            StorageBackend::Local => {
                if self.local_storage_path.is_none() {
                    return Err(anyhow::anyhow!(
                        "LOCAL_STORAGE_PATH must be set when using local storage backend"
                    ));
                }
                if self.local_storage_base_url.is_none() {
                    return Err(anyhow::anyhow!(
                        "LOCAL_STORAGE_BASE_URL must be set when using local storage backend"
                    ));
                }
            }
        }

        if !(4..=31).contains(&self.bcrypt_cost) {
            return Err(anyhow::anyhow!("BCRYPT_COST must be between 4 and 31"));
        }

        if self.admin_email.is_empty() {
            return Err(anyhow::anyhow!("ADMIN_EMAIL must not be empty"));
        }

        Ok(())
    }

    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }
}

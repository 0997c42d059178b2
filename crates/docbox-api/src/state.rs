//! Application state shared across handlers.

use std::sync::Arc;

use docbox_core::Config;
use docbox_db::{ArquivoRepository, EmpresaRepository};
use docbox_storage::ObjectGateway;
use sqlx::SqlitePool;

use crate::auth::session::SessionStore;

/// Shared application state, built once at startup and handed to the router.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub pool: SqlitePool,
    pub empresas: EmpresaRepository,
    pub arquivos: ArquivoRepository,
    pub storage: Arc<dyn ObjectGateway>,
    pub sessions: SessionStore,
    /// Bcrypt hash the admin login is verified against. Resolved once at
    /// startup from `ADMIN_SENHA_HASH` (or hashed from the seed password).
    pub admin_senha_hash: String,
}

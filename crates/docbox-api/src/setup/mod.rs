//! Application setup and initialization.

pub mod database;
pub mod routes;
pub mod server;
pub mod storage;

use std::sync::Arc;

use anyhow::{Context, Result};
use docbox_core::{password, Config};
use docbox_db::{ArquivoRepository, EmpresaRepository};
use docbox_storage::ObjectGateway;
use sqlx::SqlitePool;

use crate::auth::session::SessionStore;
use crate::state::AppState;

const SESSION_SWEEP_INTERVAL_SECS: u64 = 300;

/// Seed admin password, hashed at startup unless `ADMIN_SENHA_HASH` is set.
/// Production deployments override it (mint a hash with the gera-hash bin).
const BOOTSTRAP_ADMIN_SENHA: &str = "ceasa123";

/// Initialize the entire application: validate config, connect the stores,
/// build the shared state, and wire the router.
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    config
        .validate()
        .context("Configuration validation failed")?;

    crate::telemetry::init_telemetry();

    tracing::info!(
        environment = %config.environment,
        "Configuration loaded and validated successfully"
    );

    let pool = database::setup_database(&config).await?;
    let storage = storage::setup_storage(&config).await?;
    let state = build_state(&config, pool, storage)?;

    state.sessions.spawn_sweeper(SESSION_SWEEP_INTERVAL_SECS);

    let router = routes::setup_routes(&config, state.clone());

    Ok((state, router))
}

fn build_state(
    config: &Config,
    pool: SqlitePool,
    storage: Arc<dyn ObjectGateway>,
) -> Result<Arc<AppState>> {
    let admin_senha_hash = admin_hash(config)?;
    let sessions = SessionStore::new(config.session_ttl_secs);

    Ok(Arc::new(AppState {
        config: config.clone(),
        empresas: EmpresaRepository::new(pool.clone()),
        arquivos: ArquivoRepository::new(pool.clone()),
        pool,
        storage,
        sessions,
        admin_senha_hash,
    }))
}

/// Resolve the admin credential hash once, so login never hashes the seed
/// password per request.
fn admin_hash(config: &Config) -> Result<String> {
    if let Some(ref hash) = config.admin_senha_hash {
        return Ok(hash.clone());
    }

    let senha = config
        .admin_senha
        .as_deref()
        .unwrap_or(BOOTSTRAP_ADMIN_SENHA);
    let hash = password::hash(senha, config.bcrypt_cost)
        .context("Failed to hash the admin seed password")?;

    Ok(hash)
}

//! Test helpers: build AppState and router for integration tests.
//!
//! Run from workspace root: `cargo test -p docbox-api --test auth_test` or
//! `cargo test -p docbox-api`. Migrations path: from the docbox-api crate
//! root, `../../migrations`.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum_test::{TestResponse, TestServer};
use base64::Engine;
use docbox_api::auth::session::SessionStore;
use docbox_api::setup::routes::setup_routes;
use docbox_api::state::AppState;
use docbox_core::{password, Config, StorageBackend};
use docbox_db::{ArquivoRepository, EmpresaRepository};
use docbox_storage::{LocalGateway, ObjectGateway};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use tempfile::TempDir;

pub const ADMIN_EMAIL: &str = "admin@ceasa.com";
pub const ADMIN_SENHA: &str = "ceasa123";
pub const TEST_SENHA: &str = "senha-forte-1";

/// Cost 4 keeps login/cadastro tests fast.
const TEST_BCRYPT_COST: u32 = 4;

/// Test application: server, pool, and owned resources.
pub struct TestApp {
    pub server: TestServer,
    pub pool: SqlitePool,
    /// Root directory the LocalGateway writes objects under.
    pub storage_dir: PathBuf,
    _temp_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    /// Filesystem path of one stored object.
    pub fn object_path(&self, cnpj: &str, nome: &str) -> PathBuf {
        self.storage_dir.join(cnpj).join(nome)
    }
}

/// Setup a test app with an in-memory database and tempdir-backed storage.
pub async fn setup_test_app() -> TestApp {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let storage_dir = temp_dir.path().join("objects");

    // :memory: gives every connection its own database, so the pool is
    // pinned to a single connection.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to connect to test database");

    sqlx::migrate!("../../migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    let storage: Arc<dyn ObjectGateway> = Arc::new(
        LocalGateway::new(
            storage_dir.clone(),
            "http://localhost:3000/arquivos".to_string(),
        )
        .await
        .expect("Failed to create local storage"),
    );

    let config = test_config(&storage_dir);
    let admin_senha_hash =
        password::hash(ADMIN_SENHA, TEST_BCRYPT_COST).expect("Failed to hash admin senha");

    let state = Arc::new(AppState {
        config: config.clone(),
        pool: pool.clone(),
        empresas: EmpresaRepository::new(pool.clone()),
        arquivos: ArquivoRepository::new(pool.clone()),
        storage,
        sessions: SessionStore::new(config.session_ttl_secs),
        admin_senha_hash,
    });

    let app = setup_routes(&config, state);
    let server =
        TestServer::new(app.into_make_service()).expect("Failed to create test server");

    TestApp {
        server,
        pool,
        storage_dir,
        _temp_dir: temp_dir,
    }
}

fn test_config(storage_dir: &std::path::Path) -> Config {
    Config {
        server_port: 0,
        database_url: "sqlite::memory:".to_string(),
        db_max_connections: 1,
        storage_backend: StorageBackend::Local,
        s3_bucket: None,
        s3_region: None,
        s3_endpoint: None,
        local_storage_path: Some(storage_dir.display().to_string()),
        local_storage_base_url: Some("http://localhost:3000/arquivos".to_string()),
        session_ttl_secs: 3_600,
        signed_url_ttl_secs: 60,
        cookie_secure: false,
        bcrypt_cost: TEST_BCRYPT_COST,
        admin_email: ADMIN_EMAIL.to_string(),
        admin_senha: Some(ADMIN_SENHA.to_string()),
        admin_senha_hash: None,
        max_upload_bytes: 10 * 1024 * 1024,
        environment: "test".to_string(),
    }
}

/// The `name=value` pair of the session cookie set by `response`.
pub fn session_cookie(response: &TestResponse) -> String {
    let set_cookie = response
        .header("set-cookie")
        .to_str()
        .expect("set-cookie should be valid ascii")
        .to_string();
    set_cookie
        .split(';')
        .next()
        .expect("set-cookie should carry a name=value pair")
        .to_string()
}

/// The Location header of a redirect response.
pub fn location(response: &TestResponse) -> String {
    response
        .header("location")
        .to_str()
        .expect("location should be valid ascii")
        .to_string()
}

/// Register an empresa through the API and return its row id.
pub async fn register_empresa(app: &TestApp, nome: &str, cnpj: &str, email: &str) -> i64 {
    let response = app
        .server
        .post("/cadastro")
        .json(&serde_json::json!({
            "nome": nome,
            "cnpj": cnpj,
            "box": "B-12",
            "email": email,
            "senha": TEST_SENHA,
        }))
        .await;
    assert_eq!(response.status_code(), 303);

    sqlx::query_scalar::<sqlx::Sqlite, i64>("SELECT id FROM empresas WHERE cnpj = ?")
        .bind(cnpj)
        .fetch_one(&app.pool)
        .await
        .expect("registered empresa should have a row")
}

/// Log in and return the session cookie pair to send on later requests.
pub async fn login(app: &TestApp, email: &str, senha: &str) -> String {
    let response = app
        .server
        .post("/login")
        .json(&serde_json::json!({ "email": email, "senha": senha }))
        .await;
    assert_eq!(response.status_code(), 303);
    session_cookie(&response)
}

pub async fn login_admin(app: &TestApp) -> String {
    login(app, ADMIN_EMAIL, ADMIN_SENHA).await
}

/// Upload a file through the JSON base64 body as the admin.
pub async fn upload_pdf(
    app: &TestApp,
    admin_cookie: &str,
    empresa_id: i64,
    nome: &str,
    content: &[u8],
) {
    let conteudo = base64::engine::general_purpose::STANDARD.encode(content);
    let response = app
        .server
        .post(&format!("/upload/{}", empresa_id))
        .add_header("cookie", admin_cookie.to_string())
        .json(&serde_json::json!({ "nomeArquivo": nome, "conteudo": conteudo }))
        .await;
    assert_eq!(response.status_code(), 200);
    assert_eq!(response.text(), "Arquivo enviado com sucesso.");
}

//! Database repositories for the file registry.
//!
//! Each repository owns one table and provides the queries the API layer
//! needs. Tenant rows live in `empresas`, file metadata in `arquivos`;
//! object bytes never touch the database, only storage keys do.

pub mod arquivo;
pub mod empresa;

pub use arquivo::ArquivoRepository;
pub use empresa::EmpresaRepository;

#[cfg(test)]
pub(crate) async fn test_pool() -> sqlx::SqlitePool {
    // :memory: gives every connection its own database, so the pool is
    // pinned to a single connection.
    let pool = sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    sqlx::migrate!("../../migrations").run(&pool).await.unwrap();
    pool
}

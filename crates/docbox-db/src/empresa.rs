use docbox_core::{AppError, Empresa, EmpresaSummary};
use sqlx::{Sqlite, SqlitePool};

/// Repository for managing empresas (tenants)
#[derive(Clone)]
pub struct EmpresaRepository {
    pool: SqlitePool,
}

impl EmpresaRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Register a new empresa, returning its id
    ///
    /// The password must already be hashed; this layer never sees plaintext.
    #[tracing::instrument(skip(self, senha_hash), fields(db.table = "empresas", db.operation = "insert"))]
    pub async fn register(
        &self,
        nome: &str,
        cnpj: &str,
        r#box: Option<&str>,
        email: &str,
        senha_hash: &str,
    ) -> Result<i64, AppError> {
        // Pre-check for the friendly 409; the UNIQUE constraints remain the
        // backstop if a concurrent insert slips through.
        let taken = sqlx::query_scalar::<Sqlite, bool>(
            "SELECT EXISTS(SELECT 1 FROM empresas WHERE cnpj = ? OR email = ?)",
        )
        .bind(cnpj)
        .bind(email)
        .fetch_one(&self.pool)
        .await?;

        if taken {
            return Err(AppError::DuplicateKey(
                "CNPJ ou email já cadastrado".to_string(),
            ));
        }

        let id = sqlx::query_scalar::<Sqlite, i64>(
            r#"
            INSERT INTO empresas (nome, cnpj, box, email, senha_hash)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(nome)
        .bind(cnpj)
        .bind(r#box)
        .bind(email)
        .bind(senha_hash)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    /// Look up an empresa by login email
    #[tracing::instrument(skip(self), fields(db.table = "empresas", db.operation = "select"))]
    pub async fn find_by_email(&self, email: &str) -> Result<Option<Empresa>, AppError> {
        let empresa = sqlx::query_as::<Sqlite, Empresa>(
            "SELECT id, nome, cnpj, box, email, senha_hash FROM empresas WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(empresa)
    }

    /// Get empresa by id
    #[tracing::instrument(skip(self), fields(db.table = "empresas", db.operation = "select", db.record_id = %id))]
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Empresa>, AppError> {
        let empresa = sqlx::query_as::<Sqlite, Empresa>(
            "SELECT id, nome, cnpj, box, email, senha_hash FROM empresas WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(empresa)
    }

    /// List all empresas for the admin panel, without credentials
    #[tracing::instrument(skip(self), fields(db.table = "empresas", db.operation = "select"))]
    pub async fn list_summaries(&self) -> Result<Vec<EmpresaSummary>, AppError> {
        let empresas = sqlx::query_as::<Sqlite, EmpresaSummary>(
            "SELECT id, nome, cnpj, box FROM empresas ORDER BY nome ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(empresas)
    }

    /// Delete an empresa together with its file rows
    ///
    /// Returns false when no empresa had that id. Object-storage cleanup is
    /// the caller's responsibility and happens outside this transaction.
    #[tracing::instrument(skip(self), fields(db.table = "empresas", db.operation = "delete", db.record_id = %id))]
    pub async fn delete_with_arquivos(&self, id: i64) -> Result<bool, AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM arquivos WHERE empresa_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let rows_affected = sqlx::query("DELETE FROM empresas WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await?;

        Ok(rows_affected > 0)
    }
}

use docbox_core::{AppError, Arquivo};
use sqlx::{Sqlite, SqlitePool};

/// Repository for managing file metadata rows
#[derive(Clone)]
pub struct ArquivoRepository {
    pool: SqlitePool,
}

impl ArquivoRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Record an upload, returning the row id
    ///
    /// Re-uploading the same display name for the same empresa replaces the
    /// existing row in place, mirroring the overwrite in object storage.
    #[tracing::instrument(skip(self), fields(db.table = "arquivos", db.operation = "insert", empresa_id = %empresa_id))]
    pub async fn record_upload(
        &self,
        empresa_id: i64,
        nome: &str,
        caminho: &str,
    ) -> Result<i64, AppError> {
        let id = sqlx::query_scalar::<Sqlite, i64>(
            r#"
            INSERT INTO arquivos (empresa_id, nome, caminho)
            VALUES (?, ?, ?)
            ON CONFLICT (empresa_id, nome)
            DO UPDATE SET
                caminho = EXCLUDED.caminho,
                data_upload = datetime('now')
            RETURNING id
            "#,
        )
        .bind(empresa_id)
        .bind(nome)
        .bind(caminho)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    /// List file rows for an empresa, newest upload first
    ///
    /// `mes` ("01".."12") and `ano` ("2024") filter on the upload timestamp;
    /// both are pre-validated two/four digit strings.
    #[tracing::instrument(skip(self), fields(db.table = "arquivos", db.operation = "select", empresa_id = %empresa_id))]
    pub async fn list_for_empresa(
        &self,
        empresa_id: i64,
        mes: Option<&str>,
        ano: Option<&str>,
    ) -> Result<Vec<Arquivo>, AppError> {
        let arquivos = match (mes, ano) {
            (None, None) => {
                sqlx::query_as::<Sqlite, Arquivo>(
                    "SELECT id, empresa_id, nome, caminho, data_upload FROM arquivos \
                     WHERE empresa_id = ? ORDER BY data_upload DESC, nome ASC",
                )
                .bind(empresa_id)
                .fetch_all(&self.pool)
                .await?
            }
            (Some(mes), None) => {
                sqlx::query_as::<Sqlite, Arquivo>(
                    "SELECT id, empresa_id, nome, caminho, data_upload FROM arquivos \
                     WHERE empresa_id = ? AND strftime('%m', data_upload) = ? \
                     ORDER BY data_upload DESC, nome ASC",
                )
                .bind(empresa_id)
                .bind(mes)
                .fetch_all(&self.pool)
                .await?
            }
            (None, Some(ano)) => {
                sqlx::query_as::<Sqlite, Arquivo>(
                    "SELECT id, empresa_id, nome, caminho, data_upload FROM arquivos \
                     WHERE empresa_id = ? AND strftime('%Y', data_upload) = ? \
                     ORDER BY data_upload DESC, nome ASC",
                )
                .bind(empresa_id)
                .bind(ano)
                .fetch_all(&self.pool)
                .await?
            }
            (Some(mes), Some(ano)) => {
                sqlx::query_as::<Sqlite, Arquivo>(
                    "SELECT id, empresa_id, nome, caminho, data_upload FROM arquivos \
                     WHERE empresa_id = ? AND strftime('%m', data_upload) = ? \
                     AND strftime('%Y', data_upload) = ? \
                     ORDER BY data_upload DESC, nome ASC",
                )
                .bind(empresa_id)
                .bind(mes)
                .bind(ano)
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(arquivos)
    }
}

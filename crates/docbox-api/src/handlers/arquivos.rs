//! File listings with signed download URLs.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use chrono::NaiveDateTime;
use docbox_core::{validation, AppError, Empresa};
use docbox_storage::{ObjectGateway, StorageError};
use serde::{Deserialize, Serialize};

use crate::auth::{RequireAdmin, RequireEmpresa};
use crate::error::HttpAppError;
use crate::state::AppState;

/// One listed file, as the frontend consumes it.
#[derive(Debug, Serialize)]
pub struct ArquivoEntry {
    pub name: String,
    #[serde(rename = "uploadDate")]
    pub upload_date: NaiveDateTime,
    pub url: String,
}

/// Optional month/year filter. Empty strings count as absent because the
/// filter form submits both fields regardless.
#[derive(Debug, Deserialize)]
pub struct PeriodoQuery {
    pub mes: Option<String>,
    pub ano: Option<String>,
}

impl PeriodoQuery {
    /// Shape-check the filters before any query runs.
    fn validated(self) -> Result<(Option<String>, Option<String>), AppError> {
        let mes = self.mes.filter(|mes| !mes.is_empty());
        let ano = self.ano.filter(|ano| !ano.is_empty());

        if let Some(ref mes) = mes {
            validation::validate_mes(mes)?;
        }
        if let Some(ref ano) = ano {
            validation::validate_ano(ano)?;
        }
        Ok((mes, ano))
    }
}

/// `GET /meus-arquivos?mes=MM&ano=YYYY`
///
/// The admin has no tenant of their own, so this route is 403 for them.
#[tracing::instrument(skip(state, identity))]
pub async fn meus_arquivos(
    State(state): State<Arc<AppState>>,
    RequireEmpresa(identity): RequireEmpresa,
    Query(periodo): Query<PeriodoQuery>,
) -> Result<impl IntoResponse, HttpAppError> {
    let (mes, ano) = periodo.validated()?;
    let empresa_id = identity.empresa_id().ok_or(AppError::Forbidden)?;

    let empresa = find_empresa(&state, empresa_id).await?;
    let entries = listar_entries(&state, &empresa, mes.as_deref(), ano.as_deref()).await?;

    Ok(Json(entries))
}

/// `GET /arquivos/{empresa_id}?mes=MM&ano=YYYY` (admin panel data source)
#[tracing::instrument(skip(state, _admin))]
pub async fn arquivos_empresa(
    State(state): State<Arc<AppState>>,
    _admin: RequireAdmin,
    Path(empresa_id): Path<i64>,
    Query(periodo): Query<PeriodoQuery>,
) -> Result<impl IntoResponse, HttpAppError> {
    let (mes, ano) = periodo.validated()?;

    let empresa = find_empresa(&state, empresa_id).await?;
    let entries = listar_entries(&state, &empresa, mes.as_deref(), ano.as_deref()).await?;

    Ok(Json(entries))
}

/// Resolve a stored object key to a time-limited download URL.
pub async fn resolve_download_url(
    storage: &Arc<dyn ObjectGateway>,
    caminho: &str,
    ttl: Duration,
) -> Result<String, StorageError> {
    storage.signed_url(caminho, ttl).await
}

pub(crate) async fn find_empresa(
    state: &AppState,
    empresa_id: i64,
) -> Result<Empresa, HttpAppError> {
    state
        .empresas
        .find_by_id(empresa_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Empresa não encontrada".to_string()).into())
}

/// Build listing entries from registry rows, signing one URL per row.
///
/// A row whose backing object vanished (the accepted inconsistency window)
/// is skipped with a warning rather than failing the whole listing.
async fn listar_entries(
    state: &AppState,
    empresa: &Empresa,
    mes: Option<&str>,
    ano: Option<&str>,
) -> Result<Vec<ArquivoEntry>, HttpAppError> {
    let rows = state
        .arquivos
        .list_for_empresa(empresa.id, mes, ano)
        .await?;
    let ttl = Duration::from_secs(state.config.signed_url_ttl_secs);

    let mut entries = Vec::with_capacity(rows.len());
    for row in rows {
        match resolve_download_url(&state.storage, &row.caminho, ttl).await {
            Ok(url) => entries.push(ArquivoEntry {
                name: row.nome,
                upload_date: row.data_upload,
                url,
            }),
            Err(StorageError::NotFound(_)) => {
                tracing::warn!(
                    empresa_id = empresa.id,
                    storage_key = %row.caminho,
                    "Skipping registry row with no backing object"
                );
            }
            Err(e) => return Err(e.into()),
        }
    }

    Ok(entries)
}

//! Admin company management.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use crate::auth::RequireAdmin;
use crate::error::HttpAppError;
use crate::handlers::arquivos::find_empresa;
use crate::state::AppState;

/// `GET /empresas` returns summaries only: no password hash, no login email.
pub async fn listar_empresas(
    State(state): State<Arc<AppState>>,
    _admin: RequireAdmin,
) -> Result<impl IntoResponse, HttpAppError> {
    let empresas = state.empresas.list_summaries().await?;
    Ok(Json(empresas))
}

#[derive(Debug, Serialize)]
pub struct RemocaoResponse {
    pub message: String,
    pub removed_objects: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// `DELETE /empresas/{id}`
///
/// Rows go first, in one transaction; the object purge afterwards is best
/// effort and never fails the request. A purge failure surfaces as a
/// `warning` field on the 200.
#[tracing::instrument(skip(state, _admin))]
pub async fn remover_empresa(
    State(state): State<Arc<AppState>>,
    _admin: RequireAdmin,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, HttpAppError> {
    let empresa = find_empresa(&state, id).await?;

    state.empresas.delete_with_arquivos(id).await?;

    let (removed_objects, warning) = match state.storage.remove_prefix(&empresa.cnpj).await {
        Ok(count) => (count, None),
        Err(e) => {
            tracing::warn!(
                empresa_id = id,
                cnpj = %empresa.cnpj,
                error = %e,
                "Object purge failed after empresa delete"
            );
            (
                0,
                Some("Arquivos podem ter permanecido no armazenamento".to_string()),
            )
        }
    };

    tracing::info!(
        empresa_id = id,
        cnpj = %empresa.cnpj,
        removed_objects,
        "Empresa removida"
    );

    Ok(Json(RemocaoResponse {
        message: "Empresa removida com sucesso.".to_string(),
        removed_objects,
        warning,
    }))
}

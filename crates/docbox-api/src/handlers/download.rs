//! Per-file download redirect.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Path, State};
use axum::response::Redirect;
use docbox_core::{validation, AppError};
use docbox_storage::{keys, StorageError};

use crate::auth::RequireEmpresa;
use crate::error::HttpAppError;
use crate::handlers::arquivos::{find_empresa, resolve_download_url};
use crate::state::AppState;

/// `GET /download/{empresa_id}/{nome}`
///
/// Resolves `{cnpj}/{nome}` to a signed URL and redirects to it. Only the
/// owning empresa or the admin may hit a given tenant's files.
#[tracing::instrument(skip(state, identity))]
pub async fn download(
    State(state): State<Arc<AppState>>,
    RequireEmpresa(identity): RequireEmpresa,
    Path((empresa_id, nome)): Path<(i64, String)>,
) -> Result<Redirect, HttpAppError> {
    if !identity.is_admin() && identity.empresa_id() != Some(empresa_id) {
        return Err(AppError::Forbidden.into());
    }

    validation::validate_display_name(&nome)?;

    let empresa = find_empresa(&state, empresa_id).await?;
    let key = keys::object_key(&empresa.cnpj, &nome);
    let ttl = Duration::from_secs(state.config.signed_url_ttl_secs);

    let url = match resolve_download_url(&state.storage, &key, ttl).await {
        Ok(url) => url,
        Err(StorageError::NotFound(_)) => {
            return Err(AppError::NotFound("Arquivo não encontrado".to_string()).into());
        }
        Err(e) => return Err(e.into()),
    };

    tracing::debug!(empresa_id, storage_key = %key, "Download redirect issued");

    Ok(Redirect::to(&url))
}

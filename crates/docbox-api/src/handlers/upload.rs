//! Admin file upload into a company's namespace.

use std::sync::Arc;

use axum::extract::{FromRequest, Multipart, Path, Request, State};
use axum::http::header::CONTENT_TYPE;
use axum::Json;
use base64::Engine;
use bytes::Bytes;
use docbox_core::{validation, AppError};
use docbox_storage::keys;
use serde::Deserialize;

use crate::auth::RequireAdmin;
use crate::error::HttpAppError;
use crate::handlers::arquivos::find_empresa;
use crate::state::AppState;

const DEFAULT_CONTENT_TYPE: &str = "application/pdf";

/// JSON body variant; the field aliases keep older scripted clients working.
#[derive(Debug, Deserialize)]
pub struct UploadJson {
    #[serde(rename = "nomeArquivo", alias = "fileName")]
    nome_arquivo: String,
    /// Base64-encoded file content.
    #[serde(rename = "conteudo", alias = "content")]
    conteudo: String,
}

/// `POST /upload/{empresa_id}`
///
/// Accepts a multipart `arquivo` file field or the JSON base64 body. The
/// object is written first, the registry row second; a crash in between
/// leaves an object without a row, which is accepted, not reconciled.
#[tracing::instrument(skip(state, _admin, request))]
pub async fn upload(
    State(state): State<Arc<AppState>>,
    _admin: RequireAdmin,
    Path(empresa_id): Path<i64>,
    request: Request,
) -> Result<&'static str, HttpAppError> {
    let empresa = find_empresa(&state, empresa_id).await?;

    let content_type = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("");

    let (nome, data, object_content_type) = if content_type.starts_with("multipart/form-data") {
        extract_multipart(request, &state).await?
    } else {
        extract_json(request, &state).await?
    };

    validation::validate_display_name(&nome)?;
    if data.is_empty() {
        return Err(AppError::Validation("Arquivo vazio".to_string()).into());
    }

    let key = keys::object_key(&empresa.cnpj, &nome);

    state
        .storage
        .put_object(&key, data, &object_content_type)
        .await?;
    state.arquivos.record_upload(empresa.id, &nome, &key).await?;

    tracing::info!(empresa_id = empresa.id, storage_key = %key, "Upload stored");

    Ok("Arquivo enviado com sucesso.")
}

async fn extract_multipart(
    request: Request,
    state: &Arc<AppState>,
) -> Result<(String, Bytes, String), HttpAppError> {
    let mut multipart = Multipart::from_request(request, state)
        .await
        .map_err(|e| AppError::Validation(e.body_text()))?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(e.body_text()))?
    {
        if field.name() != Some("arquivo") {
            continue;
        }

        let nome = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| AppError::Validation("Campo arquivo sem nome de arquivo".to_string()))?;
        let content_type = field
            .content_type()
            .map(str::to_string)
            .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string());
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(e.body_text()))?;

        return Ok((nome, data, content_type));
    }

    Err(AppError::Validation("Campo arquivo ausente".to_string()).into())
}

async fn extract_json(
    request: Request,
    state: &Arc<AppState>,
) -> Result<(String, Bytes, String), HttpAppError> {
    let Json(payload) = Json::<UploadJson>::from_request(request, state)
        .await
        .map_err(HttpAppError::from)?;

    let decoded = base64::engine::general_purpose::STANDARD
        .decode(payload.conteudo.as_bytes())
        .map_err(|_| AppError::Validation("Conteúdo base64 inválido".to_string()))?;

    Ok((
        payload.nome_arquivo,
        Bytes::from(decoded),
        DEFAULT_CONTENT_TYPE.to_string(),
    ))
}

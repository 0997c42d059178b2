//! Company self-registration.

use std::sync::Arc;

use axum::extract::State;
use axum::response::Redirect;
use bytes::Bytes;
use docbox_core::{password, validation};
use docbox_storage::keys;
use serde::Deserialize;
use validator::Validate;

use crate::error::HttpAppError;
use crate::extract::ValidatedPayload;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct CadastroRequest {
    #[validate(length(min = 1, max = 120, message = "nome deve ter entre 1 e 120 caracteres"))]
    pub nome: String,
    pub cnpj: String,
    /// Stall/location tag; free text, optional.
    #[serde(default)]
    pub r#box: Option<String>,
    #[validate(email(message = "email inválido"))]
    pub email: String,
    #[validate(length(min = 6, max = 72, message = "senha deve ter entre 6 e 72 caracteres"))]
    pub senha: String,
}

/// `POST /cadastro`
///
/// Registers the company and materializes its storage namespace by writing
/// the `.keep` placeholder, so listings work before the first upload.
#[tracing::instrument(skip(state, payload))]
pub async fn cadastrar(
    State(state): State<Arc<AppState>>,
    ValidatedPayload(payload): ValidatedPayload<CadastroRequest>,
) -> Result<Redirect, HttpAppError> {
    let cnpj = validation::normalize_cnpj(&payload.cnpj)?;
    let senha_hash = password::hash(&payload.senha, state.config.bcrypt_cost)?;

    let empresa_id = state
        .empresas
        .register(
            payload.nome.trim(),
            &cnpj,
            payload.r#box.as_deref(),
            payload.email.trim(),
            &senha_hash,
        )
        .await?;

    state
        .storage
        .put_object(&keys::keep_key(&cnpj), Bytes::new(), "application/octet-stream")
        .await?;

    tracing::info!(empresa_id, cnpj = %cnpj, "Empresa registered");

    Ok(Redirect::to("/login.html"))
}

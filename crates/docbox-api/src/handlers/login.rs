//! Login and logout.

use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Redirect, Response};
use docbox_core::{password, AppError, ErrorMetadata, Identity};
use serde::Deserialize;
use validator::Validate;

use crate::auth::cookies;
use crate::error::HttpAppError;
use crate::extract::ValidatedPayload;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "email obrigatório"))]
    pub email: String,
    #[validate(length(min = 1, message = "senha obrigatória"))]
    pub senha: String,
}

/// `POST /login`
///
/// The admin pair is checked before any store lookup, so the admin can log
/// in even on an empty database. Unknown email and wrong password produce
/// the identical plain-text 401.
#[tracing::instrument(skip(state, payload))]
pub async fn login(
    State(state): State<Arc<AppState>>,
    ValidatedPayload(payload): ValidatedPayload<LoginRequest>,
) -> Result<Response, HttpAppError> {
    let email = payload.email.trim();

    if email == state.config.admin_email {
        return if password::verify(&payload.senha, &state.admin_senha_hash)? {
            tracing::info!("Admin login succeeded");
            Ok(login_success(&state, Identity::Admin, "/admin.html").await)
        } else {
            Ok(login_failure())
        };
    }

    let Some(empresa) = state.empresas.find_by_email(email).await? else {
        return Ok(login_failure());
    };

    if !password::verify(&payload.senha, &empresa.senha_hash)? {
        return Ok(login_failure());
    }

    tracing::info!(empresa_id = empresa.id, "Login succeeded");

    let identity = Identity::Empresa {
        empresa_id: empresa.id,
        cnpj: empresa.cnpj,
    };
    Ok(login_success(&state, identity, "/empresa.html").await)
}

/// `GET /logout`
///
/// Destroys the server-side session and expires the cookie; safe to call
/// without a session.
pub async fn logout(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    if let Some(token) = cookies::session_token(&headers) {
        state.sessions.destroy(&token).await;
    }

    let cookie = cookies::clear_session_cookie(state.config.cookie_secure);
    ([(header::SET_COOKIE, cookie)], Redirect::to("/")).into_response()
}

async fn login_success(state: &AppState, identity: Identity, target: &str) -> Response {
    let token = state.sessions.create(identity).await;
    let cookie = cookies::session_cookie(
        &token,
        state.config.session_ttl_secs,
        state.config.cookie_secure,
    );
    ([(header::SET_COOKIE, cookie)], Redirect::to(target)).into_response()
}

fn login_failure() -> Response {
    tracing::debug!("Login failed");
    // Plain text by interface contract; the message never distinguishes
    // unknown email from wrong password.
    (
        StatusCode::UNAUTHORIZED,
        AppError::InvalidCredentials.client_message(),
    )
        .into_response()
}

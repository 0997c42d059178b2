//! Identity extractors enforcing per-route access rules.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use docbox_core::{AppError, Identity};

use crate::error::HttpAppError;

fn identity_from(parts: &Parts) -> Identity {
    parts
        .extensions
        .get::<Identity>()
        .cloned()
        .unwrap_or(Identity::Anonymous)
}

/// The caller's identity as resolved by the `identify` middleware.
/// Always succeeds; callers without a session are `Anonymous`.
#[derive(Debug, Clone)]
pub struct CurrentIdentity(pub Identity);

impl<S> FromRequestParts<S> for CurrentIdentity
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(CurrentIdentity(identity_from(parts)))
    }
}

/// Authenticated caller: a logged-in empresa, or the admin acting on any
/// tenant route. Anonymous → 401.
#[derive(Debug, Clone)]
pub struct RequireEmpresa(pub Identity);

impl<S> FromRequestParts<S> for RequireEmpresa
where
    S: Send + Sync,
{
    type Rejection = HttpAppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let identity = identity_from(parts);
        if identity.is_anonymous() {
            return Err(AppError::Unauthorized.into());
        }
        Ok(RequireEmpresa(identity))
    }
}

/// Admin-only gate. Anonymous → 401; an authenticated empresa → 403.
#[derive(Debug, Clone, Copy)]
pub struct RequireAdmin;

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = HttpAppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match identity_from(parts) {
            Identity::Admin => Ok(RequireAdmin),
            Identity::Anonymous => Err(AppError::Unauthorized.into()),
            Identity::Empresa { .. } => Err(AppError::Forbidden.into()),
        }
    }
}

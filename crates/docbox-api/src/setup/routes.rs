//! Route configuration and setup.

use std::sync::Arc;

use axum::routing::{delete, get, post};
use axum::Router;
use docbox_core::Config;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::auth::middleware::identify;
use crate::handlers;
use crate::state::AppState;

/// Setup all application routes.
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Router {
    // Routes that never look at the caller's identity.
    let public_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/cadastro", post(handlers::cadastro::cadastrar))
        .route("/login", post(handlers::login::login));

    // Routes behind the identify middleware; the extractors enforce the
    // role per handler.
    let identified_routes = Router::new()
        .route("/", get(handlers::paginas::index))
        .route("/logout", get(handlers::login::logout))
        .route("/meus-arquivos", get(handlers::arquivos::meus_arquivos))
        .route("/upload/{empresa_id}", post(handlers::upload::upload))
        .route(
            "/arquivos/{empresa_id}",
            get(handlers::arquivos::arquivos_empresa),
        )
        .route(
            "/download/{empresa_id}/{nome}",
            get(handlers::download::download),
        )
        .route("/empresas", get(handlers::empresas::listar_empresas))
        .route("/empresas/{id}", delete(handlers::empresas::remover_empresa))
        .layer(axum::middleware::from_fn_with_state(state.clone(), identify));

    public_routes
        .merge(identified_routes)
        .layer(TraceLayer::new_for_http())
        .layer(RequestBodyLimitLayer::new(config.max_upload_bytes))
        .with_state(state)
}

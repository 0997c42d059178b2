//! Docbox API Library
//!
//! HTTP layer of the service: request handlers, session-based auth,
//! error-to-response conversion, and application setup. Everything here is
//! also reachable from the integration tests in `tests/`.

pub mod auth;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod setup;
pub mod state;
pub mod telemetry;

pub use error::{ErrorResponse, HttpAppError};
pub use state::AppState;

//! Session-based authentication.
//!
//! Login mints an opaque token kept server-side in [`session::SessionStore`]
//! and handed to the browser as an HttpOnly cookie. The [`middleware::identify`]
//! layer resolves the cookie to an [`docbox_core::Identity`] once per request;
//! the extractors enforce per-route access rules on top of it.

pub mod cookies;
pub mod extractors;
pub mod middleware;
pub mod session;

pub use extractors::{CurrentIdentity, RequireAdmin, RequireEmpresa};
pub use middleware::identify;
pub use session::{SessionStore, SESSION_COOKIE};

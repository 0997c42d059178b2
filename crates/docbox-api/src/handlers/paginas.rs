//! Landing redirect.

use axum::response::Redirect;
use docbox_core::Identity;

use crate::auth::CurrentIdentity;

/// Send each caller to the page for their role.
pub async fn index(CurrentIdentity(identity): CurrentIdentity) -> Redirect {
    match identity {
        Identity::Anonymous => Redirect::to("/login.html"),
        Identity::Empresa { .. } => Redirect::to("/empresa.html"),
        Identity::Admin => Redirect::to("/admin.html"),
    }
}

//! Session cookie construction and parsing.
//!
//! The cookie is HttpOnly and SameSite=Strict; `Secure` is appended only
//! when configured, because the stock deployment serves plain HTTP inside
//! the market's network.

use axum::http::{header, HeaderMap};

use super::session::SESSION_COOKIE;

/// Extract the session token from the request's Cookie header, if present.
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    let raw = headers.get(header::COOKIE)?.to_str().ok()?;

    raw.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == SESSION_COOKIE).then(|| value.to_string())
    })
}

/// Set-Cookie value establishing a session.
pub fn session_cookie(token: &str, ttl_secs: u64, secure: bool) -> String {
    let mut cookie = format!(
        "{}={}; Max-Age={}; Path=/; HttpOnly; SameSite=Strict",
        SESSION_COOKIE, token, ttl_secs
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Set-Cookie value that expires the session cookie (logout).
pub fn clear_session_cookie(secure: bool) -> String {
    let mut cookie = format!(
        "{}=; Max-Age=0; Path=/; HttpOnly; SameSite=Strict",
        SESSION_COOKIE
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

//! In-process session store.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use docbox_core::Identity;
use rand::Rng;
use tokio::sync::RwLock;

/// Cookie carrying the session token.
pub const SESSION_COOKIE: &str = "docbox_session";

#[derive(Debug, Clone)]
struct SessionEntry {
    identity: Identity,
    expires_at: DateTime<Utc>,
}

/// Session store keyed by opaque token, with TTL-based expiry.
///
/// Sessions live in process memory: a restart logs everyone out, which is
/// the intended behavior for this deployment. Expired entries are dropped
/// lazily on lookup and in bulk by the sweeper task.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<String, SessionEntry>>>,
    ttl_secs: u64,
}

impl SessionStore {
    pub fn new(ttl_secs: u64) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            ttl_secs,
        }
    }

    /// Create a session for `identity`, returning the opaque token.
    pub async fn create(&self, identity: Identity) -> String {
        let token = generate_token();
        let expires_at = Utc::now() + Duration::seconds(self.ttl_secs as i64);

        self.sessions.write().await.insert(
            token.clone(),
            SessionEntry {
                identity,
                expires_at,
            },
        );

        token
    }

    /// Resolve a token to its identity. Expired entries resolve to `None`
    /// and are removed on the spot.
    pub async fn resolve(&self, token: &str) -> Option<Identity> {
        let now = Utc::now();

        {
            let sessions = self.sessions.read().await;
            match sessions.get(token) {
                Some(entry) if entry.expires_at > now => return Some(entry.identity.clone()),
                Some(_) => {}
                None => return None,
            }
        }

        self.sessions.write().await.remove(token);
        None
    }

    /// Remove a session (logout). Unknown tokens are a no-op.
    pub async fn destroy(&self, token: &str) {
        self.sessions.write().await.remove(token);
    }

    /// Drop every expired session, returning how many were pruned.
    pub async fn sweep(&self) -> usize {
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, entry| entry.expires_at > now);
        before - sessions.len()
    }

    /// Spawn the background task that prunes expired sessions on an interval.
    pub fn spawn_sweeper(&self, interval_secs: u64) {
        let store = self.clone();
        tokio::spawn(async move {
            let mut interval =
                tokio::time::interval(std::time::Duration::from_secs(interval_secs));
            loop {
                interval.tick().await;
                let pruned = store.sweep().await;
                if pruned > 0 {
                    tracing::debug!(pruned, "Expired sessions pruned");
                }
            }
        });
    }
}

/// 32 random bytes, hex-encoded. Unguessable and free of cookie-hostile
/// characters.
fn generate_token() -> String {
    let mut rng = rand::rng();
    let token_bytes: Vec<u8> = (0..32).map(|_| rng.random()).collect();
    hex::encode(token_bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_then_resolve() {
        let store = SessionStore::new(3600);
        let identity = Identity::Empresa {
            empresa_id: 7,
            cnpj: "12345678000199".to_string(),
        };

        let token = store.create(identity.clone()).await;
        assert_eq!(token.len(), 64);
        assert_eq!(store.resolve(&token).await, Some(identity));
    }

    #[tokio::test]
    async fn test_unknown_token_resolves_none() {
        let store = SessionStore::new(3600);
        assert_eq!(store.resolve("deadbeef").await, None);
    }

    #[tokio::test]
    async fn test_expired_session_is_dropped() {
        // ttl 0: the entry expires the moment it is created.
        let store = SessionStore::new(0);
        let token = store.create(Identity::Admin).await;

        assert_eq!(store.resolve(&token).await, None);
        // The expired entry was removed, not just hidden.
        assert_eq!(store.sweep().await, 0);
    }

    #[tokio::test]
    async fn test_destroy_removes_session() {
        let store = SessionStore::new(3600);
        let token = store.create(Identity::Admin).await;

        store.destroy(&token).await;
        assert_eq!(store.resolve(&token).await, None);
    }

    #[tokio::test]
    async fn test_sweep_prunes_only_expired() {
        let expired = SessionStore::new(0);
        let _dead = expired.create(Identity::Admin).await;
        assert_eq!(expired.sweep().await, 1);

        let live = SessionStore::new(3600);
        let _token = live.create(Identity::Admin).await;
        assert_eq!(live.sweep().await, 0);
    }

    #[tokio::test]
    async fn test_tokens_are_unique() {
        let store = SessionStore::new(3600);
        let a = store.create(Identity::Admin).await;
        let b = store.create(Identity::Admin).await;
        assert_ne!(a, b);
    }
}

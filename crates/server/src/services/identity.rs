//! Bearer token → user identity mapping with a fixed validity window.
//!
//! Tokens are issued by an external login flow which calls
//! [`IdentityGate::authorize_token`]. There is no background sweep: an
//! expired record is evicted by the lookup that finds it expired.

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::{debug, instrument};

/// Default validity window of an authorized token.
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(10 * 60);

#[derive(Debug, Clone)]
struct Identifier {
    user: String,
    expires_at: DateTime<Utc>,
}

/// In-memory token registry.
pub struct IdentityGate {
    ttl: chrono::Duration,
    tokens: RwLock<HashMap<String, Identifier>>,
}

impl Default for IdentityGate {
    fn default() -> Self {
        Self::new(DEFAULT_TOKEN_TTL)
    }
}

impl IdentityGate {
    /// Create a gate whose tokens stay valid for `ttl` after issuance.
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl: chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::MAX),
            tokens: RwLock::new(HashMap::new()),
        }
    }

    /// Associate `token` with `user`, replacing any earlier association.
    #[instrument(skip(self, token))]
    pub async fn authorize_token(&self, token: &str, user: &str) {
        self.authorize_token_at(token, user, Utc::now()).await;
    }

    /// Resolve a token to the user it vouches for.
    ///
    /// Returns `None` for unknown tokens, and for expired tokens after
    /// evicting them.
    pub async fn resolve(&self, token: &str) -> Option<String> {
        self.resolve_at(token, Utc::now()).await
    }

    /// Whether `token` is currently valid.
    pub async fn is_authorized(&self, token: &str) -> bool {
        self.resolve(token).await.is_some()
    }

    async fn authorize_token_at(&self, token: &str, user: &str, now: DateTime<Utc>) {
        let identifier = Identifier {
            user: user.to_string(),
            expires_at: now.checked_add_signed(self.ttl).unwrap_or(DateTime::<Utc>::MAX_UTC),
        };
        self.tokens.write().await.insert(token.to_string(), identifier);
        debug!(user = %user, "Authorized token");
    }

    async fn resolve_at(&self, token: &str, now: DateTime<Utc>) -> Option<String> {
        {
            let tokens = self.tokens.read().await;
            let identifier = tokens.get(token)?;
            if identifier.expires_at > now {
                return Some(identifier.user.clone());
            }
        }

        // Re-check under the write lock: the token may have been re-authorized
        // between releasing the read lock and getting here.
        let mut tokens = self.tokens.write().await;
        match tokens.get(token) {
            Some(identifier) if identifier.expires_at > now => Some(identifier.user.clone()),
            Some(identifier) => {
                debug!(user = %identifier.user, "Evicting expired token");
                tokens.remove(token);
                None
            }
            None => None,
        }
    }

    #[cfg(test)]
    async fn len(&self) -> usize {
        self.tokens.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_authorized_token_resolves() {
        let gate = IdentityGate::default();
        gate.authorize_token("t-1", "alice").await;

        assert_eq!(gate.resolve("t-1").await.as_deref(), Some("alice"));
        assert!(gate.is_authorized("t-1").await);
    }

    #[tokio::test]
    async fn test_unknown_token_is_not_authorized() {
        let gate = IdentityGate::default();
        assert!(!gate.is_authorized("missing").await);
    }

    #[tokio::test]
    async fn test_expired_token_is_evicted() {
        let gate = IdentityGate::default();
        let issued = Utc::now();
        gate.authorize_token_at("t-1", "alice", issued).await;

        let just_before = issued + chrono::Duration::minutes(10) - chrono::Duration::seconds(1);
        assert_eq!(gate.resolve_at("t-1", just_before).await.as_deref(), Some("alice"));
        assert_eq!(gate.len().await, 1);

        let at_expiry = issued + chrono::Duration::minutes(10);
        assert_eq!(gate.resolve_at("t-1", at_expiry).await, None);
        assert_eq!(gate.len().await, 0);
    }

    #[tokio::test]
    async fn test_reauthorizing_restarts_window() {
        let gate = IdentityGate::new(Duration::from_secs(60));
        let issued = Utc::now();
        gate.authorize_token_at("t-1", "alice", issued).await;
        gate.authorize_token_at("t-1", "bob", issued + chrono::Duration::seconds(50))
            .await;

        let later = issued + chrono::Duration::seconds(90);
        assert_eq!(gate.resolve_at("t-1", later).await.as_deref(), Some("bob"));
    }
}

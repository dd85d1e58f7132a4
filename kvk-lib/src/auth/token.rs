//! AccessToken and the session store

use std::sync::Arc;

use chrono::DateTime;
use chrono::Utc;
use tokio::sync::RwLock;

/// A bearer token with optional expiration and refresh token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken {
    /// The bearer token sent with API calls.
    pub access_token: String,
    /// When the token expires, if known.
    pub expires_at: Option<DateTime<Utc>>,
    /// Token used to obtain a new access token.
    pub refresh_token: Option<String>,
}

impl AccessToken {
    /// Creates a new access token with just the token string.
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            expires_at: None,
            refresh_token: None,
        }
    }

    /// Creates a new access token with expiration and refresh token.
    pub fn with_refresh(
        access_token: impl Into<String>,
        expires_at: Option<DateTime<Utc>>,
        refresh_token: impl Into<String>,
    ) -> Self {
        Self {
            access_token: access_token.into(),
            expires_at,
            refresh_token: Some(refresh_token.into()),
        }
    }

    /// Returns `true` if the token has expired.
    ///
    /// Returns `false` if expiration time is unknown.
    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|exp| Utc::now() >= exp)
    }

    /// Returns `true` if the token will expire within the given duration.
    pub fn expires_within(&self, duration: chrono::Duration) -> bool {
        self.expires_at.is_some_and(|exp| Utc::now() + duration >= exp)
    }

    /// Returns `true` if a refresh token is available.
    pub fn can_refresh(&self) -> bool {
        self.refresh_token.is_some()
    }
}

#[derive(Debug, Default)]
struct SessionState {
    token: Option<AccessToken>,
    generation: u64,
}

/// Point-in-time view of the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    /// Current token, `None` when logged out.
    pub token: Option<AccessToken>,
    /// Bumped on every replace or clear.
    pub generation: u64,
}

/// Shared handle to the authenticated session.
///
/// Cheap to clone; all clones see the same session. The generation counter
/// lets callers tell whether the token changed since they last read it.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<SessionState>>,
}

impl SessionStore {
    /// Creates an empty (logged out) session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a session holding `token`.
    pub fn with_token(token: AccessToken) -> Self {
        Self {
            inner: Arc::new(RwLock::new(SessionState {
                token: Some(token),
                generation: 1,
            })),
        }
    }

    /// Returns the current token and generation.
    pub async fn snapshot(&self) -> SessionSnapshot {
        let state = self.inner.read().await;
        SessionSnapshot {
            token: state.token.clone(),
            generation: state.generation,
        }
    }

    /// Returns the current token.
    pub async fn token(&self) -> Option<AccessToken> {
        self.inner.read().await.token.clone()
    }

    /// Returns the current generation.
    pub async fn generation(&self) -> u64 {
        self.inner.read().await.generation
    }

    /// Returns `true` if a token is present.
    pub async fn is_authenticated(&self) -> bool {
        self.inner.read().await.token.is_some()
    }

    /// Stores a new token and returns the new generation.
    pub async fn replace(&self, token: AccessToken) -> u64 {
        let mut state = self.inner.write().await;
        state.token = Some(token);
        state.generation += 1;
        state.generation
    }

    /// Drops the token (logout) and returns the new generation.
    pub async fn clear(&self) -> u64 {
        let mut state = self.inner.write().await;
        state.token = None;
        state.generation += 1;
        state.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiry() {
        let past = AccessToken::with_refresh("a", Some(Utc::now() - chrono::Duration::seconds(5)), "r");
        assert!(past.is_expired());
        assert!(past.can_refresh());

        let soon = AccessToken::with_refresh("a", Some(Utc::now() + chrono::Duration::seconds(30)), "r");
        assert!(!soon.is_expired());
        assert!(soon.expires_within(chrono::Duration::minutes(1)));

        let unknown = AccessToken::new("a");
        assert!(!unknown.is_expired());
        assert!(!unknown.expires_within(chrono::Duration::days(365)));
    }

    #[tokio::test]
    async fn test_generation_bumps() {
        let store = SessionStore::new();
        assert_eq!(store.generation().await, 0);
        assert!(!store.is_authenticated().await);

        let clone = store.clone();
        assert_eq!(clone.replace(AccessToken::new("t1")).await, 1);
        assert_eq!(store.token().await.unwrap().access_token, "t1");

        assert_eq!(store.clear().await, 2);
        let snap = clone.snapshot().await;
        assert_eq!(snap.generation, 2);
        assert!(snap.token.is_none());
    }
}

//! Single-flight token refresh.

use std::sync::Arc;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;

use async_trait::async_trait;
use log::info;
use log::warn;
use tokio::sync::Mutex;

use super::AccessToken;
use super::SessionStore;
use crate::error::AuthError;

/// Exchanges a refresh token for a new access token.
#[async_trait]
pub trait TokenRefresher: Send + Sync {
    /// Obtains a new token using `refresh_token`.
    ///
    /// The returned token may omit its refresh token, in which case the
    /// previous one is kept.
    async fn refresh(&self, refresh_token: &str) -> Result<AccessToken, AuthError>;
}

/// Serializes token refreshes so at most one is in flight per session.
///
/// Callers pass the session generation they observed when their request
/// was rejected. The first caller through the lock performs the refresh;
/// callers that queued behind it see a newer generation and get the
/// already-refreshed token without contacting the refresher again.
///
/// A failed refresh clears the session, so queued callers fail with
/// [`AuthError::SessionExpired`] instead of retrying with a dead token.
pub struct RefreshGuard {
    session: SessionStore,
    refresher: Arc<dyn TokenRefresher>,
    lock: Mutex<()>,
    attempts: AtomicU64,
}

impl RefreshGuard {
    /// Creates a guard for `session`.
    pub fn new(session: SessionStore, refresher: Arc<dyn TokenRefresher>) -> Self {
        Self {
            session,
            refresher,
            lock: Mutex::new(()),
            attempts: AtomicU64::new(0),
        }
    }

    /// Returns the session this guard refreshes.
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Returns how many times the refresher has been called.
    pub fn attempts(&self) -> u64 {
        self.attempts.load(Ordering::Relaxed)
    }

    /// Returns a token newer than generation `observed`, refreshing if no
    /// other caller already did.
    pub async fn refresh(&self, observed: u64) -> Result<AccessToken, AuthError> {
        let _permit = self.lock.lock().await;

        let snapshot = self.session.snapshot().await;
        if snapshot.generation != observed {
            return snapshot.token.ok_or(AuthError::SessionExpired);
        }

        let Some(current) = snapshot.token else {
            return Err(AuthError::NotAuthenticated);
        };
        let Some(refresh_token) = current.refresh_token.as_deref() else {
            self.session.clear().await;
            return Err(AuthError::NoRefreshToken);
        };

        self.attempts.fetch_add(1, Ordering::Relaxed);
        match self.refresher.refresh(refresh_token).await {
            Ok(mut token) => {
                if token.refresh_token.is_none() {
                    token.refresh_token = current.refresh_token.clone();
                }
                let generation = self.session.replace(token.clone()).await;
                info!("session token refreshed (generation {})", generation);
                Ok(token)
            }
            Err(e) => {
                warn!("token refresh failed: {}", e);
                self.session.clear().await;
                Err(e)
            }
        }
    }
}

impl std::fmt::Debug for RefreshGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefreshGuard")
            .field("session", &self.session)
            .field("attempts", &self.attempts())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    struct Counting {
        calls: AtomicU64,
        fail: bool,
    }

    #[async_trait]
    impl TokenRefresher for Counting {
        async fn refresh(&self, refresh_token: &str) -> Result<AccessToken, AuthError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            tokio::time::sleep(Duration::from_millis(20)).await;
            if self.fail {
                return Err(AuthError::RefreshRejected { status: 401 });
            }
            assert_eq!(refresh_token, "r0");
            Ok(AccessToken::new(format!("t{}", n)))
        }
    }

    fn guard(fail: bool) -> (Arc<RefreshGuard>, Arc<Counting>) {
        let refresher = Arc::new(Counting {
            calls: AtomicU64::new(0),
            fail,
        });
        let session = SessionStore::with_token(AccessToken::with_refresh("t0", None, "r0"));
        let guard = Arc::new(RefreshGuard::new(session, refresher.clone()));
        (guard, refresher)
    }

    #[tokio::test]
    async fn test_concurrent_callers_share_one_refresh() {
        let (guard, refresher) = guard(false);
        let observed = guard.session().generation().await;

        let mut handles = Vec::new();
        for _ in 0..5 {
            let guard = guard.clone();
            handles.push(tokio::spawn(async move { guard.refresh(observed).await }));
        }
        for handle in handles {
            let token = handle.await.unwrap().unwrap();
            assert_eq!(token.access_token, "t1");
            assert_eq!(token.refresh_token.as_deref(), Some("r0"));
        }
        assert_eq!(refresher.calls.load(Ordering::SeqCst), 1);
        assert_eq!(guard.attempts(), 1);
    }

    #[tokio::test]
    async fn test_failure_clears_session_for_waiters() {
        let (guard, refresher) = guard(true);
        let observed = guard.session().generation().await;

        let (a, b) = tokio::join!(guard.refresh(observed), guard.refresh(observed));
        let errors = [a.unwrap_err(), b.unwrap_err()];
        assert!(errors.iter().any(|e| matches!(e, AuthError::RefreshRejected { .. })));
        assert!(errors.iter().any(|e| matches!(e, AuthError::SessionExpired)));
        assert_eq!(refresher.calls.load(Ordering::SeqCst), 1);
        assert!(!guard.session().is_authenticated().await);
    }

    #[tokio::test]
    async fn test_missing_refresh_token() {
        let refresher = Arc::new(Counting {
            calls: AtomicU64::new(0),
            fail: false,
        });
        let session = SessionStore::with_token(AccessToken::new("t0"));
        let guard = RefreshGuard::new(session, refresher);
        let err = guard.refresh(1).await.unwrap_err();
        assert!(matches!(err, AuthError::NoRefreshToken));

        let err = guard.refresh(2).await.unwrap_err();
        assert!(matches!(err, AuthError::NotAuthenticated));
    }
}

//! Session and token refresh error types

/// Errors that can occur while refreshing the session token.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AuthError {
    /// No session is active.
    #[error("Not authenticated")]
    NotAuthenticated,

    /// The active session carries no refresh token.
    #[error("No refresh token available")]
    NoRefreshToken,

    /// The refresh endpoint rejected the refresh token.
    #[error("Token refresh rejected: HTTP {status}")]
    RefreshRejected { status: u16 },

    /// A refresh failed and the session was cleared.
    #[error("Session expired")]
    SessionExpired,

    /// Network error while refreshing.
    #[error("Network error during refresh: {0}")]
    Network(String),

    /// Failed to parse the refresh response.
    #[error("Refresh response parse error: {0}")]
    Parse(String),
}

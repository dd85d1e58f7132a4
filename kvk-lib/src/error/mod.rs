//! Error types

mod api;
mod auth;
mod config;

pub use api::*;
pub use auth::*;
pub use config::*;

/// Umbrella error for operations that cross concerns.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// HTTP client error.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Session or token refresh error.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Configuration loading error.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

//! Session state and token refresh

mod http;
mod refresh;
mod token;

pub use http::HttpTokenRefresher;
pub use refresh::RefreshGuard;
pub use refresh::TokenRefresher;
pub use token::AccessToken;
pub use token::SessionSnapshot;
pub use token::SessionStore;

//! Refresh-token exchange over HTTP.

use async_trait::async_trait;
use chrono::Duration;
use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;
use serde::Serialize;

use super::AccessToken;
use super::TokenRefresher;
use crate::error::AuthError;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RefreshRequest<'a> {
    refresh_token: &'a str,
}

/// Token payload returned by the refresh endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default, deserialize_with = "deserialize_expires_in")]
    expires_in: Option<u64>,
}

/// Deserializes `expiresIn` which can be either a number or a string.
fn deserialize_expires_in<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrNumber {
        String(String),
        Number(u64),
    }

    match Option::<StringOrNumber>::deserialize(deserializer)? {
        None => Ok(None),
        Some(StringOrNumber::Number(n)) => Ok(Some(n)),
        Some(StringOrNumber::String(s)) => s
            .parse::<u64>()
            .map(Some)
            .map_err(|_| D::Error::custom(format!("invalid expiresIn value: {}", s))),
    }
}

impl TokenResponse {
    /// Lifetimes too large to represent leave the token without an expiry.
    fn into_access_token(self) -> AccessToken {
        let expires_at = self
            .expires_in
            .and_then(|secs| i64::try_from(secs).ok())
            .and_then(Duration::try_seconds)
            .and_then(|lifetime| Utc::now().checked_add_signed(lifetime));
        AccessToken {
            access_token: self.access_token,
            expires_at,
            refresh_token: self.refresh_token,
        }
    }
}

/// [`TokenRefresher`] that posts `{"refreshToken": ...}` to a JSON endpoint.
#[derive(Debug, Clone)]
pub struct HttpTokenRefresher {
    http_client: Client,
    url: String,
}

impl HttpTokenRefresher {
    /// Creates a refresher posting to `url`.
    pub fn new(http_client: Client, url: impl Into<String>) -> Self {
        Self {
            http_client,
            url: url.into(),
        }
    }

    /// Returns the refresh endpoint URL.
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl TokenRefresher for HttpTokenRefresher {
    async fn refresh(&self, refresh_token: &str) -> Result<AccessToken, AuthError> {
        let response = self
            .http_client
            .post(&self.url)
            .json(&RefreshRequest { refresh_token })
            .send()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AuthError::RefreshRejected {
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;
        let token: TokenResponse =
            serde_json::from_str(&body).map_err(|e| AuthError::Parse(e.to_string()))?;
        Ok(token.into_access_token())
    }
}

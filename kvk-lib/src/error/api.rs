//! API error types

use std::time::Duration;

use super::AuthError;

/// Errors that can occur during API calls.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// HTTP error response from the API.
    #[error("HTTP {status} {status_text}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Canonical reason phrase for the status.
        status_text: String,
        /// Response body, parsed as JSON when possible, otherwise a JSON string.
        data: serde_json::Value,
    },

    /// Network error during API call.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Request timed out.
    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    /// Invalid URL provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse API response.
    #[error("Response parse error: {message}")]
    Parse {
        /// Description of the parse error.
        message: String,
        /// Raw response body, if available.
        body: Option<String>,
    },

    /// Session could not be refreshed after a 401.
    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),
}

impl ApiError {
    /// Creates a new HTTP error with an empty body.
    pub fn http(status: u16, status_text: impl Into<String>) -> Self {
        Self::Http {
            status,
            status_text: status_text.into(),
            data: serde_json::Value::Null,
        }
    }

    /// Creates a new HTTP error carrying the response body.
    pub fn http_with_data(status: u16, status_text: impl Into<String>, data: serde_json::Value) -> Self {
        Self::Http {
            status,
            status_text: status_text.into(),
            data,
        }
    }

    /// Creates a new parse error with the raw response body.
    pub fn parse_with_body(message: impl Into<String>, body: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
            body: Some(body.into()),
        }
    }

    /// Returns the HTTP status. Network-class failures report 0.
    pub fn status(&self) -> u16 {
        match self {
            Self::Http { status, .. } => *status,
            Self::Network(e) => e.status().map(|s| s.as_u16()).unwrap_or(0),
            _ => 0,
        }
    }

    /// Returns the response body for HTTP errors.
    pub fn data(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Http { data, .. } => Some(data),
            _ => None,
        }
    }

    /// Returns `true` for a 401 response.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Http { status: 401, .. })
    }

    /// Returns `true` if the request never produced an HTTP response.
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Timeout(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_and_data() {
        let err = ApiError::http_with_data(404, "Not Found", serde_json::json!({"detail": "missing"}));
        assert_eq!(err.status(), 404);
        assert_eq!(err.data().unwrap()["detail"], "missing");
        assert!(!err.is_unauthorized());
        assert_eq!(err.to_string(), "HTTP 404 Not Found");
    }

    #[test]
    fn test_non_http_errors_report_status_zero() {
        assert_eq!(ApiError::Timeout(Duration::from_secs(3)).status(), 0);
        assert_eq!(ApiError::InvalidUrl("::".into()).status(), 0);
        assert_eq!(ApiError::from(AuthError::SessionExpired).status(), 0);
    }

    #[test]
    fn test_unauthorized() {
        assert!(ApiError::http(401, "Unauthorized").is_unauthorized());
    }
}

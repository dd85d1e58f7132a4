//! Authenticated JSON API client

use std::sync::Arc;
use std::time::Duration;

use log::debug;
use log::info;
use reqwest::Client;
use reqwest::Method;
use serde_json::Value;
use url::Url;

use crate::auth::AccessToken;
use crate::auth::HttpTokenRefresher;
use crate::auth::RefreshGuard;
use crate::auth::SessionStore;
use crate::auth::TokenRefresher;
use crate::error::ApiError;
use crate::error::AuthError;

/// Default path of the token refresh endpoint.
pub const DEFAULT_REFRESH_ENDPOINT: &str = "/auth/refresh";

/// Default path of the login endpoint.
pub const DEFAULT_LOGIN_ENDPOINT: &str = "/auth/login";

/// Callback invoked when the session could not be refreshed.
pub type SessionExpiredHook = Arc<dyn Fn() + Send + Sync>;

/// Client for the portal's JSON API.
///
/// Every request carries the session's bearer token. A 401 response
/// triggers one refresh through the shared [`RefreshGuard`] followed by a
/// single retry, so a burst of concurrent 401s costs exactly one call to the
/// refresh endpoint. Requests to the refresh and login endpoints are never
/// retried.
///
/// This client is cheap to clone (uses `Arc` internally) and can be shared
/// across threads safely.
///
/// # Example
///
/// ```ignore
/// use kvk_lib::ApiClient;
/// use kvk_lib::auth::{AccessToken, SessionStore};
///
/// let session = SessionStore::with_token(AccessToken::with_refresh("access", None, "refresh"));
/// let client = ApiClient::builder()
///     .base_url("https://kvk.example.org/api")
///     .session(session)
///     .on_session_expired(|| eprintln!("please log in again"))
///     .build()?;
///
/// let zones = client.get("/zones", None).await?;
/// ```
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    base_url: Url,
    http_client: Client,
    guard: RefreshGuard,
    timeout: Option<Duration>,
    refresh_endpoint: String,
    login_endpoint: String,
    on_session_expired: Option<SessionExpiredHook>,
}

impl ApiClient {
    /// Creates a new builder for constructing a client.
    pub fn builder() -> ApiClientBuilder<Missing, Missing> {
        ApiClientBuilder::new()
    }

    /// Returns the base URL requests are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Returns the session this client authenticates with.
    pub fn session(&self) -> &SessionStore {
        self.inner.guard.session()
    }

    /// Returns how many refreshes this client has attempted.
    pub fn refresh_attempts(&self) -> u64 {
        self.inner.guard.attempts()
    }

    /// Sends a `GET` request.
    pub async fn get(&self, endpoint: &str, body: Option<&Value>) -> Result<Value, ApiError> {
        self.request(Method::GET, endpoint, body).await
    }

    /// Sends a `POST` request.
    pub async fn post(&self, endpoint: &str, body: Option<&Value>) -> Result<Value, ApiError> {
        self.request(Method::POST, endpoint, body).await
    }

    /// Sends a `PUT` request.
    pub async fn put(&self, endpoint: &str, body: Option<&Value>) -> Result<Value, ApiError> {
        self.request(Method::PUT, endpoint, body).await
    }

    /// Sends a `DELETE` request.
    pub async fn delete(&self, endpoint: &str, body: Option<&Value>) -> Result<Value, ApiError> {
        self.request(Method::DELETE, endpoint, body).await
    }

    /// Sends a request and decodes the JSON response.
    ///
    /// An empty success body yields [`Value::Null`]. Error responses become
    /// [`ApiError::Http`] with the body as `data`: parsed JSON when possible,
    /// otherwise the raw text as a JSON string.
    pub async fn request(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&Value>,
    ) -> Result<Value, ApiError> {
        let url = self.url_for(endpoint)?;
        let snapshot = self.session().snapshot().await;

        let err = match self.send(method.clone(), &url, body, snapshot.token.as_ref()).await {
            Err(err) if err.is_unauthorized() && self.is_retryable(endpoint) => err,
            other => return other,
        };

        debug!("401 from {}; refreshing session", endpoint);
        match self.inner.guard.refresh(snapshot.generation).await {
            Ok(token) => self.send(method, &url, body, Some(&token)).await,
            Err(AuthError::SessionExpired) => Err(err),
            Err(e) => {
                info!("session expired: {}", e);
                if let Some(hook) = &self.inner.on_session_expired {
                    hook();
                }
                Err(err)
            }
        }
    }

    fn url_for(&self, endpoint: &str) -> Result<Url, ApiError> {
        if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
            return Url::parse(endpoint).map_err(|e| ApiError::InvalidUrl(format!("{}: {}", endpoint, e)));
        }
        let joined = format!(
            "{}/{}",
            self.inner.base_url.as_str().trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        );
        Url::parse(&joined).map_err(|e| ApiError::InvalidUrl(format!("{}: {}", joined, e)))
    }

    fn is_retryable(&self, endpoint: &str) -> bool {
        let path = endpoint.split(['?', '#']).next().unwrap_or(endpoint);
        let path = path.trim_end_matches('/');
        !path.ends_with(self.inner.refresh_endpoint.as_str()) && !path.ends_with(self.inner.login_endpoint.as_str())
    }

    async fn send(
        &self,
        method: Method,
        url: &Url,
        body: Option<&Value>,
        token: Option<&AccessToken>,
    ) -> Result<Value, ApiError> {
        let mut request = self.inner.http_client.request(method, url.clone());
        if let Some(token) = token {
            request = request.bearer_auth(&token.access_token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        if let Some(timeout) = self.inner.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await.map_err(|e| self.map_send_error(e))?;
        let status = response.status();
        let text = response.text().await.map_err(|e| self.map_send_error(e))?;

        if status.is_success() {
            if text.trim().is_empty() {
                return Ok(Value::Null);
            }
            return serde_json::from_str(&text).map_err(|e| ApiError::parse_with_body(e.to_string(), text));
        }

        let data = if text.trim().is_empty() {
            Value::Null
        } else {
            match serde_json::from_str(&text) {
                Ok(json) => json,
                Err(_) => Value::String(text),
            }
        };
        Err(ApiError::http_with_data(
            status.as_u16(),
            status.canonical_reason().unwrap_or_default(),
            data,
        ))
    }

    fn map_send_error(&self, e: reqwest::Error) -> ApiError {
        match self.inner.timeout {
            Some(timeout) if e.is_timeout() => ApiError::Timeout(timeout),
            _ => ApiError::Network(e),
        }
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.inner.base_url.as_str())
            .field("timeout", &self.inner.timeout)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Typestate Builder
// =============================================================================

/// Marker type for missing required builder fields.
pub struct Missing;

/// Marker type for set builder fields.
pub struct Set<T>(T);

/// Builder for constructing an [`ApiClient`].
///
/// Uses the typestate pattern to ensure required fields are set at compile time.
///
/// # Required Fields
///
/// - `base_url` - The API root, e.g. `https://kvk.example.org/api`
/// - `session` - The [`SessionStore`] holding the bearer token
///
/// Without an explicit [`refresher`](Self::refresher), tokens are refreshed
/// by posting to `base_url + refresh_endpoint`.
pub struct ApiClientBuilder<BaseUrl, Session> {
    base_url: BaseUrl,
    session: Session,
    refresher: Option<Arc<dyn TokenRefresher>>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    http_client: Option<Client>,
    refresh_endpoint: String,
    login_endpoint: String,
    on_session_expired: Option<SessionExpiredHook>,
}

impl ApiClientBuilder<Missing, Missing> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            base_url: Missing,
            session: Missing,
            refresher: None,
            timeout: None,
            connect_timeout: None,
            http_client: None,
            refresh_endpoint: DEFAULT_REFRESH_ENDPOINT.to_string(),
            login_endpoint: DEFAULT_LOGIN_ENDPOINT.to_string(),
            on_session_expired: None,
        }
    }
}

impl Default for ApiClientBuilder<Missing, Missing> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> ApiClientBuilder<Missing, S> {
    /// Sets the API base URL.
    pub fn base_url(self, url: impl Into<String>) -> ApiClientBuilder<Set<String>, S> {
        ApiClientBuilder {
            base_url: Set(url.into()),
            session: self.session,
            refresher: self.refresher,
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            http_client: self.http_client,
            refresh_endpoint: self.refresh_endpoint,
            login_endpoint: self.login_endpoint,
            on_session_expired: self.on_session_expired,
        }
    }
}

impl<U> ApiClientBuilder<U, Missing> {
    /// Sets the session store.
    pub fn session(self, session: SessionStore) -> ApiClientBuilder<U, Set<SessionStore>> {
        ApiClientBuilder {
            base_url: self.base_url,
            session: Set(session),
            refresher: self.refresher,
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            http_client: self.http_client,
            refresh_endpoint: self.refresh_endpoint,
            login_endpoint: self.login_endpoint,
            on_session_expired: self.on_session_expired,
        }
    }
}

impl<U, S> ApiClientBuilder<U, S> {
    /// Sets a custom token refresher.
    pub fn refresher<T: TokenRefresher + 'static>(mut self, refresher: T) -> Self {
        self.refresher = Some(Arc::new(refresher));
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the connection timeout.
    ///
    /// This is applied when building the HTTP client.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets a custom HTTP client.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Sets the refresh endpoint path. Defaults to `/auth/refresh`.
    pub fn refresh_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.refresh_endpoint = endpoint.into();
        self
    }

    /// Sets the login endpoint path. Defaults to `/auth/login`.
    pub fn login_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.login_endpoint = endpoint.into();
        self
    }

    /// Sets the callback run when a refresh fails and the session ends.
    pub fn on_session_expired(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_session_expired = Some(Arc::new(hook));
        self
    }
}

impl ApiClientBuilder<Set<String>, Set<SessionStore>> {
    /// Builds the [`ApiClient`].
    ///
    /// Fails if the base URL does not parse or the HTTP client cannot be
    /// constructed.
    pub fn build(self) -> Result<ApiClient, ApiError> {
        let base_url = Url::parse(&self.base_url.0)
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", self.base_url.0, e)))?;

        let http_client = match self.http_client {
            Some(client) => client,
            None => {
                let mut builder = Client::builder();
                if let Some(timeout) = self.connect_timeout {
                    builder = builder.connect_timeout(timeout);
                }
                builder.build()?
            }
        };

        let refresher = match self.refresher {
            Some(refresher) => refresher,
            None => {
                let url = format!(
                    "{}/{}",
                    base_url.as_str().trim_end_matches('/'),
                    self.refresh_endpoint.trim_start_matches('/')
                );
                Arc::new(HttpTokenRefresher::new(http_client.clone(), url)) as Arc<dyn TokenRefresher>
            }
        };

        Ok(ApiClient {
            inner: Arc::new(ApiClientInner {
                base_url,
                http_client,
                guard: RefreshGuard::new(self.session.0, refresher),
                timeout: self.timeout,
                refresh_endpoint: self.refresh_endpoint.trim_end_matches('/').to_string(),
                login_endpoint: self.login_endpoint.trim_end_matches('/').to_string(),
                on_session_expired: self.on_session_expired,
            }),
        })
    }
}

//! Configuration loaded from a JSON file.

use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;
use serde::Serialize;

use crate::client::DEFAULT_LOGIN_ENDPOINT;
use crate::client::DEFAULT_REFRESH_ENDPOINT;
use crate::error::ConfigError;
use crate::nav::PrefixMatch;
use crate::nav::RouteNavigator;
use crate::table::TableConfig;

/// Top-level configuration. Every field has a default, so an empty
/// object `{}` is a valid config file.
///
/// # Example
///
/// ```
/// use kvk_lib::config::KvkConfig;
/// use kvk_lib::table::PageClamp;
///
/// let config: KvkConfig = serde_json::from_str(r#"{"table": {"page_clamp": "preserve"}}"#).unwrap();
/// assert_eq!(config.table.page_clamp, PageClamp::Preserve);
/// assert_eq!(config.table.page_size, 10);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KvkConfig {
    /// Backend API settings.
    pub api: ApiConfig,
    /// Table defaults.
    pub table: TableConfig,
    /// Route resolution settings.
    pub navigation: NavConfig,
}

/// Backend API settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// API root URL.
    pub base_url: String,
    /// Per-request timeout in seconds; 0 disables it.
    pub timeout_secs: u64,
    /// Path of the token refresh endpoint.
    pub refresh_endpoint: String,
    /// Path of the login endpoint.
    pub login_endpoint: String,
}

impl ApiConfig {
    /// Returns the request timeout, if any.
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000/api".to_string(),
            timeout_secs: 30,
            refresh_endpoint: DEFAULT_REFRESH_ENDPOINT.to_string(),
            login_endpoint: DEFAULT_LOGIN_ENDPOINT.to_string(),
        }
    }
}

/// Route resolution settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    /// Rule for ambiguous prefix matches.
    pub prefix_match: PrefixMatch,
    /// JSON route table replacing the built-in one.
    pub routes_file: Option<PathBuf>,
}

impl NavConfig {
    /// Builds the navigator described by this config.
    ///
    /// Relative `routes_file` paths are resolved against `base_dir`.
    pub fn navigator(&self, base_dir: Option<&Path>) -> Result<RouteNavigator, ConfigError> {
        let navigator = match &self.routes_file {
            Some(file) => {
                let path = match base_dir {
                    Some(dir) if file.is_relative() => dir.join(file),
                    _ => file.clone(),
                };
                RouteNavigator::from_json(&read(&path)?)?
            }
            None => RouteNavigator::kvk(),
        };
        Ok(navigator.with_prefix_match(self.prefix_match))
    }
}

impl KvkConfig {
    /// Loads the config from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = read(path.as_ref())?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Loads the config if `path` exists, otherwise returns the defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }
}

fn read(path: &Path) -> Result<String, ConfigError> {
    fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

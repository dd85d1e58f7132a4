//! Application-wide handles created once at startup.

use std::path::Path;
use std::sync::Arc;

use log::info;

use super::DashboardStore;
use crate::auth::SessionStore;
use crate::client::ApiClient;
use crate::config::KvkConfig;
use crate::error::Error;
use crate::model::ColumnDescriptor;
use crate::model::Row;
use crate::nav::RouteNavigator;
use crate::table::TableEngine;

/// Explicit replacement for process-wide stores.
///
/// Built once by the application entry point and passed (or cloned) to
/// whatever needs it. Clones share the same session, filters and navigator.
#[derive(Debug, Clone)]
pub struct AppContext {
    config: Arc<KvkConfig>,
    session: SessionStore,
    dashboard: DashboardStore,
    navigator: Arc<RouteNavigator>,
    client: ApiClient,
}

impl AppContext {
    /// Builds the context from `config`.
    ///
    /// `config_dir` anchors a relative `navigation.routes_file`. When a
    /// refresh fails the dashboard filters are reset along with the session.
    pub fn bootstrap(config: KvkConfig, config_dir: Option<&Path>) -> Result<Self, Error> {
        Self::with_session(config, config_dir, SessionStore::new())
    }

    /// Builds the context around an existing session.
    pub fn with_session(
        config: KvkConfig,
        config_dir: Option<&Path>,
        session: SessionStore,
    ) -> Result<Self, Error> {
        let navigator = Arc::new(config.navigation.navigator(config_dir)?);
        let dashboard = DashboardStore::new();

        let on_expired = dashboard.clone();
        let mut builder = ApiClient::builder()
            .base_url(config.api.base_url.as_str())
            .session(session.clone())
            .refresh_endpoint(config.api.refresh_endpoint.as_str())
            .login_endpoint(config.api.login_endpoint.as_str())
            .on_session_expired(move || {
                info!("session ended; clearing dashboard filters");
                on_expired.reset();
            });
        if let Some(timeout) = config.api.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            config: Arc::new(config),
            session,
            dashboard,
            navigator,
            client,
        })
    }

    /// Returns the loaded configuration.
    pub fn config(&self) -> &KvkConfig {
        &self.config
    }

    /// Returns the session store.
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Returns the dashboard filter store.
    pub fn dashboard(&self) -> &DashboardStore {
        &self.dashboard
    }

    /// Returns the route navigator.
    pub fn navigator(&self) -> &Arc<RouteNavigator> {
        &self.navigator
    }

    /// Returns the API client.
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Creates a table engine over `rows` with the configured defaults.
    pub fn table_engine(&self, rows: Vec<Row>, columns: Vec<ColumnDescriptor>) -> TableEngine {
        TableEngine::with_config(rows, columns, self.config.table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bootstrap_shares_handles() {
        let ctx = AppContext::bootstrap(KvkConfig::default(), None).unwrap();
        let clone = ctx.clone();
        clone.dashboard().update(|f| f.zone = Some("z1".into()));
        assert_eq!(ctx.dashboard().get().zone.as_deref(), Some("z1"));
        assert!(Arc::ptr_eq(ctx.navigator(), clone.navigator()));
        assert_eq!(ctx.table_engine(Vec::new(), Vec::new()).page().page_size, 10);
    }

    #[test]
    fn test_bootstrap_rejects_bad_base_url() {
        let mut config = KvkConfig::default();
        config.api.base_url = "::nope".into();
        assert!(matches!(
            AppContext::bootstrap(config, None),
            Err(Error::Api(_))
        ));
    }
}

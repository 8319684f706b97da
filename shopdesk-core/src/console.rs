//! Wiring of the admin console's shared components

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::auth::AuthService;
use crate::catalog::{CategoryApi, InventoryApi};
use crate::config::ApiConfig;
use crate::error::ShopdeskError;
use crate::http::{ApiClient, AuthInterceptor, HttpHandler, ReqwestTransport};
use crate::navigation::{AuthGuard, HistoryNavigator, Navigator, Router};
use crate::session::{AuthState, KeyValueStorage, SessionStore};

/// Everything a console front end needs, sharing one session store
#[derive(Clone)]
pub struct Console {
    pub config: Arc<ApiConfig>,
    pub store: Arc<SessionStore>,
    pub navigator: Arc<HistoryNavigator>,
    pub client: ApiClient,
    pub auth: AuthService,
    pub router: Arc<Router>,
    pub categories: CategoryApi,
    pub inventory: InventoryApi,
}

impl Console {
    /// Validate `config`, build the network transport, and restore any
    /// persisted session from `storage`
    pub async fn open(
        config: ApiConfig,
        storage: Arc<dyn KeyValueStorage>,
    ) -> Result<Self, ShopdeskError> {
        config.validate()?;
        let transport = ReqwestTransport::new(Duration::from_secs(config.timeout_secs))?;
        Ok(Self::with_transport(config, storage, Arc::new(transport)).await)
    }

    /// Same as [`Console::open`] over a caller-supplied transport
    pub async fn with_transport(
        config: ApiConfig,
        storage: Arc<dyn KeyValueStorage>,
        transport: Arc<dyn HttpHandler>,
    ) -> Self {
        let config = Arc::new(config);
        let store = Arc::new(SessionStore::new(storage, config.storage_key.clone()));
        let navigator = Arc::new(HistoryNavigator::new());
        let nav: Arc<dyn Navigator> = navigator.clone();

        let interceptor = AuthInterceptor::new(transport, store.clone(), nav.clone(), &config);
        let client = ApiClient::new(config.clone(), Arc::new(interceptor));

        let guard = AuthGuard::new(store.clone(), nav.clone(), config.login_route.clone());
        let router = Arc::new(Router::console(&config, guard, nav));

        let state = store.restore().await;
        debug!(
            authenticated = state.is_authenticated(),
            base_url = %config.base_url,
            "Console ready"
        );

        Self {
            auth: AuthService::new(client.clone(), store.clone()),
            categories: CategoryApi::new(client.clone()),
            inventory: InventoryApi::new(client.clone()),
            config,
            store,
            navigator,
            client,
            router,
        }
    }

    pub fn state(&self) -> AuthState {
        self.store.state()
    }
}

//! Shared service constructors for all platforms.
//!
//! Everything the views talk to is built once at startup and handed down as
//! the [`Services`] context:
//! - **Backend**: [`api::BackendClient`] configured from the environment, with
//!   `storefront.toml` as fallback
//! - **Key-value store**: filesystem via [`store::FileStore`] under the
//!   platform data directory

use std::sync::Arc;

use api::{BackendClient, BackendConfig, BackendError};
use client::{Auth, KeyClock, SessionStore};
use store::StorefrontConfig;

pub type AppStore = store::FileStore;

pub type AppAuth = Auth<BackendClient, AppStore>;

/// Long-lived collaborators shared by every screen.
#[derive(Clone)]
pub struct Services {
    pub config: StorefrontConfig,
    pub auth: AppAuth,
    pub storage: BackendClient,
    pub kv: AppStore,
    pub clock: Arc<KeyClock>,
}

/// Two handles are equal when they share the same instances.
impl PartialEq for Services {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.clock, &other.clock)
    }
}

impl Services {
    pub fn sessions(&self) -> &SessionStore {
        self.auth.sessions()
    }
}

/// Create the persistent key-value store.
pub fn make_kv() -> AppStore {
    store::FileStore::new(store::FileStore::default_base())
}

fn load_config() -> StorefrontConfig {
    let path = store::FileStore::default_base().join(StorefrontConfig::filename());
    match StorefrontConfig::load(&path) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(path = %path.display(), "ignoring unreadable config: {e}");
            StorefrontConfig::default()
        }
    }
}

/// Build every service. Fails when the backend is not configured.
pub fn make_services() -> Result<Services, BackendError> {
    let config = load_config();
    let backend = BackendClient::new(BackendConfig::from_env(&config)?);
    let kv = make_kv();
    let auth = Auth::new(backend.clone(), kv.clone(), SessionStore::new())
        .with_redirect(Some(config.auth.redirect_to.clone()));
    tracing::info!(backend = %backend.config().url, "services ready");
    Ok(Services {
        config,
        auth,
        storage: backend,
        kv,
        clock: Arc::new(KeyClock::new()),
    })
}

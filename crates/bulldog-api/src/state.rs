//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use bulldog_auth::{PasswordHasher, RevocationStore, SessionManager};
use bulldog_core::config::AppConfig;
use bulldog_core::result::AppResult;
use bulldog_database::Stores;

/// Shared dependencies passed to every handler via `State<AppState>`.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// User, pet, and expense stores.
    pub stores: Stores,
    /// Login, refresh, logout, and request authentication.
    pub session_manager: Arc<SessionManager>,
    /// Password hasher for registration and password changes.
    pub password_hasher: Arc<PasswordHasher>,
}

impl AppState {
    /// Builds the auth system over `stores` and bundles the state.
    pub fn new(config: AppConfig, stores: Stores) -> AppResult<Self> {
        let session_manager = SessionManager::from_config(&config.auth, stores.accounts.clone())?;

        Ok(Self {
            config: Arc::new(config),
            stores,
            session_manager: Arc::new(session_manager),
            password_hasher: Arc::new(PasswordHasher::new()),
        })
    }

    /// The revocation store the sweeper should purge.
    pub fn revocations(&self) -> Arc<RevocationStore> {
        self.session_manager.revocations().clone()
    }
}

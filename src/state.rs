//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! carries the handle to the single process-wide session store; nothing else
//! reaches the session through globals.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::auth::MockAuthenticator;
use crate::services::session::{SessionHandle, SessionStore};
use crate::services::storage::FileStorage;

/// Clone is required by Axum; the session handle is Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub session: SessionHandle,
}

impl AppState {
    #[must_use]
    pub fn new(session: SessionHandle) -> Self {
        Self { session }
    }

    /// Restore the session from the configured storage directory.
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        let storage = Arc::new(FileStorage::new(&config.storage_dir));
        let authenticator = Arc::new(MockAuthenticator::new(config.login_delay));
        Self::new(SessionStore::restore(storage, authenticator).into_handle())
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================

#[cfg(test)]
pub mod test_helpers {
    use std::time::Duration;

    use super::*;
    use crate::services::auth::Authenticator;
    use crate::services::identity::Role;
    use crate::services::storage::MemoryStorage;

    /// `AppState` over in-memory storage with a zero-delay mock authenticator.
    #[must_use]
    pub fn test_app_state() -> AppState {
        test_app_state_with_storage(&MemoryStorage::new())
    }

    /// Like `test_app_state`, sharing `storage` so a second call acts as a reload.
    #[must_use]
    pub fn test_app_state_with_storage(storage: &MemoryStorage) -> AppState {
        let store = SessionStore::restore(
            Arc::new(storage.clone()),
            Arc::new(MockAuthenticator::new(Duration::ZERO)),
        );
        AppState::new(store.into_handle())
    }

    /// In-memory state backed by a caller-supplied authenticator.
    #[must_use]
    pub fn test_app_state_with_authenticator(authenticator: Arc<dyn Authenticator>) -> AppState {
        let store = SessionStore::restore(Arc::new(MemoryStorage::new()), authenticator);
        AppState::new(store.into_handle())
    }

    /// Test state already logged in as `role`.
    pub async fn logged_in_state(role: Role) -> AppState {
        let state = test_app_state();
        state
            .session
            .login("demo@cloudcycle.com", "demo123", role)
            .await
            .expect("mock login should succeed");
        state
    }
}

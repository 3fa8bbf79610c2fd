//! Shared server state

use std::sync::Arc;

use crate::auth::SessionStore;
use crate::config::Settings;
use crate::error::FinanceResult;
use crate::storage::Storage;

use super::error::ApiError;

/// Everything a request handler can reach
pub struct AppState {
    pub storage: Storage,
    pub sessions: SessionStore,
    pub settings: Settings,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn new(storage: Storage, settings: Settings) -> SharedState {
        Arc::new(Self {
            sessions: SessionStore::with_ttl_hours(settings.server.session_ttl_hours),
            storage,
            settings,
        })
    }
}

/// Run storage work on the blocking thread pool
///
/// Services do synchronous file I/O and hashing, which must stay off the
/// async workers.
pub async fn blocking<F, T>(state: &SharedState, work: F) -> Result<T, ApiError>
where
    F: FnOnce(&AppState) -> FinanceResult<T> + Send + 'static,
    T: Send + 'static,
{
    let state = Arc::clone(state);
    tokio::task::spawn_blocking(move || work(&state))
        .await
        .map_err(|e| ApiError::internal(format!("Worker task failed: {}", e)))?
        .map_err(ApiError::from)
}

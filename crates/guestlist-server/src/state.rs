use std::sync::Arc;

use guestlist_store::{GuestRepository, StoreResult};

use crate::error::ApiError;

/// Shared handler state: the guest store.
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn GuestRepository>,
}

impl AppState {
    pub fn new(store: Arc<dyn GuestRepository>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn GuestRepository> {
        &self.store
    }

    /// Run a store call on the blocking pool; stores do synchronous file I/O.
    pub async fn run<T, F>(&self, op: F) -> Result<StoreResult<T>, ApiError>
    where
        T: Send + 'static,
        F: FnOnce(&dyn GuestRepository) -> StoreResult<T> + Send + 'static,
    {
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || op(store.as_ref()))
            .await
            .map_err(|e| ApiError::Internal(e.to_string()))
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}

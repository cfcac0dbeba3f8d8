use std::future::Future;
use std::sync::Arc;

use guestlist_store::{CsvGuestStore, GuestRepository};
use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::router::build_router;
use crate::state::AppState;

/// Guest list HTTP server.
pub struct GuestServer {
    config: ServerConfig,
    state: AppState,
}

impl GuestServer {
    /// Open the configured CSV store and build a server over it.
    pub fn new(config: ServerConfig) -> ServerResult<Self> {
        let store = CsvGuestStore::from_config(&config.store)?;
        Ok(Self::with_store(config, Arc::new(store)))
    }

    /// Build a server over an already-open store.
    pub fn with_store(config: ServerConfig, store: Arc<dyn GuestRepository>) -> Self {
        Self {
            config,
            state: AppState::new(store),
        }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> axum::Router {
        build_router(self.state.clone())
    }

    /// Serve until Ctrl-C.
    pub async fn serve(self) -> ServerResult<()> {
        self.serve_with_shutdown(shutdown_signal()).await
    }

    /// Serve until `signal` resolves, then drain in-flight requests.
    pub async fn serve_with_shutdown<F>(self, signal: F) -> ServerResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let app = self.router();
        let listener = TcpListener::bind(self.config.bind_addr).await?;
        tracing::info!(
            addr = %listener.local_addr()?,
            file = %self.config.store.path.display(),
            "guest list server listening"
        );
        axum::serve(listener, app)
            .with_graceful_shutdown(signal)
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))?;
        tracing::info!("guest list server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("shutdown signal received"),
        Err(e) => {
            tracing::error!(error = %e, "cannot listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}

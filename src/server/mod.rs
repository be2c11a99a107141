//! HTTP server for the parameter catalog
//!
//! Thin transport glue: request/response shaping and SSE framing live here,
//! all catalog semantics live in [`crate::catalog`].

pub mod config;
pub mod routes;

pub use config::ServerConfig;
pub use routes::{parameter_router, AppState};

use std::future::Future;
use std::sync::Arc;

use tokio::net::TcpListener;

use crate::catalog::{ChangeBroadcaster, ParameterStore};
use crate::error::Result;

/// Parameter catalog server
pub struct ParameterServer {
    config: ServerConfig,
    broadcaster: Arc<ChangeBroadcaster>,
}

impl ParameterServer {
    /// Create a new server with the given configuration
    ///
    /// The catalog starts from the baseline entries.
    pub fn new(config: ServerConfig) -> Self {
        let store = ParameterStore::with_defaults();
        let broadcaster = Arc::new(ChangeBroadcaster::with_capacity(
            store,
            config.broadcast_capacity,
        ));

        Self {
            config,
            broadcaster,
        }
    }

    /// Create a server around an existing broadcaster
    pub fn with_broadcaster(config: ServerConfig, broadcaster: Arc<ChangeBroadcaster>) -> Self {
        Self {
            config,
            broadcaster,
        }
    }

    /// Get a reference to the change broadcaster
    pub fn broadcaster(&self) -> &Arc<ChangeBroadcaster> {
        &self.broadcaster
    }

    /// Run the server
    ///
    /// This method blocks until the server is shut down.
    pub async fn run(&self) -> Result<()> {
        let listener = TcpListener::bind(self.config.bind_addr).await?;
        tracing::info!(addr = %self.config.bind_addr, "Parameter server listening");

        let router = parameter_router(Arc::clone(&self.broadcaster), &self.config);
        axum::serve(listener, router).await?;

        Ok(())
    }

    /// Run the server with graceful shutdown
    pub async fn run_until<F>(&self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let listener = TcpListener::bind(self.config.bind_addr).await?;
        tracing::info!(addr = %self.config.bind_addr, "Parameter server listening");

        let router = parameter_router(Arc::clone(&self.broadcaster), &self.config);
        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("Shutdown complete");
        Ok(())
    }
}

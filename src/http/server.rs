//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Mount the path router behind an Axum listener
//! - Wire up transport-level middleware (tracing, timeouts)
//! - Serve until the shutdown signal fires, then drain
//!
//! # Design Decisions
//! - The path router is installed as Axum's fallback service, so every
//!   request reaches it untouched
//! - Routes must be registered before `HttpServer::new`; the server never
//!   mutates the route table

use std::time::Duration;

use tokio::net::TcpListener;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::ServerConfig;
use crate::lifecycle::ShutdownSignal;
use crate::routing::Router;

/// HTTP server hosting a [`Router`].
pub struct HttpServer {
    app: axum::Router,
    config: ServerConfig,
}

impl HttpServer {
    /// Create a new HTTP server around a fully registered router.
    pub fn new(config: ServerConfig, router: Router) -> Self {
        tracing::info!(routes = router.routes().len(), "Router ready");
        let app = Self::build_app(&config, router);
        Self { app, config }
    }

    /// Build the Axum app with all transport layers.
    #[allow(deprecated)]
    fn build_app(config: &ServerConfig, router: Router) -> axum::Router {
        axum::Router::new()
            .fallback_service(router)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener until
    /// `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: ShutdownSignal,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            request_timeout_secs = self.config().timeouts.request_secs,
            "HTTP server starting"
        );

        axum::serve(listener, self.app)
            .with_graceful_shutdown(shutdown.recv())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_config() {
        let mut config = ServerConfig::default();
        config.timeouts.request_secs = 5;

        let server = HttpServer::new(config, Router::new());
        assert_eq!(server.config().timeouts.request_secs, 5);
    }
}

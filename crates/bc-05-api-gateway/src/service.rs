//! API Gateway service: binds the listener and serves the router until
//! the shutdown signal resolves.

use std::future::Future;

use axum::Router;
use tokio::net::TcpListener;
use tracing::info;

use crate::config::GatewayConfig;
use crate::domain::GatewayError;
use crate::router::{build_router, AppState};

/// API Gateway service
pub struct ApiGatewayService {
    config: GatewayConfig,
    router: Router,
}

impl ApiGatewayService {
    pub fn new(config: GatewayConfig, state: AppState) -> Self {
        let router = build_router(state, &config);
        Self { config, router }
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Router clone, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Bind the configured address and serve.
    pub async fn start<F>(self, shutdown: F) -> Result<(), GatewayError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = self.config.http_addr();
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| GatewayError::Bind(format!("{}: {}", addr, e)))?;
        self.serve(listener, shutdown).await
    }

    /// Serve on an already bound listener.
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> Result<(), GatewayError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let local = listener
            .local_addr()
            .map_err(|e| GatewayError::Bind(e.to_string()))?;
        info!(addr = %local, "[bc-05] 🌐 HTTP gateway listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| GatewayError::Serve(e.to_string()))?;

        info!("[bc-05] HTTP gateway stopped");
        Ok(())
    }
}

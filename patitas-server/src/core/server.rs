//! HTTP server shell

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::utils::{AppError, AppResult};

use super::{Config, ServerState};

pub struct Server {
    config: Config,
}

impl Server {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Initialize state, spawn workers, serve until ctrl-c.
    pub async fn run(self) -> AppResult<()> {
        let state = ServerState::initialize(self.config)?;
        state.start_background_tasks();

        let router = api::create_router(state.clone())
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive());

        let addr = format!("0.0.0.0:{}", state.config.http_port);
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;
        tracing::info!("HTTP API listening on {addr}");

        let shutdown = state.shutdown_token();
        axum::serve(listener, router)
            .with_graceful_shutdown(async move {
                if let Err(e) = tokio::signal::ctrl_c().await {
                    tracing::error!("Failed to listen for shutdown signal: {e}");
                }
                tracing::info!("Shutdown signal received");
                shutdown.cancel();
            })
            .await
            .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

        tracing::info!("Server stopped");
        Ok(())
    }
}

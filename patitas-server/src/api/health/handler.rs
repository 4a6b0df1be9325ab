//! Health check handler

use std::sync::OnceLock;
use std::time::Instant;

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use crate::core::ServerState;

static STARTED_AT: OnceLock<Instant> = OnceLock::new();

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub environment: String,
    pub uptime_seconds: u64,
    pub sync_pending: usize,
}

/// GET /api/health - liveness plus a couple of cheap gauges
pub async fn health(State(state): State<ServerState>) -> Json<HealthResponse> {
    let started = STARTED_AT.get_or_init(Instant::now);
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        environment: state.config.environment.clone(),
        uptime_seconds: started.elapsed().as_secs(),
        sync_pending: state.sync.status().pending,
    })
}

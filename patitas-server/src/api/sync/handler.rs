//! Sync API handlers

use axum::{Json, extract::State};
use serde::Deserialize;
use shared::models::{SyncQueueItem, SyncStatus};

use crate::core::ServerState;
use crate::utils::AppResult;

/// GET /api/sync/status - online/syncing/pending/last_error gauges
pub async fn status(State(state): State<ServerState>) -> AppResult<Json<SyncStatus>> {
    Ok(Json(state.sync.status()))
}

/// GET /api/sync/queue - pending items in replay order
pub async fn queue(State(state): State<ServerState>) -> AppResult<Json<Vec<SyncQueueItem>>> {
    Ok(Json(state.sync.pending()))
}

/// POST /api/sync/now - manual sync trigger
pub async fn sync_now(State(state): State<ServerState>) -> AppResult<Json<SyncStatus>> {
    state.sync.sync_now();
    Ok(Json(state.sync.status()))
}

#[derive(Debug, Deserialize)]
pub struct ConnectivityPayload {
    pub online: bool,
}

/// PUT /api/sync/connectivity - flip the online flag
///
/// The dashboard reports its connectivity changes here; going back
/// online schedules a replay pass.
pub async fn set_connectivity(
    State(state): State<ServerState>,
    Json(payload): Json<ConnectivityPayload>,
) -> AppResult<Json<SyncStatus>> {
    state.sync.set_online(payload.online);
    Ok(Json(state.sync.status()))
}

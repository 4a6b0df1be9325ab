//! Sync API module

mod handler;

use axum::{Router, routing::get, routing::post, routing::put};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/sync", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/status", get(handler::status))
        .route("/queue", get(handler::queue))
        .route("/now", post(handler::sync_now))
        .route("/connectivity", put(handler::set_connectivity))
}

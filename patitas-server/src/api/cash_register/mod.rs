//! Cash register API module

mod handler;

use axum::{Router, routing::get, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/sales", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/day-summary", get(handler::day_summary))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/receipt", post(handler::print_receipt))
}

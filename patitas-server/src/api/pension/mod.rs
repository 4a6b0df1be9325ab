//! Pension (boarding) API module
//!
//! Cages and stays live under one prefix because every stay mutation
//! can flip a cage's status.

mod handler;

use axum::{Router, routing::get, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/pension", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/summary", get(handler::summary))
        .route("/cages", get(handler::list_cages).post(handler::create_cage))
        .route(
            "/cages/{id}",
            get(handler::get_cage)
                .put(handler::update_cage)
                .delete(handler::delete_cage),
        )
        .route("/stays", get(handler::list_stays).post(handler::create_stay))
        .route("/stays/overdue", get(handler::overdue_stays))
        .route(
            "/stays/{id}",
            get(handler::get_stay)
                .put(handler::update_stay)
                .delete(handler::delete_stay),
        )
        .route("/stays/{id}/checkout", post(handler::check_out))
}
